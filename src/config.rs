use std::collections::HashMap;

use crate::error::MigrateError;

/// Identifier names of the legacy form API and its successor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    /// Object owning both the legacy factory and the new hook (`Form`).
    pub namespace: String,
    /// Legacy factory method (`create` in `Form.create()(Component)`).
    pub factory: String,
    /// Replacement hook (`useForm` in `Form.useForm()`).
    pub hook: String,
    /// Prop injected by the factory (`form`).
    pub form_prop: String,
    /// Legacy field decorator (`getFieldDecorator`).
    pub decorator: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            namespace: "Form".to_string(),
            factory: "create".to_string(),
            hook: "useForm".to_string(),
            form_prop: "form".to_string(),
            decorator: "getFieldDecorator".to_string(),
        }
    }
}

impl MigrationConfig {
    /// Builds a config from loosely typed host options. Unknown keys and
    /// non-string values are ignored.
    pub fn from_map(mut config: HashMap<String, serde_json::Value>) -> Self {
        let mut take = |key: &str| {
            config
                .remove(key)
                .and_then(|v| v.as_str().map(|s| s.to_string()))
        };
        let defaults = Self::default();
        Self {
            namespace: take("namespace").unwrap_or(defaults.namespace),
            factory: take("factory").unwrap_or(defaults.factory),
            hook: take("hook").unwrap_or(defaults.hook),
            form_prop: take("formProp").unwrap_or(defaults.form_prop),
            decorator: take("decorator").unwrap_or(defaults.decorator),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, MigrateError> {
        let map: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self::from_map(map))
    }
}
