//! Migration of the legacy antd form API (`Form.create()(Component)`, the
//! injected `form` prop and `getFieldDecorator`) to `Form.useForm()` and
//! `name`/option attributes on the form item.
//!
//! Files are parsed with swc, matchers report [`Violation`]s with optional
//! conflict-free fixes, and [`fix_source`] applies them until the text is
//! stable.

pub mod binding;
pub mod config;
pub mod edit;
pub mod error;
pub mod fixer;
pub mod rules;
pub mod source;

pub use config::MigrationConfig;
pub use edit::{Edit, EditSet, TextRange};
pub use error::MigrateError;
pub use fixer::{apply_fixes, fix_source, FixPass, FixReport, MAX_FIX_PASSES};
pub use rules::{MessageId, Violation};
pub use source::ParsedFile;

/// Parses one file and reports every legacy form API usage in it.
pub fn lint_source(
    filename: &str,
    source: &str,
    config: &MigrationConfig,
) -> Result<Vec<Violation>, MigrateError> {
    let parsed = ParsedFile::parse(filename, source)?;
    Ok(rules::lint(&parsed, config))
}
