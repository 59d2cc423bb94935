//! Applying reported fixes to source text.

use crate::config::MigrationConfig;
use crate::edit::TextRange;
use crate::error::MigrateError;
use crate::rules::{lint, Violation};
use crate::source::ParsedFile;

/// Upper bound on re-lint rounds in [`fix_source`].
pub const MAX_FIX_PASSES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixPass {
    pub output: String,
    pub applied: usize,
}

/// Applies every fix that does not touch text already rewritten by an
/// earlier fix of this pass. Skipped fixes are expected to be reported again
/// on the next lint of the output.
pub fn apply_fixes(source: &str, violations: &[Violation]) -> FixPass {
    let mut fixes: Vec<(TextRange, String)> = violations
        .iter()
        .filter_map(|v| v.fix.as_ref()?.merged(source))
        .collect();
    fixes.sort_by_key(|(range, _)| (range.start, range.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut last_end: Option<usize> = None;
    let mut applied = 0;
    for (range, text) in fixes {
        if last_end.is_some_and(|end| end >= range.start) {
            tracing::trace!(%range, "fix overlaps an applied fix; deferred");
            continue;
        }
        let Some(kept) = source.get(cursor..range.start) else {
            continue;
        };
        output.push_str(kept);
        output.push_str(&text);
        cursor = range.end;
        last_end = Some(range.end);
        applied += 1;
    }
    output.push_str(source.get(cursor..).unwrap_or_default());

    FixPass { output, applied }
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixReport {
    pub output: String,
    pub passes: usize,
    pub fixed: usize,
    /// Violations still present in `output`.
    pub remaining: Vec<Violation>,
}

/// Lints and fixes `source` until no fix applies or [`MAX_FIX_PASSES`] runs.
pub fn fix_source(
    filename: &str,
    source: &str,
    config: &MigrationConfig,
) -> Result<FixReport, MigrateError> {
    let mut text = source.to_string();
    let mut passes = 0;
    let mut fixed = 0;
    loop {
        let parsed = ParsedFile::parse(filename, &text)?;
        let violations = lint(&parsed, config);
        if passes == MAX_FIX_PASSES {
            tracing::debug!(filename, passes, "fix pass limit reached");
            return Ok(FixReport { output: text, passes, fixed, remaining: violations });
        }

        let pass = apply_fixes(&text, &violations);
        tracing::debug!(
            filename,
            pass = passes + 1,
            violations = violations.len(),
            applied = pass.applied,
            "fix pass"
        );
        if pass.applied == 0 {
            return Ok(FixReport { output: text, passes, fixed, remaining: violations });
        }
        passes += 1;
        fixed += pass.applied;
        text = pass.output;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::MessageId;
    use pretty_assertions::assert_eq;

    fn fix(code: &str) -> FixReport {
        fix_source("test.jsx", code, &MigrationConfig::default()).unwrap()
    }

    #[test]
    fn nothing_to_fix() {
        let report = fix("const a = 1;");
        assert_eq!(report.output, "const a = 1;");
        assert_eq!(report.passes, 0);
        assert_eq!(report.fixed, 0);
        assert!(report.remaining.is_empty());
    }

    #[test]
    fn independent_fixes_apply_in_one_pass() {
        let parsed = ParsedFile::parse("test.jsx", "f(function ({}) {}, ({}) => 1);").unwrap();
        let violations = lint(&parsed, &MigrationConfig::default());
        let pass = apply_fixes(parsed.source.as_str(), &violations);
        assert_eq!(pass.applied, 2);
        assert_eq!(pass.output, "f(function () {}, () => 1);");
    }

    #[test]
    fn overlapping_fix_is_deferred() {
        let code = "function A() {\n  const { getFieldDecorator } = form;\n}";
        let parsed = ParsedFile::parse("test.jsx", code).unwrap();
        let violations = lint(&parsed, &MigrationConfig::default());
        assert_eq!(violations.len(), 2);
        let pass = apply_fixes(code, &violations);
        assert_eq!(pass.applied, 1);
    }

    #[test]
    fn cascading_fixes_run_in_several_passes() {
        let code = "function A() {\n  const { getFieldDecorator } = form;\n}";
        let report = fix(code);
        assert_eq!(report.output, "function A() {\n  \n}");
        assert!(report.remaining.is_empty());
        assert!(report.passes >= 1);
    }

    #[test]
    fn unfixable_violations_remain() {
        let code = r#"<Item>{getFieldDecorator("x", { "rules": [] })(<Input />)}</Item>"#;
        let report = fix(code);
        assert_eq!(report.output, code);
        assert_eq!(report.passes, 0);
        assert_eq!(report.remaining.len(), 1);
        assert_eq!(report.remaining[0].message_id, MessageId::FieldDecorator);
    }

    #[test]
    fn parse_errors_propagate() {
        let err = fix_source("test.jsx", "function (", &MigrationConfig::default()).unwrap_err();
        assert!(matches!(err, MigrateError::Parse { .. }));
    }
}
