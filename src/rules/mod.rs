//! Detection of legacy form API usage.
//!
//! [`FormMigration`] walks a module in tree order and hands candidate nodes to
//! the matchers. Each matcher decides applicability on its own and reports
//! through [`RuleContext`], which validates the edits of every fix.

use swc_core::{
    common::Span,
    ecma::{
        ast::*,
        visit::{Visit, VisitWith},
    },
};

use crate::binding::FunctionLike;
use crate::config::MigrationConfig;
use crate::edit::{compose, Edit, EditSet, TextRange};
use crate::source::{ParsedFile, SourceCode};

pub mod cleanup;
pub mod field_decorator;
pub mod form_props;
pub mod legacy_wrapper;

// -----------------------------------------------------------------------------
// Violations
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageId {
    FormProp,
    FieldDecorator,
    DecoratorBinding,
    EmptyFormDestructuring,
    EmptyPattern,
}

impl MessageId {
    pub fn message(self, config: &MigrationConfig) -> String {
        match self {
            MessageId::FormProp => format!("Should not have `{}` at props", config.form_prop),
            MessageId::FieldDecorator => format!("Should upgrade {} to antd@4", config.decorator),
            MessageId::DecoratorBinding => format!("remove {}", config.decorator),
            MessageId::EmptyFormDestructuring => {
                format!("remove empty {} destructuring", config.form_prop)
            }
            MessageId::EmptyPattern => "remove empty pattern".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub message_id: MessageId,
    pub message: String,
    pub range: TextRange,
    pub line: usize,
    pub column: usize,
    /// `None` when the pattern was found but cannot be rewritten safely.
    pub fix: Option<EditSet>,
}

// -----------------------------------------------------------------------------
// Rule context
// -----------------------------------------------------------------------------

pub struct RuleContext<'a> {
    pub source: &'a SourceCode,
    pub module: &'a Module,
    pub config: &'a MigrationConfig,
    violations: Vec<Violation>,
}

impl<'a> RuleContext<'a> {
    pub fn new(source: &'a SourceCode, module: &'a Module, config: &'a MigrationConfig) -> Self {
        Self {
            source,
            module,
            config,
            violations: vec![],
        }
    }

    pub fn report(&mut self, anchor: Span, message_id: MessageId, edits: Option<Vec<Edit>>) {
        let fix = edits.and_then(compose);
        let (line, column) = self.source.line_col(anchor);
        tracing::trace!(?message_id, line, column, fixable = fix.is_some(), "violation");
        self.violations.push(Violation {
            message_id,
            message: message_id.message(self.config),
            range: self.source.range(anchor),
            line,
            column,
            fix,
        });
    }

    /// Deletes `span` together with a directly following `,`.
    pub fn remove_with_separator(&self, span: Span) -> Vec<Edit> {
        let mut edits = vec![Edit::delete(self.source.range(span))];
        if let Some(comma) = self.source.token_after(span).filter(|t| t.is_punct(",")) {
            edits.push(Edit::delete(comma.range));
        }
        edits
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

// -----------------------------------------------------------------------------
// Traversal
// -----------------------------------------------------------------------------

pub struct FormMigration<'a> {
    cx: RuleContext<'a>,
}

impl<'a> FormMigration<'a> {
    pub fn new(cx: RuleContext<'a>) -> Self {
        Self { cx }
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.cx.into_violations()
    }
}

impl Visit for FormMigration<'_> {
    fn visit_fn_decl(&mut self, n: &FnDecl) {
        form_props::check(&mut self.cx, &FunctionLike::from_fn_decl(n));
        n.visit_children_with(self);
    }

    // export default function Foo({ form }) {}
    fn visit_export_default_decl(&mut self, n: &ExportDefaultDecl) {
        if let DefaultDecl::Fn(f) = &n.decl {
            if let Some(ident) = &f.ident {
                let func = FunctionLike::from_function(&f.function, Some(ident));
                form_props::check(&mut self.cx, &func);
            }
        }
        n.visit_children_with(self);
    }

    fn visit_var_declarator(&mut self, n: &VarDeclarator) {
        if let Some(func) = FunctionLike::from_declarator(n) {
            form_props::check(&mut self.cx, &func);
        }
        n.visit_children_with(self);
    }

    fn visit_function(&mut self, n: &Function) {
        cleanup::empty_params(&mut self.cx, &FunctionLike::from_function(n, None));
        n.visit_children_with(self);
    }

    fn visit_arrow_expr(&mut self, n: &ArrowExpr) {
        cleanup::empty_params(&mut self.cx, &FunctionLike::from_arrow(n, None));
        n.visit_children_with(self);
    }

    // Only a declaration standing as its own statement may be dropped whole;
    // `export const` and `for (const ...)` heads go through visit_var_decl.
    fn visit_stmt(&mut self, n: &Stmt) {
        match n {
            Stmt::Decl(Decl::Var(v)) => {
                cleanup::decorator_bindings(&mut self.cx, v, true);
                (**v).visit_children_with(self);
            }
            _ => n.visit_children_with(self),
        }
    }

    fn visit_var_decl(&mut self, n: &VarDecl) {
        cleanup::decorator_bindings(&mut self.cx, n, false);
        n.visit_children_with(self);
    }

    fn visit_jsx_element(&mut self, n: &JSXElement) {
        field_decorator::check(&mut self.cx, n);
        n.visit_children_with(self);
    }
}

/// Runs every matcher over one parsed file.
pub fn lint(parsed: &ParsedFile, config: &MigrationConfig) -> Vec<Violation> {
    let cx = RuleContext::new(&parsed.source, &parsed.module, config);
    let mut rule = FormMigration::new(cx);
    parsed.module.visit_with(&mut rule);
    rule.into_violations()
}
