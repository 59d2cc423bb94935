//! `function Foo({ form }) {}` wrapped by `Form.create()(Foo)`.
//!
//! The injected prop is dropped from the parameter pattern, the form handle is
//! obtained from the hook at the top of the body, and the factory call is
//! removed from the wrapping expression.

use swc_core::{
    common::{Span, Spanned},
    ecma::ast::*,
};

use super::legacy_wrapper::{is_wrapped, LegacyWrapperCallSite};
use super::{MessageId, RuleContext};
use crate::binding::{resolve, FunctionBody, FunctionLike};
use crate::edit::Edit;

enum FormValue<'a> {
    /// `{ form }` / `{ form: form }`
    Alias,
    /// `{ form: { getFieldsValue } }`
    Nested(&'a ObjectPat),
}

struct FormProperty<'a> {
    span: Span,
    value: FormValue<'a>,
}

pub fn check(cx: &mut RuleContext<'_>, func: &FunctionLike<'_>) {
    let Some(param) = func.first_param() else {
        return;
    };
    let Pat::Object(pattern) = param.pat else {
        return;
    };
    let props = form_properties(pattern, &cx.config.form_prop);
    let Some(first) = props.first() else {
        return;
    };
    let Some(binding) = resolve(func, cx.module) else {
        return;
    };
    let Some(site) = is_wrapped(&binding, cx.config) else {
        return;
    };
    tracing::trace!(
        name = binding.name(),
        call = cx.source.text(site.call_span),
        "component wrapped by legacy factory"
    );

    let edits = match func.body {
        FunctionBody::Block(block) => plan(cx, &props, block, &site),
        FunctionBody::Expr(_) | FunctionBody::Missing => {
            tracing::debug!(
                name = binding.name(),
                "function body is not a block; reporting without fix"
            );
            None
        }
    };
    cx.report(first.span, MessageId::FormProp, edits);
}

fn form_properties<'a>(pattern: &'a ObjectPat, form: &str) -> Vec<FormProperty<'a>> {
    pattern
        .props
        .iter()
        .filter_map(|prop| {
            let value = match prop {
                ObjectPatProp::Assign(p) if p.key.id.sym.as_ref() == form && p.value.is_none() => {
                    FormValue::Alias
                }
                ObjectPatProp::KeyValue(kv)
                    if matches!(&kv.key, PropName::Ident(k) if k.sym.as_ref() == form) =>
                {
                    match &*kv.value {
                        Pat::Ident(b) if b.id.sym.as_ref() == form => FormValue::Alias,
                        Pat::Object(nested) => FormValue::Nested(nested),
                        _ => return None,
                    }
                }
                _ => return None,
            };
            Some(FormProperty {
                span: prop.span(),
                value,
            })
        })
        .collect()
}

fn plan(
    cx: &RuleContext<'_>,
    props: &[FormProperty<'_>],
    block: &BlockStmt,
    site: &LegacyWrapperCallSite,
) -> Option<Vec<Edit>> {
    let brace = cx.source.first_token(block)?;
    let form = &cx.config.form_prop;
    let mut statements = format!(
        "\nconst [{form}] = {}.{}();",
        cx.config.namespace, cx.config.hook
    );
    let callee = cx.source.range(site.callee_span);
    let mut edits = vec![];
    for prop in props {
        let removals = cx.remove_with_separator(prop.span);
        // `{ form: { a = Form.create()(Foo) } }`
        if removals.iter().any(|e| e.range().overlaps(callee)) {
            tracing::debug!(
                call = cx.source.text(site.call_span),
                "factory call lies inside a removed property; reporting without fix"
            );
            return None;
        }
        edits.extend(removals);
        if let FormValue::Nested(pattern) = prop.value {
            statements.push_str(&format!(
                "\nconst {} = {form};",
                cx.source.text(pattern.span)
            ));
        }
    }
    edits.push(Edit::insert_text_after(brace, statements));
    edits.push(Edit::delete(callee));
    Some(edits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::*;
    use crate::rules::Violation;
    use pretty_assertions::assert_eq;

    fn form_prop_violations(code: &str) -> Vec<Violation> {
        only(&lint_str(code), MessageId::FormProp)
    }

    #[test]
    fn alias_prop_moves_into_hook() {
        let code = "function Foo({form, a}) {}\nexport default Form.create()(Foo)";
        let violations = form_prop_violations(code);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            apply(code, &violations[0]),
            "function Foo({ a}) {\nconst [form] = Form.useForm();}\nexport default (Foo)"
        );
    }

    #[test]
    fn nested_pattern_is_rebound_from_hook() {
        let code = "function Foo({form: {a,b}}) {}\nexport default Form.create()(Foo)";
        let violations = form_prop_violations(code);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            apply(code, &violations[0]),
            "function Foo({}) {\nconst [form] = Form.useForm();\nconst {a,b} = form;}\nexport default (Foo)"
        );
    }

    #[test]
    fn alias_and_nested_pattern_combine() {
        let code = "function Foo({form, form: {a,b}, c}) {\n  return c;\n}\nexport default Form.create()(Foo);";
        let violations = form_prop_violations(code);
        assert_eq!(violations.len(), 1);
        let fix = violations[0].fix.as_ref().unwrap();
        // two property removals with their commas, one insertion, one callee deletion
        assert_eq!(fix.edits().len(), 6);
        assert_eq!(
            apply(code, &violations[0]),
            "function Foo({  c}) {\nconst [form] = Form.useForm();\nconst {a,b} = form;\n  return c;\n}\nexport default (Foo);"
        );
    }

    #[test]
    fn explicit_alias_matches() {
        let code = "function Foo({ a, form: form }) {}\nexport default Form.create()(Foo)";
        let violations = form_prop_violations(code);
        assert_eq!(
            apply(code, &violations[0]),
            "function Foo({ a,  }) {\nconst [form] = Form.useForm();}\nexport default (Foo)"
        );
    }

    #[test]
    fn arrow_with_block_body_is_fixed() {
        let code = "const Foo = ({ form }) => {\n  return null;\n};\nexport default Form.create()(Foo);";
        let violations = form_prop_violations(code);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            apply(code, &violations[0]),
            "const Foo = ({  }) => {\nconst [form] = Form.useForm();\n  return null;\n};\nexport default (Foo);"
        );
    }

    #[test]
    fn default_exported_declaration_is_fixed() {
        let code = "export default function Foo({ form }) {}\nconst Wrapped = Form.create()(Foo);";
        let violations = form_prop_violations(code);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            apply(code, &violations[0]),
            "export default function Foo({  }) {\nconst [form] = Form.useForm();}\nconst Wrapped = (Foo);"
        );
    }

    #[test]
    fn expression_body_is_reported_without_fix() {
        let code = "const Foo = ({ form }) => <div />;\nexport default Form.create()(Foo);";
        let violations = form_prop_violations(code);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].fix.is_none());
    }

    #[test]
    fn factory_call_inside_removed_property_is_not_fixed() {
        let code = "function Foo({form: {a = Form.create()(Foo)}}) {}";
        let violations = form_prop_violations(code);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].fix.is_none());
    }

    #[test]
    fn other_shapes_do_not_match() {
        for code in [
            "function Foo({ form: f }) {}\nexport default Form.create()(Foo)",
            "function Foo({ form = null }) {}\nexport default Form.create()(Foo)",
            "function Foo({ forms }) {}\nexport default Form.create()(Foo)",
            "function Foo(form) {}\nexport default Form.create()(Foo)",
        ] {
            assert!(form_prop_violations(code).is_empty(), "{code}");
        }
    }

    #[test]
    fn unwrapped_component_is_ignored() {
        let code = "function Foo({ form }) {}\nexport default Foo;";
        assert!(form_prop_violations(code).is_empty());
    }

    #[test]
    fn component_used_twice_is_ignored() {
        let code = "function Foo({ form }) {}\nconst A = Form.create()(Foo);\nconst B = <Foo />;";
        assert!(form_prop_violations(code).is_empty());
    }

    #[test]
    fn anchor_is_first_form_property() {
        let code = "function Foo({ a, form }) {}\nexport default Form.create()(Foo)";
        let violations = form_prop_violations(code);
        assert_eq!(&code[violations[0].range.start..violations[0].range.end], "form");
    }
}
