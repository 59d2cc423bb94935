use swc_core::{
    common::{Span, Spanned},
    ecma::ast::*,
};

use super::{MessageId, RuleContext};
use crate::binding::FunctionLike;
use crate::edit::{Edit, TextRange};

// -----------------------------------------------------------------------------
// const { getFieldDecorator } = form;
// -----------------------------------------------------------------------------

/// Drops decorator bindings destructured from the form object, and the whole
/// declaration once nothing else is destructured. `removable` is false when
/// the declaration is not a statement of its own (export, loop head).
pub fn decorator_bindings(cx: &mut RuleContext<'_>, decl: &VarDecl, removable: bool) {
    for d in &decl.decls {
        let Pat::Object(pattern) = &d.name else {
            continue;
        };
        let from_form = matches!(
            d.init.as_deref(),
            Some(Expr::Ident(i)) if i.sym.as_ref() == cx.config.form_prop.as_str()
        );
        if !from_form {
            continue;
        }

        let mut remaining = pattern.props.len();
        for prop in &pattern.props {
            if is_decorator_binding(prop, &cx.config.decorator) {
                remaining -= 1;
                let edits = cx.remove_with_separator(prop.span());
                cx.report(prop.span(), MessageId::DecoratorBinding, Some(edits));
            }
        }

        if remaining == 0 && removable && decl.decls.len() == 1 {
            let edits = vec![Edit::delete(cx.source.range(decl.span))];
            cx.report(decl.span, MessageId::EmptyFormDestructuring, Some(edits));
        }
    }
}

fn is_decorator_binding(prop: &ObjectPatProp, decorator: &str) -> bool {
    match prop {
        ObjectPatProp::Assign(p) => p.key.id.sym.as_ref() == decorator && p.value.is_none(),
        ObjectPatProp::KeyValue(kv) => {
            matches!(&kv.key, PropName::Ident(k) if k.sym.as_ref() == decorator)
                && matches!(&*kv.value, Pat::Ident(b) if b.id.sym.as_ref() == decorator)
        }
        ObjectPatProp::Rest(_) => false,
    }
}

// -----------------------------------------------------------------------------
// f({}) => f()
// -----------------------------------------------------------------------------

pub fn empty_params(cx: &mut RuleContext<'_>, func: &FunctionLike<'_>) {
    let [param] = func.params.as_slice() else {
        return;
    };
    let Pat::Object(pattern) = param.pat else {
        return;
    };
    if !pattern.props.is_empty() {
        return;
    }
    let range = removal_range(cx, param.span, pattern);
    cx.report(param.span, MessageId::EmptyPattern, Some(vec![Edit::delete(range)]));
}

// `({}: Props)` loses its annotation along with the pattern.
fn removal_range(cx: &RuleContext<'_>, span: Span, pattern: &ObjectPat) -> TextRange {
    let range = cx.source.range(span);
    match &pattern.type_ann {
        Some(ann) => TextRange::new(range.start, range.end.max(cx.source.range(ann.span()).end)),
        None => range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn removes_decorator_binding_and_separator() {
        let code = "const { getFieldDecorator, validateFields } = form;";
        let violations = only(&lint_str(code), MessageId::DecoratorBinding);
        assert_eq!(violations.len(), 1);
        assert_eq!(apply(code, &violations[0]), "const {  validateFields } = form;");
        assert!(only(&lint_str(code), MessageId::EmptyFormDestructuring).is_empty());
    }

    #[test]
    fn sole_decorator_binding_removes_declaration() {
        let code = "function A() {\n  const { getFieldDecorator } = form;\n  return 1;\n}";
        let violations = lint_str(code);
        assert_eq!(only(&violations, MessageId::DecoratorBinding).len(), 1);
        let empty = only(&violations, MessageId::EmptyFormDestructuring);
        assert_eq!(empty.len(), 1);
        assert_eq!(apply(code, &empty[0]), "function A() {\n  \n  return 1;\n}");
    }

    #[test]
    fn empty_destructuring_from_form_is_removed() {
        let code = "const {} = form;\nfoo();";
        let violations = lint_str(code);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message_id, MessageId::EmptyFormDestructuring);
        assert_eq!(apply(code, &violations[0]), "\nfoo();");
    }

    #[test]
    fn explicit_decorator_alias_is_removed() {
        let code = "const { getFieldDecorator: getFieldDecorator, a } = form;";
        let violations = only(&lint_str(code), MessageId::DecoratorBinding);
        assert_eq!(apply(code, &violations[0]), "const {  a } = form;");
    }

    #[test]
    fn other_sources_and_aliases_are_kept() {
        for code in [
            "const { getFieldDecorator } = this.props.form;",
            "const { getFieldDecorator } = other;",
            "const { getFieldDecorator: gfd } = form;",
        ] {
            assert!(lint_str(code).is_empty(), "{code}");
        }
    }

    #[test]
    fn exported_or_shared_declarations_are_not_removed_whole() {
        for code in [
            "export const { getFieldDecorator } = form;",
            "const { getFieldDecorator } = form, x = 1;",
        ] {
            let violations = lint_str(code);
            assert_eq!(only(&violations, MessageId::DecoratorBinding).len(), 1, "{code}");
            assert!(only(&violations, MessageId::EmptyFormDestructuring).is_empty(), "{code}");
        }
    }

    #[test]
    fn empty_parameter_pattern_is_removed() {
        let code = "function f({}) {}\nconst g = ({}) => 1;\nconst h = function ({}) {};";
        let violations = only(&lint_str(code), MessageId::EmptyPattern);
        assert_eq!(violations.len(), 3);
        assert_eq!(apply(code, &violations[0]), "function f() {}\nconst g = ({}) => 1;\nconst h = function ({}) {};");
        assert_eq!(apply(code, &violations[1]), "function f({}) {}\nconst g = () => 1;\nconst h = function ({}) {};");
    }

    #[test]
    fn empty_pattern_with_annotation_is_removed_whole() {
        let code = "const g = ({}: Props) => 1;";
        let parsed = crate::source::ParsedFile::parse("test.tsx", code).unwrap();
        let violations = crate::rules::lint(&parsed, &Default::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(apply(code, &violations[0]), "const g = () => 1;");
    }

    #[test]
    fn non_empty_or_extra_params_are_kept() {
        for code in [
            "function f({ a }) {}",
            "function f({}, b) {}",
            "function f({} = {}) {}",
            "function f() {}",
        ] {
            assert!(lint_str(code).is_empty(), "{code}");
        }
    }
}
