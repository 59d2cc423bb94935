//! `{getFieldDecorator("name", options)(<Input />)}` inside a form item.
//!
//! The decorator's name and options become attributes of the enclosing
//! element and the decorated element takes the place of the expression child.

use swc_core::{common::Spanned, ecma::ast::*};

use super::{MessageId, RuleContext};
use crate::edit::{Edit, TextRange};

pub fn check(cx: &mut RuleContext<'_>, el: &JSXElement) {
    let calls: Vec<_> = el
        .children
        .iter()
        .filter_map(|child| decorator_call(child, &cx.config.decorator))
        .collect();
    let Some(&(container, outer, inner)) = calls.first() else {
        return;
    };
    // one item cannot carry two field names
    let edits = match calls.len() {
        1 => plan(cx, el, container, outer, inner),
        _ => None,
    };
    if edits.is_none() {
        tracing::debug!(
            call = cx.source.text(outer.span),
            "decorator call is not mechanically rewritable; reporting without fix"
        );
    }
    cx.report(el.span, MessageId::FieldDecorator, edits);
}

/// Matches `decorator(...)(...)` as the expression of a child container.
fn decorator_call<'a>(
    child: &'a JSXElementChild,
    decorator: &str,
) -> Option<(&'a JSXExprContainer, &'a CallExpr, &'a CallExpr)> {
    let JSXElementChild::JSXExprContainer(container) = child else {
        return None;
    };
    let JSXExpr::Expr(expr) = &container.expr else {
        return None;
    };
    let Expr::Call(outer) = &**expr else {
        return None;
    };
    let Callee::Expr(callee) = &outer.callee else {
        return None;
    };
    let Expr::Call(inner) = &**callee else {
        return None;
    };
    match &inner.callee {
        Callee::Expr(name) if matches!(&**name, Expr::Ident(i) if i.sym.as_ref() == decorator) => {
            Some((container, outer, inner))
        }
        _ => None,
    }
}

fn plan(
    cx: &RuleContext<'_>,
    el: &JSXElement,
    container: &JSXExprContainer,
    outer: &CallExpr,
    inner: &CallExpr,
) -> Option<Vec<Edit>> {
    let [arg] = outer.args.as_slice() else {
        return None;
    };
    if arg.spread.is_some() {
        return None;
    }
    let Expr::JSXElement(field) = unparen(&arg.expr) else {
        return None;
    };

    let mut added = vec![("name".to_string(), name_value(cx, inner.args.first()?)?)];
    match inner.args.as_slice() {
        [_] => {}
        [_, options] => added.extend(option_attrs(cx, options)?),
        _ => return None,
    }
    let mut taken = attr_names(&el.opening);
    for (key, _) in &added {
        if taken.contains(&key.as_str()) {
            return None;
        }
        taken.push(key);
    }

    let mut attrs = String::new();
    for (key, value) in &added {
        attrs.push_str(&format!(" {key}={value}"));
    }
    attrs.push('>');

    let open_end = cx.source.range(el.opening.span).end;
    let gt = TextRange::new(open_end.checked_sub(1)?, open_end);
    if cx.source.slice(gt) != ">" {
        return None;
    }

    Some(vec![
        Edit::replace(gt, attrs),
        Edit::replace(cx.source.range(container.span), cx.source.text(field.span)),
    ])
}

fn attr_names(opening: &JSXOpeningElement) -> Vec<&str> {
    opening
        .attrs
        .iter()
        .filter_map(|attr| match attr {
            JSXAttrOrSpread::JSXAttr(JSXAttr {
                name: JSXAttrName::Ident(name),
                ..
            }) => Some(name.sym.as_ref()),
            _ => None,
        })
        .collect()
}

fn unparen(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(p) = expr {
        expr = &p.expr;
    }
    expr
}

/// `"x"` stays a plain attribute string; anything else is substituted as an
/// expression, verbatim.
fn name_value(cx: &RuleContext<'_>, arg: &ExprOrSpread) -> Option<String> {
    if arg.spread.is_some() {
        return None;
    }
    let text = cx.source.text(arg.expr.span());
    match &*arg.expr {
        // JSX attribute strings have no escape sequences
        Expr::Lit(Lit::Str(_)) if !text.contains('\\') => Some(text.to_string()),
        _ => Some(format!("{{{text}}}")),
    }
}

/// One `key={value}` attribute per option. Keys that are not plain
/// identifiers cannot be expressed as attribute names.
fn option_attrs(cx: &RuleContext<'_>, options: &ExprOrSpread) -> Option<Vec<(String, String)>> {
    if options.spread.is_some() {
        return None;
    }
    let Expr::Object(obj) = unparen(&options.expr) else {
        return None;
    };
    obj.props
        .iter()
        .map(|prop| match prop {
            PropOrSpread::Prop(p) => match &**p {
                Prop::KeyValue(kv) => match &kv.key {
                    PropName::Ident(key) => Some((
                        key.sym.to_string(),
                        format!("{{{}}}", cx.source.text(kv.value.span())),
                    )),
                    _ => None,
                },
                Prop::Shorthand(i) => Some((i.sym.to_string(), format!("{{{}}}", i.sym))),
                _ => None,
            },
            PropOrSpread::Spread(_) => None,
        })
        .collect()
}
