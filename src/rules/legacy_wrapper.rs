use swc_core::{
    common::{Span, Spanned},
    ecma::ast::*,
};

use crate::binding::{Binding, ReferenceParent};
use crate::config::MigrationConfig;

/// The `Form.create()(Component)` call that injects the form prop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyWrapperCallSite {
    /// Whole `Form.create()(Component)` expression.
    pub call_span: Span,
    /// `Form.create()`, deleted by the fix so only `(Component)` remains.
    pub callee_span: Span,
}

/// Proves that `binding` is the component handed to the legacy factory.
///
/// Only a binding with exactly one reference qualifies: with several uses
/// there is no single call site to rewrite.
pub fn is_wrapped(binding: &Binding, config: &MigrationConfig) -> Option<LegacyWrapperCallSite> {
    let [reference] = binding.references.as_slice() else {
        tracing::debug!(
            name = binding.name(),
            references = binding.references.len(),
            "binding not referenced exactly once"
        );
        return None;
    };
    let ReferenceParent::CallArgument { call, sole: true } = &reference.parent else {
        return None;
    };

    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    let Expr::Call(factory_call) = &**callee else {
        return None;
    };
    if !factory_call.args.is_empty() {
        return None;
    }
    let Callee::Expr(factory) = &factory_call.callee else {
        return None;
    };
    let Expr::Member(member) = &**factory else {
        return None;
    };
    let (Expr::Ident(obj), MemberProp::Ident(prop)) = (&*member.obj, &member.prop) else {
        return None;
    };
    if obj.sym.as_ref() != config.namespace.as_str() || prop.sym.as_ref() != config.factory.as_str() {
        return None;
    }

    Some(LegacyWrapperCallSite {
        call_span: call.span,
        callee_span: callee.span(),
    })
}
