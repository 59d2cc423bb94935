use std::collections::HashSet;

use swc_core::{
    common::{Span, Spanned},
    ecma::{
        ast::*,
        visit::{Visit, VisitWith},
    },
};

// -----------------------------------------------------------------------------
// Function-like nodes
// -----------------------------------------------------------------------------

pub enum FunctionBody<'a> {
    Block(&'a BlockStmt),
    Expr(&'a Expr),
    /// Overload signatures and ambient declarations.
    Missing,
}

#[derive(Clone, Copy)]
pub struct FnParam<'a> {
    /// Span removed when the whole parameter goes away.
    pub span: Span,
    pub pat: &'a Pat,
}

/// Common view over function declarations, function expressions and arrows.
pub struct FunctionLike<'a> {
    /// Declared name: the declaration's own identifier, or the variable the
    /// function is assigned to.
    pub name: Option<&'a Ident>,
    pub params: Vec<FnParam<'a>>,
    pub body: FunctionBody<'a>,
}

impl<'a> FunctionLike<'a> {
    pub fn from_fn_decl(n: &'a FnDecl) -> Self {
        Self::from_function(&n.function, Some(&n.ident))
    }

    pub fn from_function(f: &'a Function, name: Option<&'a Ident>) -> Self {
        Self {
            name,
            params: f
                .params
                .iter()
                .map(|p| FnParam { span: p.span, pat: &p.pat })
                .collect(),
            body: match &f.body {
                Some(block) => FunctionBody::Block(block),
                None => FunctionBody::Missing,
            },
        }
    }

    pub fn from_arrow(a: &'a ArrowExpr, name: Option<&'a Ident>) -> Self {
        Self {
            name,
            params: a
                .params
                .iter()
                .map(|pat| FnParam { span: pat.span(), pat })
                .collect(),
            body: match &*a.body {
                BlockStmtOrExpr::BlockStmt(block) => FunctionBody::Block(block),
                BlockStmtOrExpr::Expr(expr) => FunctionBody::Expr(expr),
            },
        }
    }

    /// `const Foo = (...) => ...` / `const Foo = function (...) {...}`
    pub fn from_declarator(d: &'a VarDeclarator) -> Option<Self> {
        let Pat::Ident(name) = &d.name else {
            return None;
        };
        match d.init.as_deref()? {
            Expr::Arrow(a) => Some(Self::from_arrow(a, Some(&name.id))),
            Expr::Fn(f) => Some(Self::from_function(&f.function, Some(&name.id))),
            _ => None,
        }
    }

    pub fn first_param(&self) -> Option<FnParam<'a>> {
        self.params.first().copied()
    }
}

// -----------------------------------------------------------------------------
// Bindings & references
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum ReferenceParent {
    /// Passed as a plain argument of `call`; `sole` when it is the only one.
    CallArgument { call: Box<CallExpr>, sole: bool },
    Callee,
    Other,
}

#[derive(Debug, Clone)]
pub struct Reference {
    pub span: Span,
    pub parent: ReferenceParent,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub id: Id,
    pub references: Vec<Reference>,
}

impl Binding {
    pub fn name(&self) -> &str {
        self.id.0.as_ref()
    }
}

/// Finds the binding declared for `func`'s name and every place it is used.
///
/// Identity is the resolved `Id`, so a shadowing declaration with the same
/// name in an inner scope is a different binding.
pub fn resolve(func: &FunctionLike<'_>, module: &Module) -> Option<Binding> {
    let ident = func.name?;
    let id = ident.to_id();
    let mut collector = ReferenceCollector {
        target: &id,
        claimed: HashSet::new(),
        references: vec![],
    };
    module.visit_with(&mut collector);
    let references = collector.references;
    Some(Binding {
        id,
        references,
    })
}

struct ReferenceCollector<'a> {
    target: &'a Id,
    claimed: HashSet<Span>,
    references: Vec<Reference>,
}

impl ReferenceCollector<'_> {
    fn is_target(&self, i: &Ident) -> bool {
        i.sym == self.target.0 && i.ctxt == self.target.1
    }

    fn is_target_expr(&self, e: &Expr) -> bool {
        matches!(e, Expr::Ident(i) if self.is_target(i))
    }

    fn record(&mut self, span: Span, parent: ReferenceParent) {
        if self.claimed.insert(span) {
            self.references.push(Reference { span, parent });
        }
    }
}

impl Visit for ReferenceCollector<'_> {
    fn visit_call_expr(&mut self, n: &CallExpr) {
        if let Callee::Expr(callee) = &n.callee {
            if self.is_target_expr(callee) {
                self.record(callee.span(), ReferenceParent::Callee);
            }
        }
        let sole = n.args.len() == 1;
        for arg in &n.args {
            if arg.spread.is_none() && self.is_target_expr(&arg.expr) {
                self.record(
                    arg.expr.span(),
                    ReferenceParent::CallArgument {
                        call: Box::new(n.clone()),
                        sole,
                    },
                );
            }
        }
        n.visit_children_with(self);
    }

    fn visit_expr(&mut self, n: &Expr) {
        if let Expr::Ident(i) = n {
            if self.is_target(i) {
                self.record(i.span, ReferenceParent::Other);
            }
        }
        n.visit_children_with(self);
    }

    fn visit_prop(&mut self, n: &Prop) {
        if let Prop::Shorthand(i) = n {
            if self.is_target(i) {
                self.record(i.span, ReferenceParent::Other);
            }
        }
        n.visit_children_with(self);
    }

    fn visit_jsx_element_name(&mut self, n: &JSXElementName) {
        if let JSXElementName::Ident(i) = n {
            if self.is_target(i) {
                self.record(i.span, ReferenceParent::Other);
            }
        }
        n.visit_children_with(self);
    }

    fn visit_jsx_object(&mut self, n: &JSXObject) {
        if let JSXObject::Ident(i) = n {
            if self.is_target(i) {
                self.record(i.span, ReferenceParent::Other);
            }
        }
        n.visit_children_with(self);
    }

    fn visit_named_export(&mut self, n: &NamedExport) {
        if n.src.is_none() {
            for s in &n.specifiers {
                if let ExportSpecifier::Named(named) = s {
                    if let ModuleExportName::Ident(i) = &named.orig {
                        if self.is_target(i) {
                            self.record(i.span, ReferenceParent::Other);
                        }
                    }
                }
            }
        }
        n.visit_children_with(self);
    }

    fn visit_simple_assign_target(&mut self, n: &SimpleAssignTarget) {
        if let SimpleAssignTarget::Ident(b) = n {
            if self.is_target(&b.id) {
                self.record(b.id.span, ReferenceParent::Other);
            }
        }
        n.visit_children_with(self);
    }
}
