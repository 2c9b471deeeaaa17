//! The report/suppress decision for one inner binding and its enclosing match.

use shade_options::{HoistMode, NoShadowOptions};
use shade_scope::{Binding, BindingId, DeclarationKind, DefinitionFlags, ScopeKind, ScopeTree};

/// The check that suppressed a candidate shadow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// No enclosing binding, or only a built-in global while those are ignored.
    Visibility,
    /// A type and a value of the same name.
    Namespace,
    /// A parameter name of a function type signature.
    TypeSignatureParameter,
    /// `var f = function f() {}`
    SelfInitializer,
    /// The inner declaration textually precedes the outer one.
    Hoisting,
    /// A callback inside the outer declaration's initializer.
    Initialization,
    /// `declare module "m"` augmenting a type imported from `"m"`.
    ExternalModuleMerging,
    /// A static method's type parameter against its class's type parameter.
    /// Static members cannot see the class's type parameters.
    StaticMemberTypeParameter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Report the inner binding as shadowing this outer binding.
    Report(BindingId),
    Suppress(Gate),
}

/// Evaluates the gates in a fixed order; the first failing gate suppresses.
#[derive(Debug, Clone, Copy)]
pub struct Policy<'a> {
    options: &'a NoShadowOptions,
}

impl<'a> Policy<'a> {
    pub fn new(options: &'a NoShadowOptions) -> Self {
        Self { options }
    }

    pub fn evaluate(&self, tree: &ScopeTree, inner: &Binding, outer: Option<BindingId>) -> Verdict {
        let Some(outer_id) = outer else {
            return Verdict::Suppress(Gate::Visibility);
        };
        let outer = tree.binding(outer_id);

        if outer.has_no_source_identifiers() && !self.options.builtin_globals {
            return Verdict::Suppress(Gate::Visibility);
        }
        if self.options.ignore_type_value_shadow && is_type_value_crossing(inner, outer) {
            return Verdict::Suppress(Gate::Namespace);
        }
        if self.options.ignore_function_type_parameter_name_value_shadow && is_type_signature_parameter(inner, outer) {
            return Verdict::Suppress(Gate::TypeSignatureParameter);
        }
        if is_self_initializer(tree, inner, outer) {
            return Verdict::Suppress(Gate::SelfInitializer);
        }
        if self.options.hoist == HoistMode::All && is_declared_before(inner, outer) {
            return Verdict::Suppress(Gate::Hoisting);
        }
        if self.options.ignore_on_initialization && is_in_initializer_callback(tree, inner, outer) {
            return Verdict::Suppress(Gate::Initialization);
        }
        if is_external_module_merging(tree, inner, outer) {
            return Verdict::Suppress(Gate::ExternalModuleMerging);
        }
        if is_static_member_type_parameter(tree, inner, outer) {
            return Verdict::Suppress(Gate::StaticMemberTypeParameter);
        }
        Verdict::Report(outer_id)
    }
}

fn is_type_value_crossing(inner: &Binding, outer: &Binding) -> bool {
    inner.namespace.is_value() != outer.namespace.is_value()
}

fn is_type_signature_parameter(inner: &Binding, outer: &Binding) -> bool {
    outer.namespace.is_value()
        && !inner.definitions.is_empty()
        && inner
            .definitions
            .iter()
            .all(|def| def.flags.contains(DefinitionFlags::TYPE_SIGNATURE))
}

fn is_self_initializer(tree: &ScopeTree, inner: &Binding, outer: &Binding) -> bool {
    let (Some(inner_def), Some(outer_def)) = (inner.canonical(), outer.canonical()) else {
        return false;
    };
    if !matches!(
        inner_def.kind,
        DeclarationKind::FunctionExpressionName | DeclarationKind::ClassExpressionName
    ) {
        return false;
    }
    let Some(initializer) = outer_def.node_range else {
        return false;
    };
    initializer.strictly_covers(&inner_def.name_range) && tree.parent(inner.scope) == Some(outer.scope)
}

fn is_declared_before(inner: &Binding, outer: &Binding) -> bool {
    match (inner.name_range(), outer.name_range()) {
        (Some(inner_name), Some(outer_name)) => inner_name.ends_before(&outer_name),
        _ => false,
    }
}

fn is_in_initializer_callback(tree: &ScopeTree, inner: &Binding, outer: &Binding) -> bool {
    let Some(initializer) = outer.canonical().and_then(|def| def.node_range) else {
        return false;
    };
    // The nearest function-like scope around the inner binding.
    let Some(function) = tree.scope_chain(inner.scope).find(|&id| {
        matches!(
            tree.scope(id).kind,
            ScopeKind::Function | ScopeKind::FunctionExpression | ScopeKind::Module | ScopeKind::Global
        )
    }) else {
        return false;
    };
    let function = tree.scope(function);
    if function.kind != ScopeKind::FunctionExpression {
        return false;
    }
    // A named function expression sits inside its own name scope.
    let mut outer_of_function = function.parent;
    if let Some(parent) = outer_of_function {
        if tree.scope(parent).kind == ScopeKind::FunctionExpressionName {
            outer_of_function = tree.parent(parent);
        }
    }
    outer_of_function == Some(outer.scope) && initializer.covers(&function.range)
}

fn is_external_module_merging(tree: &ScopeTree, inner: &Binding, outer: &Binding) -> bool {
    let Some(import) = outer.canonical().filter(|def| def.is_type_only_import()) else {
        return false;
    };
    let Some(module) = import.source.as_deref() else {
        return false;
    };
    let scope = tree.scope(inner.scope);
    scope.kind == ScopeKind::ExternalModuleDeclaration
        && scope.module_name.as_deref() == Some(module)
        && matches!(inner.kind(), Some(DeclarationKind::Interface | DeclarationKind::TypeAlias))
}

fn is_static_member_type_parameter(tree: &ScopeTree, inner: &Binding, outer: &Binding) -> bool {
    let Some(def) = inner.canonical() else {
        return false;
    };
    if def.kind != DeclarationKind::TypeParameter
        || !def.flags.contains(DefinitionFlags::STATIC_METHOD)
        || outer.kind() != Some(DeclarationKind::TypeParameter)
    {
        return false;
    }
    let Some(class_body) = tree
        .scope_chain(inner.scope)
        .find(|&id| tree.scope(id).kind == ScopeKind::ClassBody)
    else {
        return false;
    };
    // Class type parameters live in the body or in a type scope around it.
    outer.scope == class_body
        || tree
            .parent(class_body)
            .is_some_and(|parent| parent == outer.scope && tree.scope(parent).kind == ScopeKind::Type)
}
