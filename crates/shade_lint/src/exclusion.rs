//! Bindings that are never reported as shadowing anything.

use shade_core::collections::FxHashSet;
use shade_core::intern::InternedString;
use shade_scope::{Binding, DeclarationKind, ScopeTree};

/// Why a binding was excluded from evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Ambient binding, or one the binder recorded without any declaration.
    NoDefinitions,
    /// TypeScript `this` parameter.
    ThisParameter,
    /// The name a class or enum declares inside its own body.
    SelfReference,
    AllowListed,
}

/// Decide whether `binding` is skipped as a candidate shadower.
///
/// Excluded bindings stay visible as lookup targets for inner bindings.
pub fn is_excluded(tree: &ScopeTree, binding: &Binding, allow: &FxHashSet<InternedString>) -> Option<Exclusion> {
    let def = match binding.canonical() {
        Some(def) => def,
        None => return Some(Exclusion::NoDefinitions),
    };

    if def.kind == DeclarationKind::ThisParameter {
        return Some(Exclusion::ThisParameter);
    }
    if is_self_reference(tree, binding) {
        return Some(Exclusion::SelfReference);
    }
    if allow.contains(&binding.name) {
        return Some(Exclusion::AllowListed);
    }
    None
}

/// `class Foo {}` binds `Foo` both in the enclosing scope and inside the
/// class body. The inner one shares the identifier of one of the outer
/// binding's class or enum definitions, not necessarily the first.
fn is_self_reference(tree: &ScopeTree, binding: &Binding) -> bool {
    let (Some(owner), Some(name_range)) = (tree.body_owner(binding.scope), binding.name_range()) else {
        return false;
    };
    tree.binding(owner).definitions.iter().any(|def| {
        matches!(def.kind, DeclarationKind::ClassDeclaration | DeclarationKind::Enum) && def.name_range == name_range
    })
}
