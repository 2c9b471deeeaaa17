//! Nearest enclosing same-name binding.

use shade_core::intern::InternedString;
use shade_scope::{BindingId, ScopeId, ScopeTree};

/// Walk up from `scope`'s parent and return the first binding named `name`.
///
/// When the first scope that declares `name` has both a value-side and a
/// type binding, the value-side one is returned. Scopes further up are never
/// consulted once a match is found.
pub fn find_enclosing(tree: &ScopeTree, scope: ScopeId, name: InternedString) -> Option<BindingId> {
    tree.ancestors(scope)
        .find_map(|ancestor| tree.lookup_local(ancestor, name))
        .and_then(|slot| slot.preferred())
}
