//! Contract violations detected while building a scope tree.

use crate::scope::{ScopeId, ScopeKind};
use shade_core::text::TextRange;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScopeTreeError {
    #[error("scope #{0} does not exist")]
    UnknownScope(u32),

    #[error("binding #{0} does not exist")]
    UnknownBinding(u32),

    #[error("scope #{index} names parent #{parent}, which is not declared before it")]
    ParentNotDeclared { index: u32, parent: u32 },

    #[error("the first scope must be the global scope, found {0:?}")]
    MissingGlobalScope(ScopeKind),

    #[error("scope #{0} has no parent; only the global scope may be a root")]
    SecondRoot(u32),

    #[error("range [{pos}, {end}] ends before it starts")]
    InvalidRange { pos: u32, end: u32 },

    #[error("a global scope can only be the root")]
    NestedGlobal,

    #[error("{kind:?} scope {range} is not within its parent's range {parent_range}")]
    ScopeOutsideParent {
        kind: ScopeKind,
        range: TextRange,
        parent_range: TextRange,
    },

    #[error("declaration of '{name}' at {range} lies outside its scope {scope_range}")]
    DeclarationOutsideScope {
        name: String,
        range: TextRange,
        scope_range: TextRange,
    },

    #[error("body scope {body:?} of '{name}' is not a direct child of {scope:?}")]
    BodyScopeNotChild {
        name: String,
        body: ScopeId,
        scope: ScopeId,
    },

    #[error("ambient binding '{0}' needs an explicit namespace")]
    AmbientWithoutNamespace(String),

    #[error("cannot exit the global scope")]
    ExitRoot,

    #[error("{0} scope(s) were entered but never exited")]
    UnclosedScopes(usize),

    #[error("invalid scope tree json: {0}")]
    Json(#[from] serde_json::Error),
}
