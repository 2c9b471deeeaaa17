//! shade_scope: The lexical scope tree consumed by the shadowing analysis.
//!
//! An external binder describes every scope of a program and the bindings
//! declared in it. The tree is built once (through [`ScopeTreeBuilder`] or
//! from its JSON form), then read without mutation. Scopes and bindings live
//! in arenas and refer to each other by index.

mod binding;
mod classify;
mod error;
mod scope;
pub mod serial;
mod tree;

pub use binding::{Binding, BindingId, DeclarationKind, Definition, DefinitionFlags, HoistingClass, Namespace};
pub use classify::{classify, Classification};
pub use error::ScopeTreeError;
pub use scope::{NameSlot, Scope, ScopeId, ScopeKind};
pub use tree::{ScopeTree, ScopeTreeBuilder};
