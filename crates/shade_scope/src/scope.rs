//! Scopes of the tree.

use crate::binding::BindingId;
use serde::{Deserialize, Serialize};
use shade_core::collections::FxIndexMap;
use shade_core::intern::InternedString;
use shade_core::text::TextRange;

/// Index of a scope in the tree's scope arena. The root is always `ScopeId(0)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScopeKind {
    /// Pseudo-scope holding built-in and ambient bindings. Always the root.
    Global,
    Module,
    Function,
    /// Function expressions and arrow functions.
    FunctionExpression,
    /// Holds the name of a named function expression.
    FunctionExpressionName,
    Block,
    ClassBody,
    Catch,
    For,
    Switch,
    With,
    Enum,
    Namespace,
    /// `declare global { ... }`
    GlobalAugmentation,
    /// `declare module "name" { ... }`
    ExternalModuleDeclaration,
    /// Type parameter scope of a type alias or interface.
    Type,
    /// Call signatures, construct signatures and function types.
    FunctionType,
}

/// The bindings one scope declares under one name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameSlot {
    /// Value or dual (class, enum, namespace) binding.
    pub value: Option<BindingId>,
    /// Type-only binding.
    pub ty: Option<BindingId>,
}

impl NameSlot {
    /// The binding a lookup by name resolves to: the value side wins.
    #[inline]
    pub fn preferred(&self) -> Option<BindingId> {
        self.value.or(self.ty)
    }
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Child scopes in the order they were entered.
    pub children: Vec<ScopeId>,
    pub range: TextRange,
    /// Module name of a `declare module "name"` scope.
    pub module_name: Option<String>,
    pub(crate) names: FxIndexMap<InternedString, NameSlot>,
    /// Bindings in declaration order.
    pub(crate) declared: Vec<BindingId>,
}

impl Scope {
    pub(crate) fn new(id: ScopeId, kind: ScopeKind, parent: Option<ScopeId>, range: TextRange) -> Self {
        Self {
            id,
            kind,
            parent,
            children: Vec::new(),
            range,
            module_name: None,
            names: FxIndexMap::default(),
            declared: Vec::new(),
        }
    }

    #[inline]
    pub fn slot(&self, name: InternedString) -> Option<&NameSlot> {
        self.names.get(&name)
    }

    /// Bindings owned by this scope, in declaration order.
    #[inline]
    pub fn bindings(&self) -> &[BindingId] {
        &self.declared
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
