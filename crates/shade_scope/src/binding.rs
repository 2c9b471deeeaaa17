//! Bindings and the definitions that contribute to them.

use crate::scope::ScopeId;
use serde::{Deserialize, Serialize};
use shade_core::intern::InternedString;
use shade_core::text::TextRange;

/// Index of a binding in the tree's binding arena.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BindingId(pub u32);

impl BindingId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The syntactic form that introduced a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
    FunctionDeclaration,
    /// The name of a named function expression, bound inside its own scope.
    FunctionExpressionName,
    ClassDeclaration,
    /// The name of a named class expression, bound inside its own scope.
    ClassExpressionName,
    Parameter,
    /// A TypeScript `this` parameter. Not a real binding.
    ThisParameter,
    CatchClause,
    TypeParameter,
    TypeAlias,
    Interface,
    Enum,
    Namespace,
    Import,
    TypeImport,
}

/// Which name space a binding occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Namespace {
    Value,
    Type,
    /// Classes, enums and namespaces are usable both as values and as types.
    Both,
}

impl Namespace {
    /// `Both` counts as a value everywhere except declaration merging.
    #[inline]
    pub fn is_value(self) -> bool {
        matches!(self, Namespace::Value | Namespace::Both)
    }

    #[inline]
    pub fn is_type_only(self) -> bool {
        self == Namespace::Type
    }

    /// The namespace of a binding after merging a definition of `other` into it.
    pub fn merge(self, other: Namespace) -> Namespace {
        if self == other {
            self
        } else {
            Namespace::Both
        }
    }
}

/// When a declaration becomes visible inside its scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoistingClass {
    /// Hoisted to the top of the enclosing function or module.
    FunctionScoped,
    /// Visible from its position onward; earlier references are in the TDZ.
    BlockScopedLexical,
    /// Bound before the body runs. Never in a TDZ.
    ParameterLike,
}

bitflags::bitflags! {
    /// Syntactic context of a definition that the binder records for the analysis.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DefinitionFlags: u8 {
        const NONE           = 0;
        /// Parameter of a call/construct signature, function type, method
        /// signature, or body-less function. It names documentation only.
        const TYPE_SIGNATURE = 1 << 0;
        /// Type parameter of a static method.
        const STATIC_METHOD  = 1 << 1;
        /// `import type { X }` or `import { type X }`.
        const TYPE_ONLY      = 1 << 2;
    }
}

/// One declaration site of a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub kind: DeclarationKind,
    /// Range of the declared identifier.
    pub name_range: TextRange,
    /// Range of the enclosing declaration. For variables this is the whole
    /// declaration statement, initializer included.
    pub node_range: Option<TextRange>,
    pub flags: DefinitionFlags,
    /// Module specifier for import definitions.
    pub source: Option<String>,
}

impl Definition {
    pub fn new(kind: DeclarationKind, name_range: TextRange) -> Self {
        Self {
            kind,
            name_range,
            node_range: None,
            flags: DefinitionFlags::NONE,
            source: None,
        }
    }

    pub fn with_node(mut self, node_range: TextRange) -> Self {
        self.node_range = Some(node_range);
        self
    }

    pub fn with_flags(mut self, flags: DefinitionFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[inline]
    pub fn is_type_only_import(&self) -> bool {
        match self.kind {
            DeclarationKind::TypeImport => true,
            DeclarationKind::Import => self.flags.contains(DefinitionFlags::TYPE_ONLY),
            _ => false,
        }
    }
}

/// A named entity declared in exactly one scope.
#[derive(Debug, Clone)]
pub struct Binding {
    pub id: BindingId,
    pub name: InternedString,
    /// The scope that owns this binding.
    pub scope: ScopeId,
    pub namespace: Namespace,
    pub hoisting: HoistingClass,
    /// Declaration sites. The first one is canonical. Empty for ambient
    /// (built-in) bindings.
    pub definitions: Vec<Definition>,
    /// The scope a class, enum or function declaration introduces.
    pub body_scope: Option<ScopeId>,
}

impl Binding {
    #[inline]
    pub fn canonical(&self) -> Option<&Definition> {
        self.definitions.first()
    }

    #[inline]
    pub fn kind(&self) -> Option<DeclarationKind> {
        self.canonical().map(|def| def.kind)
    }

    #[inline]
    pub fn name_range(&self) -> Option<TextRange> {
        self.canonical().map(|def| def.name_range)
    }

    /// Ambient bindings (built-in globals) have no declaration in source.
    #[inline]
    pub fn has_no_source_identifiers(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_merge() {
        assert_eq!(Namespace::Value.merge(Namespace::Value), Namespace::Value);
        assert_eq!(Namespace::Value.merge(Namespace::Type), Namespace::Both);
        assert_eq!(Namespace::Both.merge(Namespace::Value), Namespace::Both);
    }

    #[test]
    fn test_both_counts_as_value() {
        assert!(Namespace::Both.is_value());
        assert!(!Namespace::Both.is_type_only());
        assert!(Namespace::Type.is_type_only());
    }

    #[test]
    fn test_type_only_import() {
        let plain = Definition::new(DeclarationKind::Import, TextRange::new(9, 12));
        assert!(!plain.is_type_only_import());
        let inline = plain.clone().with_flags(DefinitionFlags::TYPE_ONLY);
        assert!(inline.is_type_only_import());
        let type_import = Definition::new(DeclarationKind::TypeImport, TextRange::new(14, 17)).with_source("foo");
        assert!(type_import.is_type_only_import());
        assert_eq!(type_import.source.as_deref(), Some("foo"));
    }
}
