//! Binding classification: namespace and hoisting class per declaration form.

use crate::binding::{DeclarationKind, Definition, HoistingClass, Namespace};

/// The namespace and hoisting class of one definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub namespace: Namespace,
    pub hoisting: HoistingClass,
}

/// Classify a definition by its declaration form.
///
/// `import { type X }` is written with [`DeclarationKind::Import`] plus the
/// `TYPE_ONLY` flag and classifies the same as `import type { X }`.
pub fn classify(def: &Definition) -> Classification {
    use DeclarationKind as K;
    use HoistingClass as H;

    let (namespace, hoisting) = match def.kind {
        K::Var | K::FunctionDeclaration | K::FunctionExpressionName => (Namespace::Value, H::FunctionScoped),
        K::Import if def.is_type_only_import() => (Namespace::Type, H::FunctionScoped),
        K::Import => (Namespace::Value, H::FunctionScoped),
        K::TypeImport => (Namespace::Type, H::FunctionScoped),
        K::Let | K::Const => (Namespace::Value, H::BlockScopedLexical),
        K::ClassDeclaration | K::ClassExpressionName | K::Enum | K::Namespace => (Namespace::Both, H::BlockScopedLexical),
        K::TypeAlias | K::Interface => (Namespace::Type, H::BlockScopedLexical),
        K::Parameter | K::ThisParameter | K::CatchClause => (Namespace::Value, H::ParameterLike),
        K::TypeParameter => (Namespace::Type, H::ParameterLike),
    };
    Classification { namespace, hoisting }
}
