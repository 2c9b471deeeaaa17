//! The scope tree arena and its builder.

use crate::binding::{Binding, BindingId, Definition, HoistingClass, Namespace};
use crate::classify::classify;
use crate::error::ScopeTreeError;
use crate::scope::{NameSlot, Scope, ScopeId, ScopeKind};
use shade_core::collections::FxMap;
use shade_core::intern::{InternedString, StringInterner};
use shade_core::text::{TextPos, TextRange};

/// An immutable, fully built scope tree.
///
/// All scopes and bindings are stored in two arenas and reference each other
/// by index, so the tree has no reference cycles and is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
    /// Body scope -> the class/enum/function binding that introduced it.
    body_owners: FxMap<ScopeId, BindingId>,
    interner: StringInterner,
    source: Option<String>,
}

impl ScopeTree {
    #[inline]
    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// Get a scope by ID. Panics on an ID that did not come from this tree.
    #[inline]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    /// Get a binding by ID. Panics on an ID that did not come from this tree.
    #[inline]
    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.index()]
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Source text the tree was built from, when the binder supplied it.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The text of a binding's name.
    #[inline]
    pub fn name(&self, id: BindingId) -> &str {
        self.interner.resolve(self.binding(id).name)
    }

    #[inline]
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scope(scope).parent
    }

    /// Strict ancestors of `scope`, nearest first, ending at the root.
    pub fn ancestors(&self, scope: ScopeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(scope),
        }
    }

    /// `scope` followed by its ancestors.
    pub fn scope_chain(&self, scope: ScopeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(scope),
        }
    }

    /// The class, enum or function binding whose body is `scope`.
    #[inline]
    pub fn body_owner(&self, scope: ScopeId) -> Option<BindingId> {
        self.body_owners.get(&scope).copied()
    }

    #[inline]
    pub fn lookup_local(&self, scope: ScopeId, name: InternedString) -> Option<&NameSlot> {
        self.scope(scope).slot(name)
    }
}

/// Iterator over a chain of scopes, see [`ScopeTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a ScopeTree,
    next: Option<ScopeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ScopeId;

    fn next(&mut self) -> Option<ScopeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Builds a [`ScopeTree`] the way a binder walks a program: enter a scope,
/// declare into it, exit.
///
/// The global pseudo-scope is created up front and is the only root.
/// Parents always exist before their children, so the result is acyclic.
#[derive(Debug)]
pub struct ScopeTreeBuilder {
    tree: ScopeTree,
    /// Currently open scopes, root at the bottom.
    stack: Vec<ScopeId>,
}

impl ScopeTreeBuilder {
    pub fn new() -> Self {
        let root = Scope::new(ScopeId::ROOT, ScopeKind::Global, None, TextRange::new(0, TextPos::MAX));
        Self {
            tree: ScopeTree {
                scopes: vec![root],
                bindings: Vec::new(),
                body_owners: FxMap::default(),
                interner: StringInterner::new(),
                source: None,
            },
            stack: vec![ScopeId::ROOT],
        }
    }

    pub fn with_source(source: impl Into<String>) -> Self {
        let mut builder = Self::new();
        builder.tree.source = Some(source.into());
        builder
    }

    pub fn interner(&self) -> &StringInterner {
        &self.tree.interner
    }

    #[inline]
    pub fn current_scope(&self) -> ScopeId {
        // The root is never popped.
        self.stack.last().copied().unwrap_or(ScopeId::ROOT)
    }

    /// Open a child of the current scope and make it current.
    pub fn enter_scope(&mut self, kind: ScopeKind, range: TextRange) -> Result<ScopeId, ScopeTreeError> {
        let id = self.add_scope(self.current_scope(), kind, range)?;
        self.stack.push(id);
        Ok(id)
    }

    /// Open a `declare module "name"` scope.
    pub fn enter_external_module(&mut self, name: impl Into<String>, range: TextRange) -> Result<ScopeId, ScopeTreeError> {
        let id = self.enter_scope(ScopeKind::ExternalModuleDeclaration, range)?;
        self.set_module_name(id, name)?;
        Ok(id)
    }

    pub fn set_module_name(&mut self, scope: ScopeId, name: impl Into<String>) -> Result<(), ScopeTreeError> {
        let scope = self
            .tree
            .scopes
            .get_mut(scope.index())
            .ok_or(ScopeTreeError::UnknownScope(scope.0))?;
        scope.module_name = Some(name.into());
        Ok(())
    }

    /// Close the current scope, returning to its parent.
    pub fn exit_scope(&mut self) -> Result<ScopeId, ScopeTreeError> {
        if self.stack.len() <= 1 {
            return Err(ScopeTreeError::ExitRoot);
        }
        self.stack.pop().ok_or(ScopeTreeError::ExitRoot)
    }

    /// Add a child scope under an explicit parent without moving the cursor.
    pub fn add_scope(&mut self, parent: ScopeId, kind: ScopeKind, range: TextRange) -> Result<ScopeId, ScopeTreeError> {
        if kind == ScopeKind::Global {
            return Err(ScopeTreeError::NestedGlobal);
        }
        let parent_scope = self
            .tree
            .scopes
            .get(parent.index())
            .ok_or(ScopeTreeError::UnknownScope(parent.0))?;
        if !parent_scope.range.covers(&range) {
            return Err(ScopeTreeError::ScopeOutsideParent {
                kind,
                range,
                parent_range: parent_scope.range,
            });
        }

        let id = ScopeId(self.tree.scopes.len() as u32);
        self.tree.scopes.push(Scope::new(id, kind, Some(parent), range));
        self.tree.scopes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Declare `name` in the current scope.
    pub fn declare(&mut self, name: &str, def: Definition) -> Result<BindingId, ScopeTreeError> {
        self.declare_in(self.current_scope(), name, def)
    }

    /// Declare `name` in `scope`.
    ///
    /// A second declaration of the same name on the same side (value or
    /// type) merges into the existing binding as another definition.
    pub fn declare_in(&mut self, scope: ScopeId, name: &str, def: Definition) -> Result<BindingId, ScopeTreeError> {
        let scope_range = self
            .tree
            .scopes
            .get(scope.index())
            .ok_or(ScopeTreeError::UnknownScope(scope.0))?
            .range;
        if !scope_range.covers(&def.name_range) {
            return Err(ScopeTreeError::DeclarationOutsideScope {
                name: name.to_string(),
                range: def.name_range,
                scope_range,
            });
        }

        let class = classify(&def);
        Ok(self.insert_binding(scope, name, class.namespace, class.hoisting, Some(def)))
    }

    /// Declare an ambient binding (a built-in global) in the root scope.
    pub fn declare_global(&mut self, name: &str, namespace: Namespace) -> BindingId {
        self.insert_binding(ScopeId::ROOT, name, namespace, HoistingClass::FunctionScoped, None)
    }

    /// Declare a binding with no source declaration in `scope`.
    pub fn declare_ambient(&mut self, scope: ScopeId, name: &str, namespace: Namespace) -> Result<BindingId, ScopeTreeError> {
        if self.tree.scopes.get(scope.index()).is_none() {
            return Err(ScopeTreeError::UnknownScope(scope.0));
        }
        Ok(self.insert_binding(scope, name, namespace, HoistingClass::FunctionScoped, None))
    }

    fn insert_binding(
        &mut self,
        scope: ScopeId,
        name: &str,
        namespace: Namespace,
        hoisting: HoistingClass,
        def: Option<Definition>,
    ) -> BindingId {
        let key = self.tree.interner.intern(name);
        let tree = &mut self.tree;
        let owner = &mut tree.scopes[scope.index()];
        let slot = owner.names.entry(key).or_default();
        let side = if namespace.is_type_only() { &mut slot.ty } else { &mut slot.value };

        if let Some(existing) = *side {
            let binding = &mut tree.bindings[existing.index()];
            binding.namespace = binding.namespace.merge(namespace);
            binding.definitions.extend(def);
            return existing;
        }

        let id = BindingId(tree.bindings.len() as u32);
        *side = Some(id);
        owner.declared.push(id);
        tree.bindings.push(Binding {
            id,
            name: key,
            scope,
            namespace,
            hoisting,
            definitions: def.into_iter().collect(),
            body_scope: None,
        });
        id
    }

    /// Record that `body` is the scope introduced by `binding`'s declaration.
    pub fn link_body_scope(&mut self, binding: BindingId, body: ScopeId) -> Result<(), ScopeTreeError> {
        let owner = self
            .tree
            .bindings
            .get(binding.index())
            .ok_or(ScopeTreeError::UnknownBinding(binding.0))?;
        let body_scope = self
            .tree
            .scopes
            .get(body.index())
            .ok_or(ScopeTreeError::UnknownScope(body.0))?;
        if body_scope.parent != Some(owner.scope) {
            return Err(ScopeTreeError::BodyScopeNotChild {
                name: self.tree.interner.resolve(owner.name).to_string(),
                body,
                scope: owner.scope,
            });
        }

        self.tree.bindings[binding.index()].body_scope = Some(body);
        self.tree.body_owners.insert(body, binding);
        Ok(())
    }

    pub fn finish(self) -> Result<ScopeTree, ScopeTreeError> {
        if self.stack.len() > 1 {
            return Err(ScopeTreeError::UnclosedScopes(self.stack.len() - 1));
        }
        Ok(self.tree)
    }
}

impl Default for ScopeTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
