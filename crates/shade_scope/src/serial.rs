//! JSON form of a scope tree, for binders running in another process.
//!
//! Scopes are listed parents-before-children and refer to each other by
//! their position in the list. The first entry must be the global scope;
//! its range is ignored.

use crate::binding::{DeclarationKind, Definition, DefinitionFlags, Namespace};
use crate::error::ScopeTreeError;
use crate::scope::{ScopeId, ScopeKind};
use crate::tree::{ScopeTree, ScopeTreeBuilder};
use serde::{Deserialize, Serialize};
use shade_core::text::{TextPos, TextRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScopeTreeFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub scopes: Vec<ScopeEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScopeEntry {
    pub kind: ScopeKind,
    #[serde(default)]
    pub parent: Option<u32>,
    pub range: [TextPos; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<BindingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BindingEntry {
    pub name: String,
    /// Only read for ambient bindings; otherwise the definitions decide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Namespace>,
    #[serde(default)]
    pub definitions: Vec<DefinitionEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_scope: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DefinitionEntry {
    pub kind: DeclarationKind,
    pub name_range: [TextPos; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_range: Option<[TextPos; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<FlagName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlagName {
    TypeSignature,
    StaticMethod,
    TypeOnly,
}

const FLAG_NAMES: [(FlagName, DefinitionFlags); 3] = [
    (FlagName::TypeSignature, DefinitionFlags::TYPE_SIGNATURE),
    (FlagName::StaticMethod, DefinitionFlags::STATIC_METHOD),
    (FlagName::TypeOnly, DefinitionFlags::TYPE_ONLY),
];

fn flags_from_names(names: &[FlagName]) -> DefinitionFlags {
    FLAG_NAMES
        .iter()
        .filter(|(name, _)| names.contains(name))
        .fold(DefinitionFlags::NONE, |acc, (_, flag)| acc | *flag)
}

fn names_from_flags(flags: DefinitionFlags) -> Vec<FlagName> {
    FLAG_NAMES
        .iter()
        .filter(|(_, flag)| flags.contains(*flag))
        .map(|(name, _)| *name)
        .collect()
}

fn checked_range([pos, end]: [TextPos; 2]) -> Result<TextRange, ScopeTreeError> {
    if end < pos {
        return Err(ScopeTreeError::InvalidRange { pos, end });
    }
    Ok(TextRange::new(pos, end))
}

impl TryFrom<DefinitionEntry> for Definition {
    type Error = ScopeTreeError;

    fn try_from(entry: DefinitionEntry) -> Result<Self, ScopeTreeError> {
        Ok(Definition {
            kind: entry.kind,
            name_range: checked_range(entry.name_range)?,
            node_range: entry.node_range.map(checked_range).transpose()?,
            flags: flags_from_names(&entry.flags),
            source: entry.source,
        })
    }
}

impl From<&Definition> for DefinitionEntry {
    fn from(def: &Definition) -> Self {
        DefinitionEntry {
            kind: def.kind,
            name_range: def.name_range.into(),
            node_range: def.node_range.map(Into::into),
            flags: names_from_flags(def.flags),
            source: def.source.clone(),
        }
    }
}

impl ScopeTreeFile {
    pub fn into_tree(self) -> Result<ScopeTree, ScopeTreeError> {
        let mut builder = match self.source {
            Some(source) => ScopeTreeBuilder::with_source(source),
            None => ScopeTreeBuilder::new(),
        };

        if let Some(first) = self.scopes.first() {
            if first.kind != ScopeKind::Global {
                return Err(ScopeTreeError::MissingGlobalScope(first.kind));
            }
            if let Some(parent) = first.parent {
                return Err(ScopeTreeError::ParentNotDeclared { index: 0, parent });
            }
        }

        // Scopes first, so body-scope links can point at any scope.
        for (index, entry) in self.scopes.iter().enumerate().skip(1) {
            let index = index as u32;
            let parent = entry.parent.ok_or(ScopeTreeError::SecondRoot(index))?;
            if parent >= index {
                return Err(ScopeTreeError::ParentNotDeclared { index, parent });
            }
            let id = builder.add_scope(ScopeId(parent), entry.kind, checked_range(entry.range)?)?;
            if let Some(ref name) = entry.module_name {
                builder.set_module_name(id, name.as_str())?;
            }
        }

        for (index, entry) in self.scopes.into_iter().enumerate() {
            let scope = ScopeId(index as u32);
            for binding in entry.bindings {
                let id = if binding.definitions.is_empty() {
                    let namespace = binding
                        .namespace
                        .ok_or_else(|| ScopeTreeError::AmbientWithoutNamespace(binding.name.clone()))?;
                    builder.declare_ambient(scope, &binding.name, namespace)?
                } else {
                    let mut last = None;
                    for def in binding.definitions {
                        last = Some(builder.declare_in(scope, &binding.name, def.try_into()?)?);
                    }
                    // Non-empty, checked above.
                    match last {
                        Some(id) => id,
                        None => continue,
                    }
                };
                if let Some(body) = binding.body_scope {
                    builder.link_body_scope(id, ScopeId(body))?;
                }
            }
        }

        builder.finish()
    }

    pub fn from_tree(tree: &ScopeTree) -> Self {
        let scopes = tree
            .scopes()
            .iter()
            .map(|scope| ScopeEntry {
                kind: scope.kind,
                parent: scope.parent.map(|p| p.0),
                range: scope.range.into(),
                module_name: scope.module_name.clone(),
                bindings: scope
                    .bindings()
                    .iter()
                    .map(|&id| {
                        let binding = tree.binding(id);
                        BindingEntry {
                            name: tree.name(id).to_string(),
                            namespace: binding.has_no_source_identifiers().then_some(binding.namespace),
                            definitions: binding.definitions.iter().map(DefinitionEntry::from).collect(),
                            body_scope: binding.body_scope.map(|s| s.0),
                        }
                    })
                    .collect(),
            })
            .collect();

        ScopeTreeFile {
            source: tree.source().map(str::to_string),
            scopes,
        }
    }
}

impl ScopeTree {
    /// Parse a tree from its JSON form.
    pub fn from_json(text: &str) -> Result<ScopeTree, ScopeTreeError> {
        let file: ScopeTreeFile = serde_json::from_str(text)?;
        file.into_tree()
    }

    pub fn to_json(&self) -> Result<String, ScopeTreeError> {
        Ok(serde_json::to_string_pretty(&ScopeTreeFile::from_tree(self))?)
    }
}
