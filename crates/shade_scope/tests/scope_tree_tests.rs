//! Scope tree integration tests.
//!
//! Tests the JSON form of the tree and the contract checks applied while
//! loading it.

use pretty_assertions::assert_eq;
use shade_scope::serial::ScopeTreeFile;
use shade_scope::{DeclarationKind, DefinitionFlags, Namespace, ScopeId, ScopeKind, ScopeTree, ScopeTreeError};

/// `var a = function a() {};` with the global `Object`.
const FUNCTION_NAME_TREE: &str = r#"{
  "source": "var a = function a() {};",
  "scopes": [
    { "kind": "global", "range": [0, 0],
      "bindings": [ { "name": "Object", "namespace": "both" } ] },
    { "kind": "module", "parent": 0, "range": [0, 24],
      "bindings": [
        { "name": "a", "definitions": [
            { "kind": "var", "nameRange": [4, 5], "nodeRange": [0, 24] } ] } ] },
    { "kind": "functionExpressionName", "parent": 1, "range": [8, 23],
      "bindings": [
        { "name": "a", "definitions": [
            { "kind": "functionExpressionName", "nameRange": [17, 18] } ] } ] },
    { "kind": "functionExpression", "parent": 2, "range": [8, 23] }
  ]
}"#;

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_tree() {
    let tree = ScopeTree::from_json(FUNCTION_NAME_TREE).unwrap();
    assert_eq!(tree.scopes().len(), 4);
    assert_eq!(tree.bindings().len(), 3);
    assert_eq!(tree.source(), Some("var a = function a() {};"));

    let module = ScopeId(1);
    assert_eq!(tree.scope(module).kind, ScopeKind::Module);
    assert_eq!(tree.scope(module).children, vec![ScopeId(2)]);

    let object = tree.scope(tree.root()).bindings()[0];
    assert!(tree.binding(object).has_no_source_identifiers());
    assert_eq!(tree.binding(object).namespace, Namespace::Both);

    let outer = tree.scope(module).bindings()[0];
    assert_eq!(tree.name(outer), "a");
    assert_eq!(tree.binding(outer).kind(), Some(DeclarationKind::Var));
    assert_eq!(tree.binding(outer).canonical().and_then(|d| d.node_range).map(|r| r.end), Some(24));
}

#[test]
fn test_load_flags_and_module_name() {
    let json = r#"{
      "scopes": [
        { "kind": "global", "range": [0, 0] },
        { "kind": "module", "parent": 0, "range": [0, 80],
          "bindings": [
            { "name": "Foo", "definitions": [
                { "kind": "import", "nameRange": [14, 17], "flags": ["typeOnly"], "source": "foo" } ] } ] },
        { "kind": "externalModuleDeclaration", "parent": 1, "range": [30, 80], "moduleName": "foo" }
      ]
    }"#;
    let tree = ScopeTree::from_json(json).unwrap();
    let foo = tree.binding(tree.scope(ScopeId(1)).bindings()[0]);
    assert_eq!(foo.namespace, Namespace::Type);
    let def = foo.canonical().unwrap();
    assert_eq!(def.flags, DefinitionFlags::TYPE_ONLY);
    assert_eq!(def.source.as_deref(), Some("foo"));
    assert_eq!(tree.scope(ScopeId(2)).module_name.as_deref(), Some("foo"));
}

#[test]
fn test_body_scope_link() {
    let json = r#"{
      "scopes": [
        { "kind": "global", "range": [0, 0] },
        { "kind": "module", "parent": 0, "range": [0, 20],
          "bindings": [
            { "name": "Foo", "bodyScope": 2, "definitions": [
                { "kind": "classDeclaration", "nameRange": [6, 9] } ] } ] },
        { "kind": "classBody", "parent": 1, "range": [0, 20],
          "bindings": [
            { "name": "Foo", "definitions": [
                { "kind": "classDeclaration", "nameRange": [6, 9] } ] } ] }
      ]
    }"#;
    let tree = ScopeTree::from_json(json).unwrap();
    let class = tree.scope(ScopeId(1)).bindings()[0];
    assert_eq!(tree.binding(class).body_scope, Some(ScopeId(2)));
    assert_eq!(tree.body_owner(ScopeId(2)), Some(class));
}

// ============================================================================
// Contract violations
// ============================================================================

#[test]
fn test_first_scope_must_be_global() {
    let json = r#"{ "scopes": [ { "kind": "module", "range": [0, 10] } ] }"#;
    let err = ScopeTree::from_json(json).unwrap_err();
    assert!(matches!(err, ScopeTreeError::MissingGlobalScope(ScopeKind::Module)));
}

#[test]
fn test_second_root_rejected() {
    let json = r#"{ "scopes": [
        { "kind": "global", "range": [0, 0] },
        { "kind": "module", "range": [0, 10] } ] }"#;
    assert!(matches!(ScopeTree::from_json(json), Err(ScopeTreeError::SecondRoot(1))));
}

#[test]
fn test_forward_parent_rejected() {
    let json = r#"{ "scopes": [
        { "kind": "global", "range": [0, 0] },
        { "kind": "block", "parent": 2, "range": [0, 5] },
        { "kind": "module", "parent": 0, "range": [0, 10] } ] }"#;
    assert!(matches!(
        ScopeTree::from_json(json),
        Err(ScopeTreeError::ParentNotDeclared { index: 1, parent: 2 })
    ));
}

#[test]
fn test_self_parent_rejected() {
    let json = r#"{ "scopes": [
        { "kind": "global", "range": [0, 0] },
        { "kind": "module", "parent": 1, "range": [0, 10] } ] }"#;
    assert!(matches!(
        ScopeTree::from_json(json),
        Err(ScopeTreeError::ParentNotDeclared { index: 1, parent: 1 })
    ));
}

#[test]
fn test_ambient_needs_namespace() {
    let json = r#"{ "scopes": [
        { "kind": "global", "range": [0, 0], "bindings": [ { "name": "window" } ] } ] }"#;
    let err = ScopeTree::from_json(json).unwrap_err();
    assert_eq!(err.to_string(), "ambient binding 'window' needs an explicit namespace");
}

#[test]
fn test_unknown_field_rejected() {
    let json = r#"{ "scopes": [ { "kind": "global", "range": [0, 0], "depth": 1 } ] }"#;
    assert!(matches!(ScopeTree::from_json(json), Err(ScopeTreeError::Json(_))));
}

#[test]
fn test_declaration_outside_scope_rejected() {
    let json = r#"{ "scopes": [
        { "kind": "global", "range": [0, 0] },
        { "kind": "module", "parent": 0, "range": [0, 10],
          "bindings": [ { "name": "x", "definitions": [ { "kind": "let", "nameRange": [11, 12] } ] } ] } ] }"#;
    assert!(matches!(
        ScopeTree::from_json(json),
        Err(ScopeTreeError::DeclarationOutsideScope { .. })
    ));
}

#[test]
fn test_inverted_name_range_rejected() {
    let json = r#"{ "scopes": [
        { "kind": "global", "range": [0, 0] },
        { "kind": "module", "parent": 0, "range": [0, 10],
          "bindings": [ { "name": "x", "definitions": [ { "kind": "let", "nameRange": [5, 3] } ] } ] } ] }"#;
    assert!(matches!(
        ScopeTree::from_json(json),
        Err(ScopeTreeError::InvalidRange { pos: 5, end: 3 })
    ));
}

#[test]
fn test_inverted_scope_range_rejected() {
    let json = r#"{ "scopes": [
        { "kind": "global", "range": [0, 0] },
        { "kind": "module", "parent": 0, "range": [10, 0] } ] }"#;
    assert!(matches!(
        ScopeTree::from_json(json),
        Err(ScopeTreeError::InvalidRange { pos: 10, end: 0 })
    ));
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_json_round_trip_preserves_tree() {
    let tree = ScopeTree::from_json(FUNCTION_NAME_TREE).unwrap();
    let json = tree.to_json().unwrap();
    let reloaded = ScopeTree::from_json(&json).unwrap();

    let original: ScopeTreeFile = ScopeTreeFile::from_tree(&tree);
    let again: ScopeTreeFile = ScopeTreeFile::from_tree(&reloaded);
    assert_eq!(original, again);
}
