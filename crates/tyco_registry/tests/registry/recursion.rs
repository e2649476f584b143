//! Self-referential and mutually recursive type graphs.

use pretty_assertions::assert_eq;
use tyco_registry::{CodecRef, ResolutionCache, ResolveError, ResolveState};

use crate::common::Fixture;

#[test]
fn self_reference_links_back_to_its_own_node() {
    let fx = Fixture::new();
    let node = fx.generic("Node", &["T"]);
    let node = fx.field(node, "value", "T");
    let node = fx.field(node, "next", "Node<T>");
    let registry = fx.build([node]);

    let resolved = registry
        .resolve_parameterized(&fx.ty("Node<String>"))
        .unwrap();
    let root = resolved.root();
    let node = resolved.root_node().unwrap();

    assert_eq!(node.field(fx.name("next")), Some(root));
    assert_eq!(node.state(), ResolveState::Resolved);
    assert_eq!(resolved.nodes().len(), 1);
}

#[test]
fn mutual_recursion_terminates() {
    let fx = Fixture::new();
    let tree = fx.field(fx.generic("Tree", &["T"]), "children", "Forest<T>");
    let forest = fx.generic("Forest", &["T"]);
    let forest = fx.field(forest, "head", "Tree<T>");
    let forest = fx.field(forest, "rest", "Forest<T>");
    let registry = fx.build([tree, forest]);

    let resolved = registry
        .resolve_parameterized(&fx.ty("Tree<Integer>"))
        .unwrap();
    let tree = resolved.root_node().unwrap();
    let forest_ref = tree.field(fx.name("children")).unwrap();
    let forest = resolved.node(forest_ref.as_parameterized().unwrap()).unwrap();

    assert_eq!(forest.field(fx.name("head")), Some(resolved.root()));
    assert_eq!(forest.field(fx.name("rest")), Some(forest_ref));
    assert!(resolved
        .nodes()
        .iter()
        .all(|n| n.state() == ResolveState::Resolved));
}

#[test]
fn distinct_instantiations_get_distinct_nodes() {
    let fx = Fixture::new();
    let node = fx.field(fx.generic("Node", &["T"]), "next", "Node<T>");
    let registry = fx.build([node]);

    let mut cache = ResolutionCache::new();
    let strings = registry
        .resolve_parameterized_with(&fx.ty("Node<String>"), &mut cache)
        .unwrap();
    let longs = registry
        .resolve_parameterized_with(&fx.ty("Node<Long>"), &mut cache)
        .unwrap();
    let again = registry
        .resolve_parameterized_with(&fx.ty("Node<String>"), &mut cache)
        .unwrap();

    assert_ne!(strings, longs);
    assert_eq!(strings, again);
    assert_eq!(cache.len(), 2);
    assert_eq!(
        cache.node(longs).unwrap().field(fx.name("next")),
        Some(CodecRef::Parameterized(longs))
    );
}

#[test]
fn expanding_field_hits_the_depth_limit() {
    let fx = Fixture::new();
    let boxed = fx.generic("Box", &["T"]);
    let nest = fx.field(fx.generic("Nest", &["T"]), "inner", "Nest<Box<T>>");
    let registry = fx.build([boxed, nest]);

    let err = registry
        .resolve_parameterized(&fx.ty("Nest<String>"))
        .unwrap_err();
    assert!(
        matches!(err, ResolveError::DepthExceeded { limit: 64, .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn depth_limit_is_configurable() {
    let fx = Fixture::new();
    let registry = fx
        .builder()
        .max_resolution_depth(1)
        .descriptor(fx.generic("Box", &["T"]))
        .build()
        .unwrap();

    assert!(registry
        .resolve_parameterized(&fx.ty("Box<Box<String>>"))
        .is_ok());
    let err = registry
        .resolve_parameterized(&fx.ty("Box<Box<Box<String>>>"))
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::DepthExceeded {
            ty: "Box<String>".into(),
            limit: 1,
        }
    );
}
