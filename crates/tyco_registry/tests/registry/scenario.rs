//! The canonical registry: String, List, ArrayList aliasing List, and a user
//! `Pair<A, B>`.

use pretty_assertions::assert_eq;
use tyco_registry::{CodecRef, Registry, ResolveError, ResolveState};

use crate::common::Fixture;

fn pair_registry(fx: &Fixture) -> Registry {
    let pair = fx.generic("Pair", &["A", "B"]);
    let pair = fx.field(pair, "first", "A");
    let pair = fx.field(pair, "second", "B");
    fx.build([pair])
}

#[test]
fn list_and_array_list_are_one_singleton() {
    let fx = Fixture::new();
    let registry = pair_registry(&fx);

    let list = registry.lookup_concrete_str("List").unwrap();
    let array_list = registry.lookup_concrete_str("ArrayList").unwrap();
    assert!(std::ptr::eq(list, array_list));
}

#[test]
fn concrete_lookups_return_the_same_instance() {
    let fx = Fixture::new();
    let registry = pair_registry(&fx);

    for (_, descriptor) in registry.table().zero_arity() {
        if descriptor.is_abstract {
            continue;
        }
        let first = registry.lookup_concrete(descriptor.raw_type).unwrap();
        let second = registry.lookup_concrete(descriptor.raw_type).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}

#[test]
fn pair_arguments_are_the_singletons() {
    let fx = Fixture::new();
    let registry = pair_registry(&fx);

    let resolved = registry
        .resolve_parameterized(&fx.ty("Pair<String, Integer>"))
        .unwrap();
    let pair = resolved.root_node().unwrap();

    let string = registry.lookup_concrete_str("String").unwrap().id();
    let integer = registry.lookup_concrete_str("Integer").unwrap().id();
    assert_eq!(
        pair.args(),
        [CodecRef::Concrete(string), CodecRef::Concrete(integer)]
    );
    assert_eq!(pair.field(fx.name("first")), Some(CodecRef::Concrete(string)));
    assert_eq!(pair.field(fx.name("second")), Some(CodecRef::Concrete(integer)));
    assert_eq!(pair.state(), ResolveState::Resolved);
    assert_eq!(pair.ty(), &fx.ty("Pair<String, Integer>"));
}

#[test]
fn each_resolution_is_independently_owned() {
    let fx = Fixture::new();
    let registry = pair_registry(&fx);
    let ty = fx.ty("Pair<String, Integer>");

    let first = registry.resolve_parameterized(&ty).unwrap();
    let second = registry.resolve_parameterized(&ty).unwrap();
    assert_eq!(first, second);
    assert!(!std::ptr::eq(
        first.root_node().unwrap(),
        second.root_node().unwrap()
    ));
}

#[test]
fn pair_with_one_argument_is_an_arity_error() {
    let fx = Fixture::new();
    let registry = pair_registry(&fx);

    let err = registry
        .resolve_parameterized(&fx.ty("Pair<String>"))
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::Arity {
            raw_type: "Pair".into(),
            expected: 2,
            received: 1,
        }
    );
}

#[test]
fn unknown_generic_is_no_match() {
    let fx = Fixture::new();
    let registry = pair_registry(&fx);

    let err = registry
        .resolve_parameterized(&fx.ty("Triple<String, Integer, Long>"))
        .unwrap_err();
    assert!(err.is_no_match());
    assert_eq!(
        err,
        ResolveError::NoMatch {
            raw_type: "Triple".into()
        }
    );
}

#[test]
fn nested_pairs_resolve_recursively() {
    let fx = Fixture::new();
    let registry = pair_registry(&fx);

    let resolved = registry
        .resolve_parameterized(&fx.ty("Pair<Pair<String, Long>, List<Integer>>"))
        .unwrap();
    let outer = resolved.root_node().unwrap();

    let inner = resolved
        .node(outer.args()[0].as_parameterized().unwrap())
        .unwrap();
    assert_eq!(inner.ty(), &fx.ty("Pair<String, Long>"));

    let list = registry.lookup_concrete_str("List").unwrap().id();
    assert_eq!(outer.args()[1], CodecRef::Concrete(list));
    assert_eq!(resolved.nodes().len(), 2);
}
