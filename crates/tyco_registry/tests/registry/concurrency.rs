//! Reads from many threads against one built registry.

use std::thread;

use tyco_registry::{CodecRef, RegistryBuilder, RegistryCell};

use crate::common::Fixture;

#[test]
fn concurrent_lookups_see_the_same_singletons() {
    let fx = Fixture::new();
    let pair = fx.generic("Pair", &["A", "B"]);
    let registry = fx.build([pair]);
    let ty = fx.ty("Pair<String, ArrayList>");
    let list = registry.lookup_concrete_str("List").unwrap();
    let (registry, ty) = (&registry, &ty);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(move || {
                    let found = registry.lookup_concrete_str("ArrayList").unwrap();
                    let resolved = registry.resolve_parameterized(ty).unwrap();
                    (found, resolved)
                })
            })
            .collect();

        for handle in handles {
            let (found, resolved) = handle.join().unwrap();
            assert!(std::ptr::eq(found, list));
            let args = resolved.root_node().unwrap().args();
            assert_eq!(args[1], CodecRef::Concrete(list.id()));
        }
    });
}

static REGISTRY: RegistryCell = RegistryCell::new();

#[test]
fn process_cell_builds_once_across_threads() {
    let fx = Fixture::new();
    let descriptor = fx.concrete("Widget");
    let (fx, descriptor) = (&fx, &descriptor);

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(move || {
                let registry = REGISTRY
                    .get_or_build(|| {
                        RegistryBuilder::new(fx.interner.clone())
                            .descriptor(descriptor.clone())
                            .build()
                    })
                    .unwrap();
                assert!(registry.lookup_concrete_str("Widget").is_some());
                assert!(registry.concrete().is_ready());
            });
        }
    });

    let first = REGISTRY.get().unwrap();
    let second = REGISTRY.get_or_build(|| unreachable!()).unwrap();
    assert!(std::ptr::eq(first, second));
}
