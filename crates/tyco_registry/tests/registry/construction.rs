//! Construction: parent linking, abstract types, duplicate handling.

use pretty_assertions::assert_eq;
use tyco_diagnostic::ErrorCode;
use tyco_registry::{
    Descriptor, DuplicatePolicy, InitState, RegistryError, RegistryWarning, ResolveError,
};

use crate::common::Fixture;

#[test]
fn parents_link_regardless_of_declaration_order() {
    let fx = Fixture::new();
    let registry = fx.build([
        fx.concrete("Circle").with_parent(fx.name("Shape")),
        fx.concrete("Shape")
            .with_abstract(true)
            .with_parent(fx.name("Entity")),
        fx.concrete("Entity").with_abstract(true),
    ]);

    let circle = registry.lookup_concrete_str("Circle").unwrap();
    let shape = registry.parent_of(circle).unwrap();
    let entity = registry.parent_of(shape).unwrap();

    assert_eq!(shape.raw_type(), fx.name("Shape"));
    assert!(shape.is_abstract());
    assert_eq!(entity.raw_type(), fx.name("Entity"));
    assert!(registry.parent_of(entity).is_none());
}

#[test]
fn abstract_types_are_not_bound() {
    let fx = Fixture::new();
    let registry = fx.build([fx.concrete("Shape").with_abstract(true)]);

    assert!(registry.lookup_concrete_str("Shape").is_none());
    assert!(registry.concrete().lookup_any(fx.name("Shape")).is_some());
}

#[test]
fn undeclared_parent_is_absent_without_failure() {
    let fx = Fixture::new();
    let registry = fx.build([fx.concrete("Loner")]);

    let loner = registry.lookup_concrete_str("Loner").unwrap();
    assert_eq!(loner.state(), InitState::ParentResolved);
    assert!(registry.parent_of(loner).is_none());
}

#[test]
fn every_codec_is_ready_after_build() {
    let fx = Fixture::new();
    let registry = fx.build([
        fx.concrete("Base").with_abstract(true),
        fx.concrete("Derived").with_parent(fx.name("Base")),
    ]);
    assert!(registry.concrete().is_ready());
}

#[test]
fn missing_parent_aborts_the_build() {
    let fx = Fixture::new();
    let err = fx
        .builder()
        .descriptor(fx.concrete("Circle").with_parent(fx.name("Shape")))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        RegistryError::MissingParent {
            child: "Circle".into(),
            parent: "Shape".into(),
        }
    );
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E1001);
    assert_eq!(diagnostic.suggestions, ["register a descriptor for `Shape`"]);
}

#[test]
fn user_descriptor_overrides_builtin() {
    let fx = Fixture::new();
    let registry = fx.build([fx.concrete("String")]);

    let string = registry.lookup_concrete_str("String").unwrap();
    let descriptor = registry.descriptor_of(string).unwrap();
    assert!(!descriptor.is_builtin());
    assert_eq!(
        descriptor.codec_symbol(&fx.interner),
        "COM_ACME_STRINGCODEC"
    );
    assert_eq!(registry.warnings().len(), 1);
    assert_eq!(
        registry.warnings()[0].to_diagnostic().code,
        ErrorCode::W1001
    );
}

#[test]
fn reject_policy_reports_the_second_registration() {
    let fx = Fixture::new();
    let err = fx
        .builder()
        .duplicate_policy(DuplicatePolicy::Reject)
        .descriptor(fx.concrete("Point"))
        .descriptor(Descriptor::user(fx.name("Point"), fx.name("org.other")))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        RegistryError::DuplicateRegistration {
            raw_type: "Point".into(),
            first: "COM_ACME_POINTCODEC".into(),
            second: "ORG_OTHER_POINTCODEC".into(),
        }
    );
}

#[test]
fn shadowed_generic_descriptor_is_unreachable() {
    let fx = Fixture::new();
    let registry = fx.build([
        fx.generic("Box", &["T"]),
        fx.generic("Box", &["K", "V"]),
    ]);

    assert_eq!(
        registry.warnings(),
        [RegistryWarning::Unreachable {
            raw_type: "Box".into(),
            arity: 2,
            reachable_arity: 1,
        }]
    );

    assert!(registry
        .resolve_parameterized(&fx.ty("Box<String>"))
        .is_ok());
    let err = registry
        .resolve_parameterized(&fx.ty("Box<String, Integer>"))
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::Arity {
            raw_type: "Box".into(),
            expected: 1,
            received: 2,
        }
    );
}

#[test]
fn shadowed_generic_descriptor_is_rejected_under_strict_policy() {
    let fx = Fixture::new();
    let err = fx
        .builder()
        .duplicate_policy(DuplicatePolicy::Reject)
        .descriptors([fx.generic("Box", &["T"]), fx.generic("Box", &["K", "V"])])
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateRegistration { .. }));
}
