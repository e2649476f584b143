use pretty_assertions::assert_eq;

use super::*;

const PAIR: &str = r#"
[registry]
duplicates = "reject"
max_depth = 16

[[types]]
raw = "Shape"
owner = "com.acme"
abstract = true

[[types]]
raw = "Circle"
owner = "com.acme"
parent = "Shape"
fields = [{ name = "radius", type = "Double" }]

[[types]]
raw = "Pair"
owner = "com.acme"
params = ["A", "B"]
codec = "PairMapper"
fields = [{ name = "first", type = "A" }, { name = "second", type = "List<B>" }]
"#;

#[test]
fn parses_settings_and_entries() {
    let manifest = Manifest::parse(PAIR).unwrap();
    assert_eq!(manifest.registry.duplicates, DuplicatesSetting::Reject);
    assert_eq!(manifest.registry.max_depth, 16);
    assert_eq!(manifest.types.len(), 3);
    assert!(manifest.types[0].is_abstract);
    assert_eq!(manifest.types[1].parent.as_deref(), Some("Shape"));
    assert_eq!(manifest.types[2].fields[1].ty, "List<B>");
}

#[test]
fn empty_manifest_uses_defaults() {
    let manifest = Manifest::parse("").unwrap();
    assert_eq!(manifest, Manifest::default());
    assert_eq!(manifest.registry.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(
        DuplicatePolicy::from(manifest.registry.duplicates),
        DuplicatePolicy::LastWins
    );
}

#[test]
fn entries_become_descriptors() {
    let interner = SharedInterner::new();
    let descriptors = Manifest::parse(PAIR).unwrap().descriptors(&interner).unwrap();

    let pair = &descriptors[2];
    assert_eq!(pair.arity(), 2);
    assert_eq!(pair.codec_symbol(&interner), "COM_ACME_PAIRMAPPER");
    assert_eq!(
        pair.fields[1].ty,
        TypeRef::parse("List<B>", &interner).unwrap()
    );
    assert_eq!(descriptors[1].parent, Some(interner.intern("Shape")));
}

#[test]
fn builder_produces_a_registry() {
    let interner = SharedInterner::new();
    let registry = Manifest::parse(PAIR)
        .unwrap()
        .builder(interner)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(registry.max_resolution_depth(), 16);
    assert!(registry.lookup_concrete_str("Circle").is_some());
    assert!(registry.lookup_concrete_str("Shape").is_none());
}

#[test]
fn unknown_keys_are_rejected() {
    let err = Manifest::parse("[[types]]\nraw = \"A\"\nparms = [\"T\"]\n").unwrap_err();
    assert!(matches!(err, ManifestError::Toml(_)));
    assert_eq!(err.to_diagnostic().code, ErrorCode::E0002);
}

#[test]
fn bad_field_type_names_the_field() {
    let interner = SharedInterner::new();
    let manifest = Manifest::parse(
        "[[types]]\nraw = \"Box\"\nfields = [{ name = \"inner\", type = \"List<>\" }]\n",
    )
    .unwrap();
    let err = manifest.descriptors(&interner).unwrap_err();

    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E0001);
    assert_eq!(diagnostic.notes, ["in field `inner` of `Box`"]);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Manifest::load(Path::new("/nonexistent/tyco.toml")).unwrap_err();
    assert!(matches!(err, ManifestError::Io { .. }));
    assert_eq!(err.to_diagnostic().code, ErrorCode::E9002);
}
