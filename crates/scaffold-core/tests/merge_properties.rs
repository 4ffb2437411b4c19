//! Property tests for the merge pipeline.

use proptest::prelude::*;
use scaffold_core::domain::{
    Document, activate, deep_merge, feature_bundles,
    features::{CORE_SECTIONS, FEATURES_KEY},
    parse_document, render_document, safe_default,
};
use serde_yaml::{Mapping, Value};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-z]{0,8}".prop_map(Value::String),
        Just(Value::Null),
    ]
}

fn to_mapping(entries: std::collections::BTreeMap<String, Value>) -> Mapping {
    entries
        .into_iter()
        .map(|(k, v)| (Value::String(k), v))
        .collect()
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::btree_map("[a-e]", inner, 0..4)
                .prop_map(|m| Value::Mapping(to_mapping(m))),
        ]
    })
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::btree_map("[a-e]", value(), 0..5).prop_map(to_mapping)
}

fn defaults_document() -> impl Strategy<Value = Document> {
    let key = prop_oneof![
        prop::sample::select(CORE_SECTIONS.to_vec()).prop_map(str::to_owned),
        "[f-z]{1,6}",
    ];
    prop::collection::btree_map(key, value(), 0..8).prop_map(to_mapping)
}

/// Assert `merged` is exactly `base` overlaid by `overlay`.
fn assert_merged(base: &Mapping, overlay: &Mapping, merged: &Mapping) {
    for (key, base_val) in base {
        if !overlay.contains_key(key) {
            assert_eq!(merged.get(key), Some(base_val));
        }
    }
    for (key, overlay_val) in overlay {
        match (base.get(key), overlay_val) {
            (Some(Value::Mapping(b)), Value::Mapping(o)) => {
                let Some(Value::Mapping(m)) = merged.get(key) else {
                    panic!("mapping conflict on {key:?} did not recurse");
                };
                assert_merged(b, o, m);
            }
            _ => assert_eq!(merged.get(key), Some(overlay_val)),
        }
    }
    let expected_len = base.len() + overlay.keys().filter(|k| !base.contains_key(*k)).count();
    assert_eq!(merged.len(), expected_len);
}

/// Same keys at every level; no `true`, no non-empty sequence.
fn assert_inert_shape(original: &Value, inert: &Value) {
    match (original, inert) {
        (Value::Mapping(o), Value::Mapping(i)) => {
            assert!(o.keys().eq(i.keys()));
            for (k, v) in o {
                assert_inert_shape(v, &i[k]);
            }
        }
        (Value::Sequence(_), Value::Sequence(s)) => assert!(s.is_empty()),
        (Value::Bool(_), Value::Bool(b)) => assert!(!b),
        (Value::Number(_), Value::Number(n)) => assert_eq!(n.as_i64(), Some(0)),
        (Value::String(o), Value::String(i)) => assert_eq!(o, i),
        (Value::Null, Value::Null) => {}
        (o, i) => panic!("{o:?} became {i:?}"),
    }
}

proptest! {
    #[test]
    fn merge_applies_overrides_and_recurses(base in document(), overlay in document()) {
        let merged = deep_merge(&base, &overlay);
        assert_merged(&base, &overlay, &merged);
    }

    #[test]
    fn merge_leaves_inputs_untouched(base in document(), overlay in document()) {
        let (base_before, overlay_before) = (base.clone(), overlay.clone());
        let mut merged = deep_merge(&base, &overlay);
        merged.insert(Value::from("zz-added"), Value::Bool(true));
        for (_, v) in merged.iter_mut() {
            *v = Value::Null;
        }
        prop_assert_eq!(base, base_before);
        prop_assert_eq!(overlay, overlay_before);
    }

    #[test]
    fn safe_default_keeps_shape(v in value()) {
        assert_inert_shape(&v, &safe_default(&v));
    }

    #[test]
    fn bundles_are_non_core_keys_sorted(defaults in defaults_document()) {
        let bundles = feature_bundles(&defaults);
        let mut expected: Vec<String> = defaults
            .keys()
            .filter_map(Value::as_str)
            .filter(|k| !CORE_SECTIONS.contains(k))
            .map(str::to_owned)
            .collect();
        expected.sort();
        prop_assert_eq!(bundles, expected);
    }

    #[test]
    fn every_defaults_section_survives_activation(defaults in defaults_document()) {
        let merged = activate(&defaults, &Document::new());
        for key in defaults.keys() {
            prop_assert!(merged.contains_key(key));
        }
    }

    #[test]
    fn enabled_bundle_equals_its_default(defaults in defaults_document()) {
        let flags: Mapping = feature_bundles(&defaults)
            .into_iter()
            .map(|b| (Value::String(b), Value::Bool(true)))
            .collect();
        let mut project = Document::new();
        project.insert(Value::from(FEATURES_KEY), Value::Mapping(flags));

        let merged = activate(&defaults, &project);
        for bundle in feature_bundles(&defaults) {
            prop_assert_eq!(merged.get(bundle.as_str()), defaults.get(bundle.as_str()));
        }
    }

    #[test]
    fn merged_document_round_trips(defaults in defaults_document(), project in document()) {
        let merged = activate(&defaults, &project);
        let text = render_document(&merged).unwrap();
        prop_assert_eq!(parse_document(&text).unwrap(), merged);
    }
}
