use serde_json::json;

use formdeck_content::{special_columns, FormContent, TranslatableColumns};

fn survey_with_keys(keys: &[&str]) -> FormContent {
    let rows: Vec<serde_json::Value> = keys.iter().map(|key| json!({*key: "x"})).collect();
    serde_json::from_value(json!({"survey": rows})).expect("deserialize form content")
}

#[test]
fn inference_keeps_first_seen_order() {
    let table = TranslatableColumns::default();
    let doc: FormContent = serde_json::from_value(json!({
        "survey": [{"label::A": "A", "label::B": "B", "label::C": "C"}]
    }))
    .expect("deserialize");
    let (_, ordering) = special_columns(&doc, &table);
    assert_eq!(ordering, vec![Some("A".into()), Some("B".into()), Some("C".into())]);

    let doc: FormContent = serde_json::from_value(json!({
        "survey": [{"label::C": "C", "label::B": "B", "label::A": "A"}]
    }))
    .expect("deserialize");
    let (_, ordering) = special_columns(&doc, &table);
    assert_eq!(ordering, vec![Some("C".into()), Some("B".into()), Some("A".into())]);
}

#[test]
fn column_order_survives_a_value_round_trip() {
    let doc: FormContent = serde_json::from_value(json!({
        "survey": [{"label::C": "C", "label::B": "B", "label::A": "A"}]
    }))
    .expect("deserialize");
    let keys: Vec<&str> = doc.survey[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["label::C", "label::B", "label::A"]);

    let value = serde_json::to_value(&doc).expect("serialize");
    let doc: FormContent = serde_json::from_value(value).expect("deserialize again");
    let keys: Vec<&str> = doc.survey[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["label::C", "label::B", "label::A"]);
}

#[test]
fn separator_variants_all_classify() {
    let table = TranslatableColumns::default();
    let doc = survey_with_keys(&[
        "type",
        "media::image",
        "media::image::English",
        "label::Français",
        "label",
        "label::English",
        "media::audio::chinese",
        "label: Arabic",
        "label :: German",
        "label:English",
        "hint:English",
    ]);
    let (special, _) = special_columns(&doc, &table);

    let mut keys: Vec<&str> = special.keys().map(String::as_str).collect();
    keys.sort_unstable();
    let mut expected = vec![
        "label",
        "media::image",
        "media::image::English",
        "label::Français",
        "label::English",
        "media::audio::chinese",
        "label: Arabic",
        "label :: German",
        "label:English",
        "hint:English",
    ];
    expected.sort_unstable();
    assert_eq!(keys, expected);

    let mut languages: Vec<Option<&str>> = special
        .values()
        .map(|column| column.language.as_deref())
        .collect();
    languages.sort_unstable();
    let mut expected_languages = vec![
        Some("English"),
        Some("English"),
        Some("English"),
        Some("English"),
        Some("chinese"),
        Some("Arabic"),
        Some("German"),
        Some("Français"),
        None,
        None,
    ];
    expected_languages.sort_unstable();
    assert_eq!(languages, expected_languages);
}

#[test]
fn reserved_namespaces_never_classify() {
    let table = TranslatableColumns::default();
    let doc = survey_with_keys(&[
        "bind::orx:for",
        "bind:jr:constraintMsg",
        "bind:relevant",
        "body::accuracyThreshold",
        "body::accuracyTreshold",
        "body::acuracyThreshold",
        "body:accuracyThreshold",
    ]);
    let (special, ordering) = special_columns(&doc, &table);
    assert!(special.is_empty());
    assert!(ordering.is_empty());
}

#[test]
fn bare_base_maps_to_the_null_language() {
    let table = TranslatableColumns::default();
    let column = table.classify("label").expect("bare label");
    assert_eq!(column.base, "label");
    assert_eq!(column.language, None);

    let column = table.classify("media::image").expect("two-segment base");
    assert_eq!(column.base, "media::image");
    assert_eq!(column.language, None);

    assert!(table.classify("name").is_none());
    assert!(table.classify("labels").is_none());
}

#[test]
fn null_slot_is_inferred_only_with_a_suffixed_sibling() {
    let table = TranslatableColumns::default();

    // A lone bare column infers nothing.
    let doc = survey_with_keys(&["label"]);
    let (_, ordering) = special_columns(&doc, &table);
    assert!(ordering.is_empty());

    // Bare and suffixed on the same row claim an untranslated slot.
    let doc: FormContent = serde_json::from_value(json!({
        "survey": [{"label": "bare", "label::En": "english"}]
    }))
    .expect("deserialize");
    let (_, ordering) = special_columns(&doc, &table);
    assert_eq!(ordering, vec![None, Some("En".into())]);
}
