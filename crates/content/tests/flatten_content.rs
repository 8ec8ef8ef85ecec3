use serde_json::json;

use formdeck_content::{expand_content, flatten_content, FormContent, RowValue, SchemaError};

fn content(value: serde_json::Value) -> FormContent {
    serde_json::from_value(value).expect("deserialize form content")
}

#[test]
fn select_tags_collapse_to_shorthand() {
    let doc = content(json!({
        "survey": [
            {"type": {"select_one": "dogs"}, "name": "pet"},
            {"type": {"select_multiple": "toys"}, "name": "toys"}
        ]
    }));
    let flattened = flatten_content(doc).expect("flatten");
    assert_eq!(flattened.survey[0]["type"], RowValue::Text("select_one dogs".into()));
    assert_eq!(
        flattened.survey[1]["type"],
        RowValue::Text("select_multiple toys".into())
    );
}

#[test]
fn translated_lists_emit_suffixed_and_bare_columns() {
    let doc = content(json!({
        "survey": [{"type": "text", "label": ["english", "nolang"]}],
        "translations": ["English", null]
    }));
    let flattened = flatten_content(doc).expect("flatten");
    assert_eq!(
        flattened,
        content(json!({
            "survey": [{"type": "text", "label::English": "english", "label": "nolang"}],
            "translations": ["English", null]
        }))
    );
}

#[test]
fn empty_slots_emit_no_column() {
    let doc = content(json!({
        "survey": [{"type": "text", "label": ["only english", null]}],
        "translations": ["English", "French"]
    }));
    let flattened = flatten_content(doc).expect("flatten");
    assert_eq!(flattened.survey[0].get("label::English").and_then(RowValue::as_text),
        Some("only english"));
    assert!(!flattened.survey[0].contains_key("label::French"));
}

#[test]
fn unrecognized_values_pass_through() {
    let doc = content(json!({
        "survey": [{"type": "integer", "name": "age", "required": true, "seed": 7}]
    }));
    let flattened = flatten_content(doc.clone()).expect("flatten");
    assert_eq!(flattened, doc);
}

#[test]
fn flatten_inverts_expand() {
    let doc = content(json!({
        "survey": [
            {"type": "select_one yn", "name": "q1",
             "label::En": "one", "label::Fr": "un",
             "hint::En": "pick", "hint::Fr": "choisissez"},
            {"type": "note", "name": "n1", "media::image::En": "note.jpg"}
        ],
        "choices": [
            {"list_name": "yn", "name": "y", "label::En": "yes", "label::Fr": "oui"},
            {"list_name": "yn", "name": "n", "label::En": "no", "label::Fr": "non"}
        ]
    }));
    let expanded = expand_content(doc.clone()).expect("expand");
    let mut expected = doc;
    expected.translations = Some(vec![Some("En".into()), Some("Fr".into())]);
    assert_eq!(flatten_content(expanded).expect("flatten"), expected);
}

#[test]
fn expand_inverts_flatten_of_expanded_documents() {
    let expanded = content(json!({
        "survey": [{"type": {"select_one": "yn"}, "label": ["yes/no", "oui/non"]}],
        "choices": [
            {"list_name": "yn", "name": "y", "label": ["yes", "oui"]}
        ],
        "translations": ["En", "Fr"]
    }));
    let flattened = flatten_content(expanded.clone()).expect("flatten");
    assert_eq!(expand_content(flattened).expect("expand"), expanded);
}

#[test]
fn translated_value_without_translations_is_an_error() {
    let doc = content(json!({
        "survey": [{"type": "text", "label": ["a", "b"]}]
    }));
    let error = flatten_content(doc).expect_err("no translations declared");
    assert_eq!(error, SchemaError::NoTranslations { column: "label".into() });
}

#[test]
fn translation_count_mismatch_is_an_error() {
    let doc = content(json!({
        "survey": [{"type": "text", "label": ["a", "b", "c"]}],
        "translations": ["En", "Fr"]
    }));
    let error = flatten_content(doc).expect_err("arity mismatch");
    assert_eq!(
        error,
        SchemaError::TranslationCount {
            column: "label".into(),
            expected: 2,
            actual: 3
        }
    );
}
