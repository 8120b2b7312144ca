#[path = "../common/mod.rs"]
mod common;

use vertiquery::error::LexiconError;
use vertiquery::lexicon::{ColumnType, ComparisonOp, Lexicon};

#[test]
fn test_parse_service_payload() {
    let lexicon = Lexicon::from_json_str(common::LEXICON_JSON).unwrap();

    assert_eq!(lexicon.len(), 2);
    assert_eq!(lexicon.vertical_ids().collect::<Vec<_>>(), vec!["V1", "V2"]);

    let v1 = lexicon.vertical("V1").unwrap();
    assert_eq!(v1.field_names(), vec!["ssn", "gpa", "major"]);
    assert_eq!(
        v1.columns[0].column_type,
        ColumnType::Integer {
            signed: false,
            bits: 30
        }
    );
    assert!(v1.columns[0].supports(ComparisonOp::Lt));
    assert!(!v1.columns[1].supports(ComparisonOp::Eq));

    let v2 = lexicon.vertical("V2").unwrap();
    assert_eq!(
        v2.columns[1].column_type,
        ColumnType::Integer {
            signed: true,
            bits: 40
        }
    );
    assert!(v2.columns[0].operations.is_empty());
}

#[test]
fn test_categorical_group_is_one_field() {
    let lexicon = common::two_verticals();
    let v1 = lexicon.vertical("V1").unwrap();

    let major = v1.field("major").unwrap();
    assert!(major.is_categorical());
    assert_eq!(
        major.columns.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["math", "history", "compsci"]
    );
    assert_eq!(major.resolve().name, "math");
    assert!(lexicon.has_field("V1", "major"));
    assert!(!lexicon.has_field("V1", "math"));
}

#[test]
fn test_first_field_follows_lexicon_order() {
    let lexicon = common::two_verticals();
    assert_eq!(lexicon.first_field("V1"), Some("ssn"));
    assert_eq!(lexicon.first_field("V2"), Some("ssn"));
    assert_eq!(lexicon.first_field("V9"), None);
    assert_eq!(lexicon.position("V2"), Some(1));
}

#[test]
fn test_lexicon_serializes_back_to_service_shape() {
    let lexicon = Lexicon::from_json_str(common::LEXICON_JSON).unwrap();
    let json = serde_json::to_value(&lexicon).unwrap();

    assert_eq!(json[0]["verticalId"], "V1");
    assert_eq!(json[0]["columns"][2]["type"], "categorical");
    assert_eq!(json[0]["columns"][2]["categorical"], "major");
    assert_eq!(json[0]["columns"][0]["operations"][0], "EQ");

    let reparsed: Lexicon = serde_json::from_value(json).unwrap();
    assert_eq!(reparsed, lexicon);
}

#[test]
fn test_rejects_empty_lexicon() {
    let result = Lexicon::from_json_str("[]");
    assert!(matches!(result, Err(LexiconError::Empty)));
}

#[test]
fn test_rejects_malformed_payload() {
    let result = Lexicon::from_json_str(r#"[{"verticalId": "V1"}]"#);
    assert!(matches!(result, Err(LexiconError::Parse(_))));

    let result = Lexicon::from_json_str(
        r#"[{"verticalId": "V1", "columns": [{"name": "x", "type": "blob"}]}]"#,
    );
    assert!(matches!(result, Err(LexiconError::Parse(_))));
}

#[test]
fn test_rejects_duplicate_vertical_ids() {
    let json = r#"[
        {"verticalId": "V1", "columns": [{"name": "a", "type": "integer", "bits": 8}]},
        {"verticalId": "V1", "columns": [{"name": "b", "type": "integer", "bits": 8}]}
    ]"#;
    let result = Lexicon::from_json_str(json);
    assert!(matches!(result, Err(LexiconError::DuplicateVertical(id)) if id == "V1"));
}

#[test]
fn test_deserialize_runs_lexicon_checks() {
    let result: Result<Lexicon, _> = serde_json::from_str("[]");
    assert!(result.is_err());
}

#[test]
fn test_rejects_ambiguous_field_names() {
    let json = r#"[{"verticalId": "V1", "columns": [
        {"name": "ssn", "type": "integer", "bits": 30},
        {"name": "ssn", "type": "real", "precision": 2, "scale": 7}
    ]}]"#;
    let result = Lexicon::from_json_str(json);
    match result {
        Err(LexiconError::DuplicateColumn { vertical, column }) => {
            assert_eq!((vertical.as_str(), column.as_str()), ("V1", "ssn"));
        }
        other => panic!("expected DuplicateColumn, got {:?}", other),
    }

    let json = r#"[{"verticalId": "V1", "columns": [
        {"name": "major", "type": "integer", "bits": 8},
        {"name": "math", "type": "categorical", "categorical": "major"}
    ]}]"#;
    let err = Lexicon::from_json_str(json).unwrap_err();
    assert_eq!(
        err.to_string(),
        "vertical 'V1' uses 'major' both as a column and as a categorical group"
    );
}
