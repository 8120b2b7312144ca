//! Shared fixtures for integration tests.

#![allow(dead_code)]

use vertiquery::lexicon::{Column, ComparisonOp, Lexicon, Vertical};
use vertiquery::model::QueryDocument;

const ALL_OPS: [ComparisonOp; 6] = [
    ComparisonOp::Eq,
    ComparisonOp::Ne,
    ComparisonOp::Lt,
    ComparisonOp::Le,
    ComparisonOp::Gt,
    ComparisonOp::Ge,
];

/// `V1{ssn, gpa, major}` and `V2{ssn, income, debt}`.
pub fn two_verticals() -> Lexicon {
    Lexicon::new(vec![
        Vertical::new(
            "V1",
            vec![
                Column::integer("ssn", false, 30).with_operations(ALL_OPS),
                Column::real("gpa", 2, 7).with_operations(ALL_OPS),
                Column::categorical("math", "major").with_operations([ComparisonOp::Eq]),
                Column::categorical("history", "major").with_operations([ComparisonOp::Eq]),
                Column::categorical("compsci", "major").with_operations([ComparisonOp::Eq]),
            ],
        ),
        Vertical::new(
            "V2",
            vec![
                Column::integer("ssn", false, 30).with_operations(ALL_OPS),
                Column::integer("income", false, 30).with_operations(ALL_OPS),
                Column::integer("debt", false, 30).with_operations(ALL_OPS),
            ],
        ),
    ])
    .unwrap()
}

pub fn one_vertical() -> Lexicon {
    Lexicon::new(vec![Vertical::new(
        "V1",
        vec![Column::integer("ssn", false, 30), Column::real("gpa", 2, 7)],
    )])
    .unwrap()
}

/// `V1{major, gpa}` whose first field only permits `=`.
pub fn restricted_first_field() -> Lexicon {
    Lexicon::new(vec![Vertical::new(
        "V1",
        vec![
            Column::categorical("math", "major").with_operations([ComparisonOp::Eq]),
            Column::categorical("history", "major").with_operations([ComparisonOp::Eq]),
            Column::real("gpa", 2, 7).with_operations(ALL_OPS),
        ],
    )])
    .unwrap()
}

pub const LEXICON_JSON: &str = r#"[
  {
    "verticalId": "V1",
    "columns": [
      {"name": "ssn", "type": "integer", "signed": false, "bits": 30,
       "operations": ["EQ", "LT", "GT"]},
      {"name": "gpa", "type": "real", "precision": 2, "scale": 7, "operations": ["LT", "GT"]},
      {"name": "math", "type": "categorical", "categorical": "major", "operations": ["EQ"]},
      {"name": "history", "type": "categorical", "categorical": "major", "operations": ["EQ"]}
    ]
  },
  {
    "verticalId": "V2",
    "columns": [
      {"name": "ssn", "type": "integer", "bits": 30},
      {"name": "income", "type": "integer", "signed": true, "bits": 40}
    ]
  }
]"#;

pub fn new_document(lexicon: &Lexicon) -> QueryDocument {
    QueryDocument::new(lexicon).unwrap()
}

/// Document with `V1` and `V2` assigned, in that order.
pub fn two_slots(lexicon: &Lexicon) -> QueryDocument {
    new_document(lexicon)
        .add_vertical(lexicon)
        .unwrap()
        .add_vertical(lexicon)
        .unwrap()
}

/// Every column reference names a lexicon vertical and one of its fields,
/// and the slot lists line up with distinct assignments.
pub fn assert_consistent(doc: &QueryDocument, lexicon: &Lexicon) {
    assert_eq!(doc.pre_filters().len(), doc.vertical_assignment().len());
    let assignment = doc.vertical_assignment();
    for (i, a) in assignment.iter().enumerate() {
        assert!(!assignment[i + 1..].contains(a), "duplicate assignment {}", a);
    }
    for column in doc.column_refs() {
        assert!(column.is_valid_in(lexicon), "dangling reference {}", column);
    }
    assert_eq!(doc.validate(lexicon), Ok(()));
}
