#[path = "../common/mod.rs"]
mod common;

use vertiquery::builder::{ConstraintPath, MonomialPath, OrPath, TermPath};
use vertiquery::error::BuildError;
use vertiquery::model::{ColumnRef, Comparator, Term, VerticalFilter};

#[test]
fn test_add_vertical_assigns_in_lexicon_order() {
    let lexicon = common::two_verticals();
    let doc = common::two_slots(&lexicon);

    assert_eq!(doc.vertical_assignment(), ["V1", "V2"]);
    assert_eq!(
        doc.pre_filters()[0],
        VerticalFilter::minimal(ColumnRef::new("V1", "ssn"))
    );
    assert_eq!(
        doc.pre_filters()[1],
        VerticalFilter::minimal(ColumnRef::new("V2", "ssn"))
    );
    common::assert_consistent(&doc, &lexicon);
}

#[test]
fn test_add_vertical_fills_gap_left_by_removal() {
    let lexicon = common::two_verticals();
    let doc = common::two_slots(&lexicon)
        .remove_vertical(0)
        .unwrap()
        .add_vertical(&lexicon)
        .unwrap();

    assert_eq!(doc.vertical_assignment(), ["V2", "V1"]);
    common::assert_consistent(&doc, &lexicon);
}

#[test]
fn test_add_vertical_when_all_assigned() {
    let lexicon = common::two_verticals();
    let doc = common::two_slots(&lexicon);

    assert!(!doc.can_add_vertical(&lexicon));
    assert_eq!(
        doc.add_vertical(&lexicon),
        Err(BuildError::NoVerticalAvailable { assigned: 2 })
    );
}

#[test]
fn test_remove_vertical_out_of_range() {
    let lexicon = common::two_verticals();
    let doc = common::two_slots(&lexicon);

    assert_eq!(
        doc.remove_vertical(2),
        Err(BuildError::IndexOutOfRange {
            what: "vertical",
            index: 2,
            len: 2
        })
    );
}

#[test]
fn test_reassign_vertical_resets_filter() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .add_or_clause(&lexicon, 0)
        .unwrap()
        .update_rhs(ConstraintPath::new(0, 0, 0), 7.0)
        .unwrap();

    let reassigned = doc.reassign_vertical(&lexicon, 0, "V2").unwrap();

    assert_eq!(reassigned.vertical_assignment(), ["V2"]);
    assert_eq!(
        reassigned.pre_filters()[0],
        VerticalFilter::minimal(ColumnRef::new("V2", "ssn"))
    );
    common::assert_consistent(&reassigned, &lexicon);
}

#[test]
fn test_reassign_to_same_vertical_resets_filter() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .add_or_clause(&lexicon, 0)
        .unwrap();

    let reassigned = doc.reassign_vertical(&lexicon, 0, "V1").unwrap();
    assert_eq!(reassigned.pre_filters()[0].clauses.len(), 1);
}

#[test]
fn test_reassign_to_unknown_vertical() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon).add_vertical(&lexicon).unwrap();

    assert_eq!(
        doc.reassign_vertical(&lexicon, 0, "V9"),
        Err(BuildError::UnknownVertical("V9".into()))
    );
}

#[test]
fn test_or_and_clauses_grow_with_defaults() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .add_or_clause(&lexicon, 0)
        .unwrap()
        .add_and_clause(&lexicon, OrPath::new(0, 1))
        .unwrap();

    let filter = &doc.pre_filters()[0];
    assert_eq!(filter.clauses.len(), 2);
    assert_eq!(filter.clauses[1].constraints.len(), 2);

    let added = &filter.clauses[1].constraints[1];
    assert_eq!(added.comparator, Comparator::Eq);
    assert_eq!(added.rhs, 1.0);
    assert_eq!(added.lhs[0].coefficient, 1.0);
    assert_eq!(added.lhs[0].factors, vec![Term::new(ColumnRef::new("V1", "ssn"))]);
}

#[test]
fn test_remove_or_clause_may_empty_the_filter() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .remove_or_clause(OrPath::new(0, 0))
        .unwrap();

    assert!(doc.pre_filters()[0].clauses.is_empty());
    common::assert_consistent(&doc, &lexicon);
}

#[test]
fn test_last_constraint_monomial_and_term_cannot_be_removed() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon).add_vertical(&lexicon).unwrap();

    let constraint = ConstraintPath::new(0, 0, 0);
    assert!(matches!(
        doc.remove_and_clause(constraint),
        Err(BuildError::WouldEmpty { node: "constraint", .. })
    ));
    assert!(matches!(
        doc.remove_monomial(constraint.monomial(0)),
        Err(BuildError::WouldEmpty { node: "monomial", .. })
    ));
    assert!(matches!(
        doc.remove_term(constraint.monomial(0).term(0)),
        Err(BuildError::WouldEmpty { node: "term", .. })
    ));
}

#[test]
fn test_remove_nodes_once_siblings_exist() {
    let lexicon = common::two_verticals();
    let monomial = MonomialPath::new(0, 0, 0, 0);
    let doc = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .add_and_clause(&lexicon, OrPath::new(0, 0))
        .unwrap()
        .add_monomial(&lexicon, monomial.constraint_path())
        .unwrap()
        .add_term(&lexicon, monomial)
        .unwrap()
        .update_column(&lexicon, monomial.term(1), "gpa")
        .unwrap();

    let trimmed = doc
        .remove_term(monomial.term(0))
        .unwrap()
        .remove_monomial(MonomialPath::new(0, 0, 0, 1))
        .unwrap()
        .remove_and_clause(ConstraintPath::new(0, 0, 1))
        .unwrap();

    let clause = &trimmed.pre_filters()[0].clauses[0];
    assert_eq!(clause.constraints.len(), 1);
    assert_eq!(clause.constraints[0].lhs.len(), 1);
    assert_eq!(
        clause.constraints[0].lhs[0].factors,
        vec![Term::new(ColumnRef::new("V1", "gpa"))]
    );
}

#[test]
fn test_field_updates() {
    let lexicon = common::two_verticals();
    let constraint = ConstraintPath::new(0, 0, 0);
    let term = TermPath::new(0, 0, 0, 0, 0);
    let doc = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .update_comparator(&lexicon, constraint, Comparator::Le)
        .unwrap()
        .update_rhs(constraint, 4.5)
        .unwrap()
        .update_coefficient(term.monomial_path(), -2.0)
        .unwrap()
        .update_column(&lexicon, term, "gpa")
        .unwrap()
        .update_exponent(term, 3)
        .unwrap();

    let constraint = &doc.pre_filters()[0].clauses[0].constraints[0];
    assert_eq!(constraint.comparator, Comparator::Le);
    assert_eq!(constraint.rhs, 4.5);
    assert_eq!(constraint.lhs[0].coefficient, -2.0);
    assert_eq!(constraint.lhs[0].factors[0].column, ColumnRef::new("V1", "gpa"));
    assert_eq!(constraint.lhs[0].factors[0].exponent, 3);
    common::assert_consistent(&doc, &lexicon);
}

#[test]
fn test_comparator_must_be_permitted_by_every_field() {
    let lexicon = common::two_verticals();
    let constraint = ConstraintPath::new(0, 0, 0);
    let term = constraint.monomial(0).term(0);
    let doc = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .update_column(&lexicon, term, "major")
        .unwrap();

    assert_eq!(
        doc.update_comparator(&lexicon, constraint, Comparator::Lt),
        Err(BuildError::UnsupportedComparator {
            column: "V1.major".into(),
            comparator: Comparator::Lt
        })
    );

    let ordered = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .update_comparator(&lexicon, constraint, Comparator::Lt)
        .unwrap();
    assert_eq!(
        ordered.update_column(&lexicon, term, "major"),
        Err(BuildError::UnsupportedComparator {
            column: "V1.major".into(),
            comparator: Comparator::Lt
        })
    );
    common::assert_consistent(&ordered, &lexicon);
}

#[test]
fn test_new_terms_must_permit_constraint_comparator() {
    let lexicon = common::restricted_first_field();
    let constraint = ConstraintPath::new(0, 0, 0);
    let doc = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .update_column(&lexicon, constraint.monomial(0).term(0), "gpa")
        .unwrap()
        .update_comparator(&lexicon, constraint, Comparator::Gt)
        .unwrap();

    let expected = Err(BuildError::UnsupportedComparator {
        column: "V1.major".into(),
        comparator: Comparator::Gt,
    });
    assert_eq!(doc.add_monomial(&lexicon, constraint), expected);
    assert_eq!(doc.add_term(&lexicon, constraint.monomial(0)), expected);
    assert!(doc.add_and_clause(&lexicon, OrPath::new(0, 0)).is_ok());
}

#[test]
fn test_non_finite_numbers_are_rejected() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon).add_vertical(&lexicon).unwrap();
    let constraint = ConstraintPath::new(0, 0, 0);

    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            doc.update_rhs(constraint, value),
            Err(BuildError::NonFiniteNumber { field: "rhs" })
        );
        assert_eq!(
            doc.update_coefficient(constraint.monomial(0), value),
            Err(BuildError::NonFiniteNumber {
                field: "coefficient"
            })
        );
    }
    assert!(doc.update_rhs(constraint, f64::MAX).is_ok());
}

#[test]
fn test_update_column_rejects_field_of_other_vertical() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon).add_vertical(&lexicon).unwrap();

    assert_eq!(
        doc.update_column(&lexicon, TermPath::new(0, 0, 0, 0, 0), "income"),
        Err(BuildError::UnknownField {
            vertical: "V1".into(),
            field: "income".into()
        })
    );
}

#[test]
fn test_stale_paths_report_missing_node() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon).add_vertical(&lexicon).unwrap();

    assert_eq!(
        doc.update_exponent(TermPath::new(0, 0, 0, 0, 4), 2),
        Err(BuildError::StalePath {
            path: "vertical[0].or[0].and[0].monomial[0].term[4]".into()
        })
    );
    assert_eq!(
        doc.add_term(&lexicon, MonomialPath::new(0, 0, 2, 0)),
        Err(BuildError::StalePath {
            path: "vertical[0].or[0].and[2]".into()
        })
    );
    assert_eq!(
        doc.add_and_clause(&lexicon, OrPath::new(1, 0)),
        Err(BuildError::IndexOutOfRange {
            what: "vertical",
            index: 1,
            len: 1
        })
    );
}

#[test]
fn test_failed_edit_leaves_document_unchanged() {
    let lexicon = common::two_verticals();
    let doc = common::two_slots(&lexicon);
    let before = doc.clone();

    assert!(doc.reassign_vertical(&lexicon, 0, "V2").is_err());
    assert!(doc.remove_term(TermPath::new(0, 0, 0, 0, 0)).is_err());
    assert_eq!(doc, before);
}
