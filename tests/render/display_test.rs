#[path = "../common/mod.rs"]
mod common;

use insta::assert_snapshot;
use vertiquery::builder::{ConstraintPath, MonomialPath, OrPath};
use vertiquery::lexicon::Lexicon;
use vertiquery::model::{
    ColumnChange, Comparator, FunctionKind, MomentKind, OrClause, QueryDocument,
};
use vertiquery::render::to_display_expression;

/// `V1: ((ssn) = 1) OR ((gpa^2) < 3 AND -2 * (ssn * gpa) + (gpa) >= 1)`
fn worked_example(lexicon: &Lexicon) -> QueryDocument {
    let first = ConstraintPath::new(0, 1, 0);
    let second = ConstraintPath::new(0, 1, 1);
    common::two_slots(lexicon)
        .add_or_clause(lexicon, 0)
        .unwrap()
        .update_column(lexicon, first.monomial(0).term(0), "gpa")
        .unwrap()
        .update_exponent(first.monomial(0).term(0), 2)
        .unwrap()
        .update_comparator(lexicon, first, Comparator::Lt)
        .unwrap()
        .update_rhs(first, 3.0)
        .unwrap()
        .add_and_clause(lexicon, OrPath::new(0, 1))
        .unwrap()
        .update_coefficient(second.monomial(0), -2.0)
        .unwrap()
        .add_term(lexicon, second.monomial(0))
        .unwrap()
        .update_column(lexicon, second.monomial(0).term(1), "gpa")
        .unwrap()
        .add_monomial(lexicon, second)
        .unwrap()
        .update_column(lexicon, second.monomial(1).term(0), "gpa")
        .unwrap()
        .update_comparator(lexicon, second, Comparator::Ge)
        .unwrap()
        .add_join(lexicon)
        .unwrap()
}

#[test]
fn test_display_full_document() {
    let lexicon = common::two_verticals();
    let doc = worked_example(&lexicon);

    assert_snapshot!(to_display_expression(&doc, &lexicon), @r###"
WHERE
  V1: ((ssn) = 1) OR ((gpa^2) < 3 AND -2 * (ssn * gpa) + (gpa) >= 1)
  V2: ((ssn) = 1)
INNER JOIN V1.ssn = V2.ssn
Order target=V1.ssn isPercentile=true lowestFirst=false value=0
"###);
}

#[test]
fn test_display_initial_document_has_no_where() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon);

    assert_eq!(
        to_display_expression(&doc, &lexicon),
        "Order target=V1.ssn isPercentile=true lowestFirst=false value=0"
    );
}

#[test]
fn test_display_empty_disjunction_and_conjunction() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .remove_or_clause(OrPath::new(0, 0))
        .unwrap();

    assert_eq!(
        to_display_expression(&doc, &lexicon).lines().nth(1),
        Some("  V1: TRUE")
    );
    assert_eq!(OrClause { constraints: vec![] }.to_string(), "(TRUE)");
}

#[test]
fn test_display_signs_and_unit_coefficients() {
    let lexicon = common::two_verticals();
    let constraint = ConstraintPath::new(0, 0, 0);
    let doc = common::new_document(&lexicon)
        .add_vertical(&lexicon)
        .unwrap()
        .update_coefficient(constraint.monomial(0), -1.0)
        .unwrap()
        .add_monomial(&lexicon, constraint)
        .unwrap()
        .update_coefficient(MonomialPath::new(0, 0, 0, 1), -0.5)
        .unwrap()
        .add_monomial(&lexicon, constraint)
        .unwrap()
        .update_rhs(constraint, -4.25)
        .unwrap()
        .update_comparator(&lexicon, constraint, Comparator::Ne)
        .unwrap();

    assert_eq!(
        to_display_expression(&doc, &lexicon).lines().nth(1),
        Some("  V1: (-(ssn) - 0.5 * (ssn) + (ssn) != -4.25)")
    );
}

#[test]
fn test_display_function_lines() {
    let lexicon = common::two_verticals();
    let doc = common::new_document(&lexicon);

    let moment = doc
        .set_function_kind(&lexicon, FunctionKind::Moment)
        .unwrap()
        .set_moment_kind(MomentKind::Variance)
        .unwrap()
        .set_target(&lexicon, ColumnChange::column("gpa"))
        .unwrap();
    assert_snapshot!(
        to_display_expression(&moment, &lexicon),
        @"Moment target=V1.gpa momentKind=VARIANCE"
    );

    let regression = doc
        .set_function_kind(&lexicon, FunctionKind::LinearRegression)
        .unwrap()
        .add_independent(&lexicon)
        .unwrap()
        .add_independent(&lexicon)
        .unwrap()
        .update_independent(&lexicon, 1, ColumnChange::vertical("V2"))
        .unwrap()
        .update_independent(&lexicon, 1, ColumnChange::column("income"))
        .unwrap();
    assert_snapshot!(
        to_display_expression(&regression, &lexicon),
        @"LinearRegression dependent=V1.ssn independents=[V1.ssn, V2.income]"
    );

    let empty = doc
        .set_function_kind(&lexicon, FunctionKind::TTest)
        .unwrap();
    assert_eq!(
        to_display_expression(&empty, &lexicon),
        "TTest dependent=V1.ssn independents=[]"
    );
}

#[test]
fn test_display_annotates_vertical_missing_from_lexicon() {
    let lexicon = common::two_verticals();
    let doc = common::two_slots(&lexicon);

    let shrunk = common::one_vertical();
    assert_snapshot!(to_display_expression(&doc, &shrunk), @r###"
WHERE
  V1: ((ssn) = 1)
  V2 (unknown vertical): ((ssn) = 1)
Order target=V1.ssn isPercentile=true lowestFirst=false value=0
"###);
}

#[test]
fn test_display_has_no_trailing_newline() {
    let lexicon = common::two_verticals();
    let doc = worked_example(&lexicon);

    assert!(!to_display_expression(&doc, &lexicon).ends_with('\n'));
}
