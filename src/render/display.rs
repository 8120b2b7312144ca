//! Human-readable symbolic rendering of a query document.

use crate::lexicon::Lexicon;
use crate::model::QueryDocument;

/// Render the document as one line per vertical, join and function.
///
/// ```text
/// WHERE
///   V1: ((ssn) = 1) OR ((gpa^2) < 3)
///   V2: TRUE
/// INNER JOIN V1.ssn = V2.ssn
/// Order target=V1.ssn isPercentile=true lowestFirst=false value=0
/// ```
///
/// Never fails: a vertical the lexicon no longer knows is annotated rather
/// than rejected.
pub fn to_display_expression(doc: &QueryDocument, lexicon: &Lexicon) -> String {
    let mut lines = Vec::new();

    if !doc.vertical_assignment.is_empty() {
        lines.push("WHERE".to_string());
        for (vertical, filter) in doc.vertical_assignment.iter().zip(&doc.pre_filters) {
            let note = if lexicon.contains_vertical(vertical) {
                ""
            } else {
                " (unknown vertical)"
            };
            lines.push(format!("  {}{}: {}", vertical, note, filter));
        }
    }

    lines.extend(doc.joins.iter().map(|join| join.to_string()));
    lines.push(doc.function.to_string());

    lines.join("\n")
}
