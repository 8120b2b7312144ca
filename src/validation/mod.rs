//! Validation of query documents against a lexicon.
//!
//! Documents produced by the builders are valid by construction. This check
//! is for documents arriving from elsewhere (a stored canonical payload) or
//! for re-checking a document after the lexicon has been replaced.

use std::collections::HashMap;

use crate::lexicon::Lexicon;
use crate::model::{ColumnRef, Comparator, VerticalFilter};
use crate::render::CanonicalQuery;

/// Validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Prefilter and assignment lists differ in length.
    LengthMismatch { pre_filters: usize, assignments: usize },
    /// A vertical is assigned to more than one prefilter slot.
    DuplicateAssignment {
        vertical: String,
        first: usize,
        second: usize,
    },
    /// Reference to a vertical the lexicon does not list.
    UnknownVertical { location: String, vertical: String },
    /// Reference to a field the vertical does not offer.
    UnknownField {
        location: String,
        vertical: String,
        field: String,
    },
    /// A prefilter term references a vertical other than its slot's.
    ForeignColumn {
        location: String,
        expected: String,
        found: String,
    },
    /// A list that must be non-empty is empty.
    EmptyNode { location: String, node: String },
    /// The field's permitted operations do not include the comparator.
    UnsupportedComparator {
        location: String,
        column: String,
        comparator: Comparator,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::LengthMismatch {
                pre_filters,
                assignments,
            } => {
                write!(
                    f,
                    "{} prefilters but {} vertical assignments",
                    pre_filters, assignments
                )
            }
            ValidationError::DuplicateAssignment {
                vertical,
                first,
                second,
            } => {
                write!(
                    f,
                    "vertical '{}' assigned at both {} and {}",
                    vertical, first, second
                )
            }
            ValidationError::UnknownVertical { location, vertical } => {
                write!(f, "{} references unknown vertical '{}'", location, vertical)
            }
            ValidationError::UnknownField {
                location,
                vertical,
                field,
            } => {
                write!(
                    f,
                    "{} references undefined field '{}' of vertical '{}'",
                    location, field, vertical
                )
            }
            ValidationError::ForeignColumn {
                location,
                expected,
                found,
            } => {
                write!(
                    f,
                    "{} references vertical '{}' inside the prefilter of '{}'",
                    location, found, expected
                )
            }
            ValidationError::EmptyNode { location, node } => {
                write!(f, "{} has an empty {}", location, node)
            }
            ValidationError::UnsupportedComparator {
                location,
                column,
                comparator,
            } => {
                write!(
                    f,
                    "{} compares {} with '{}', which the field does not permit",
                    location, column, comparator
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a query against a lexicon, reporting every violation.
pub fn validate(query: &CanonicalQuery, lexicon: &Lexicon) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Validate slot alignment and uniqueness
    validate_assignment(query, lexicon, &mut errors);

    // Validate prefilter trees
    validate_pre_filters(query, lexicon, &mut errors);

    // Validate joins
    validate_joins(query, lexicon, &mut errors);

    // Validate the query function
    validate_function(query, lexicon, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_assignment(
    query: &CanonicalQuery,
    lexicon: &Lexicon,
    errors: &mut Vec<ValidationError>,
) {
    if query.pre_filters.len() != query.vertical_assignment.len() {
        errors.push(ValidationError::LengthMismatch {
            pre_filters: query.pre_filters.len(),
            assignments: query.vertical_assignment.len(),
        });
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, vertical) in query.vertical_assignment.iter().enumerate() {
        if let Some(&first) = seen.get(vertical.as_str()) {
            errors.push(ValidationError::DuplicateAssignment {
                vertical: vertical.clone(),
                first,
                second: index,
            });
        } else {
            seen.insert(vertical, index);
        }

        if !lexicon.contains_vertical(vertical) {
            errors.push(ValidationError::UnknownVertical {
                location: format!("verticalAssignment[{}]", index),
                vertical: vertical.clone(),
            });
        }
    }
}

fn validate_pre_filters(
    query: &CanonicalQuery,
    lexicon: &Lexicon,
    errors: &mut Vec<ValidationError>,
) {
    for (index, (vertical, filter)) in query
        .vertical_assignment
        .iter()
        .zip(&query.pre_filters)
        .enumerate()
    {
        validate_filter(index, vertical, filter, lexicon, errors);
    }
}

fn validate_filter(
    index: usize,
    vertical: &str,
    filter: &VerticalFilter,
    lexicon: &Lexicon,
    errors: &mut Vec<ValidationError>,
) {
    // An empty disjunction is allowed: it means "no constraint"
    for (o, clause) in filter.clauses.iter().enumerate() {
        let or_location = format!("preFilters[{}][{}]", index, o);
        if clause.constraints.is_empty() {
            errors.push(ValidationError::EmptyNode {
                location: or_location.clone(),
                node: "conjunction".to_string(),
            });
        }

        for (a, constraint) in clause.constraints.iter().enumerate() {
            let and_location = format!("{}[{}]", or_location, a);
            if constraint.lhs.is_empty() {
                errors.push(ValidationError::EmptyNode {
                    location: and_location.clone(),
                    node: "lhs".to_string(),
                });
            }

            for (m, monomial) in constraint.lhs.iter().enumerate() {
                let monomial_location = format!("{}.lhs[{}]", and_location, m);
                if monomial.factors.is_empty() {
                    errors.push(ValidationError::EmptyNode {
                        location: monomial_location.clone(),
                        node: "factor list".to_string(),
                    });
                }

                for (t, term) in monomial.factors.iter().enumerate() {
                    let location = format!("{}.factors[{}]", monomial_location, t);
                    if term.column.vertical != vertical {
                        errors.push(ValidationError::ForeignColumn {
                            location: location.clone(),
                            expected: vertical.to_string(),
                            found: term.column.vertical.clone(),
                        });
                    }
                    validate_column_ref(&location, &term.column, lexicon, errors);
                    if term.column.is_valid_in(lexicon)
                        && !term.column.permits(lexicon, constraint.comparator)
                    {
                        errors.push(ValidationError::UnsupportedComparator {
                            location,
                            column: term.column.to_string(),
                            comparator: constraint.comparator,
                        });
                    }
                }
            }
        }
    }
}

fn validate_joins(query: &CanonicalQuery, lexicon: &Lexicon, errors: &mut Vec<ValidationError>) {
    for (j, join) in query.joins.iter().enumerate() {
        if join.predicates.is_empty() {
            errors.push(ValidationError::EmptyNode {
                location: format!("joins[{}]", j),
                node: "predicate list".to_string(),
            });
        }
        for (p, predicate) in join.predicates.iter().enumerate() {
            let location = format!("joins[{}].predicates[{}]", j, p);
            let left = format!("{}.left", location);
            validate_column_ref(&left, &predicate.left.column, lexicon, errors);
            let right = format!("{}.right", location);
            validate_column_ref(&right, &predicate.right.column, lexicon, errors);
        }
    }
}

fn validate_function(
    query: &CanonicalQuery,
    lexicon: &Lexicon,
    errors: &mut Vec<ValidationError>,
) {
    for (i, column) in query.function.column_refs().into_iter().enumerate() {
        let location = format!("function({}) column {}", query.function.kind(), i);
        validate_column_ref(&location, column, lexicon, errors);
    }
}

fn validate_column_ref(
    location: &str,
    column: &ColumnRef,
    lexicon: &Lexicon,
    errors: &mut Vec<ValidationError>,
) {
    match lexicon.vertical(&column.vertical) {
        None => errors.push(ValidationError::UnknownVertical {
            location: location.to_string(),
            vertical: column.vertical.clone(),
        }),
        Some(vertical) if !vertical.has_field(&column.column) => {
            errors.push(ValidationError::UnknownField {
                location: location.to_string(),
                vertical: column.vertical.clone(),
                field: column.column.clone(),
            })
        }
        Some(_) => {}
    }
}
