//! Lexicon types: verticals, typed columns and the fields derived from them.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LexiconError, LexiconResult};

/// Identifier of a vertical (one party's independently held table).
pub type VerticalId = String;

/// Comparison operations a column permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComparisonOp::Eq => "EQ",
            ComparisonOp::Ne => "NE",
            ComparisonOp::Lt => "LT",
            ComparisonOp::Le => "LE",
            ComparisonOp::Gt => "GT",
            ComparisonOp::Ge => "GE",
        };
        write!(f, "{}", s)
    }
}

/// Column type with its type-specific facets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnType {
    Integer {
        #[serde(default)]
        signed: bool,
        bits: u32,
    },
    Real {
        precision: u32,
        scale: u32,
    },
    /// One indicator of a categorical group; columns sharing `categorical`
    /// are mutually exclusive.
    Categorical { categorical: String },
}

impl ColumnType {
    /// Group name for categorical columns.
    pub fn categorical_group(&self) -> Option<&str> {
        match self {
            ColumnType::Categorical { categorical } => Some(categorical),
            _ => None,
        }
    }
}

/// A physical column of a vertical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(flatten)]
    pub column_type: ColumnType,
    #[serde(default)]
    pub operations: BTreeSet<ComparisonOp>,
}

impl Column {
    pub fn integer(name: &str, signed: bool, bits: u32) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Integer { signed, bits },
            operations: BTreeSet::new(),
        }
    }

    pub fn real(name: &str, precision: u32, scale: u32) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Real { precision, scale },
            operations: BTreeSet::new(),
        }
    }

    pub fn categorical(name: &str, group: &str) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::Categorical {
                categorical: group.into(),
            },
            operations: BTreeSet::new(),
        }
    }

    pub fn with_operations(mut self, ops: impl IntoIterator<Item = ComparisonOp>) -> Self {
        self.operations = ops.into_iter().collect();
        self
    }

    /// Name of the selectable field this column belongs to.
    pub fn field_name(&self) -> &str {
        self.column_type.categorical_group().unwrap_or(&self.name)
    }

    pub fn supports(&self, op: ComparisonOp) -> bool {
        self.operations.contains(&op)
    }

    /// Whether a comparison with `op` may be built on this column. A column
    /// that declares no operations is unrestricted.
    pub fn permits(&self, op: ComparisonOp) -> bool {
        self.operations.is_empty() || self.supports(op)
    }
}

/// A selectable field: a plain column, or a categorical group collapsed
/// into one entry named after the group.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<'a> {
    pub name: &'a str,
    /// Member columns in lexicon order. Never empty.
    pub columns: Vec<&'a Column>,
}

impl<'a> Field<'a> {
    pub fn is_categorical(&self) -> bool {
        self.columns
            .first()
            .is_some_and(|c| c.column_type.categorical_group().is_some())
    }

    /// The concrete column a comparison on this field is built against.
    ///
    /// Categorical groups resolve to their first member.
    pub fn resolve(&self) -> &'a Column {
        self.columns[0]
    }

    /// Whether every member column permits `op`.
    pub fn permits(&self, op: ComparisonOp) -> bool {
        self.columns.iter().all(|c| c.permits(op))
    }

    /// Operations declared by every member column.
    pub fn operations(&self) -> BTreeSet<ComparisonOp> {
        let mut iter = self.columns.iter();
        let mut ops = iter.next().map(|c| c.operations.clone()).unwrap_or_default();
        for column in iter {
            ops = ops.intersection(&column.operations).copied().collect();
        }
        ops
    }
}

/// One vertical and its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertical {
    #[serde(rename = "verticalId")]
    pub id: VerticalId,
    pub columns: Vec<Column>,
}

impl Vertical {
    pub fn new(id: &str, columns: Vec<Column>) -> Self {
        Self {
            id: id.into(),
            columns,
        }
    }

    /// Selectable fields in lexicon order.
    ///
    /// A categorical group takes the position of its first member.
    pub fn fields(&self) -> Vec<Field<'_>> {
        let mut fields: Vec<Field<'_>> = Vec::new();
        for column in &self.columns {
            let name = column.field_name();
            match fields.iter_mut().find(|f| f.name == name) {
                Some(field) if column.column_type.categorical_group().is_some() => {
                    field.columns.push(column)
                }
                Some(_) => {}
                None => fields.push(Field {
                    name,
                    columns: vec![column],
                }),
            }
        }
        fields
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields().into_iter().map(|f| f.name).collect()
    }

    /// The field new references on this vertical default to.
    pub fn first_field(&self) -> Option<&str> {
        self.columns.first().map(Column::field_name)
    }

    pub fn field(&self, name: &str) -> Option<Field<'_>> {
        self.fields().into_iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.field_name() == name)
    }

    /// Column names are unique, and no plain column is named like a
    /// categorical group.
    fn check_columns(&self) -> LexiconResult<()> {
        let mut names = HashSet::new();
        for column in &self.columns {
            if !names.insert(column.name.as_str()) {
                return Err(LexiconError::DuplicateColumn {
                    vertical: self.id.clone(),
                    column: column.name.clone(),
                });
            }
        }
        let groups: HashSet<&str> = self
            .columns
            .iter()
            .filter_map(|c| c.column_type.categorical_group())
            .collect();
        let conflict = self.columns.iter().find(|c| {
            c.column_type.categorical_group().is_none() && groups.contains(c.name.as_str())
        });
        if let Some(column) = conflict {
            return Err(LexiconError::FieldConflict {
                vertical: self.id.clone(),
                field: column.name.clone(),
            });
        }
        Ok(())
    }

    /// Resolve a field name to the column a comparison is built against.
    pub fn resolve_field(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.field_name() == name)
    }
}

/// The verticals available to a query, in service order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vertical>", into = "Vec<Vertical>")]
pub struct Lexicon {
    verticals: Vec<Vertical>,
}

impl Lexicon {
    /// Build a lexicon, rejecting empty or duplicated verticals.
    pub fn new(verticals: Vec<Vertical>) -> LexiconResult<Self> {
        if verticals.is_empty() {
            return Err(LexiconError::Empty);
        }
        let mut seen = HashSet::new();
        for vertical in &verticals {
            if vertical.columns.is_empty() {
                return Err(LexiconError::EmptyVertical(vertical.id.clone()));
            }
            if !seen.insert(vertical.id.as_str()) {
                return Err(LexiconError::DuplicateVertical(vertical.id.clone()));
            }
            vertical.check_columns()?;
        }
        Ok(Self { verticals })
    }

    /// Parse the JSON form served by the lexicon service.
    pub fn from_json_str(json: &str) -> LexiconResult<Self> {
        let verticals: Vec<Vertical> = serde_json::from_str(json)?;
        Self::new(verticals)
    }

    pub fn verticals(&self) -> &[Vertical] {
        &self.verticals
    }

    pub fn len(&self) -> usize {
        self.verticals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verticals.is_empty()
    }

    pub fn vertical(&self, id: &str) -> Option<&Vertical> {
        self.verticals.iter().find(|v| v.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.verticals.iter().position(|v| v.id == id)
    }

    pub fn contains_vertical(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// First field of the named vertical.
    pub fn first_field(&self, vertical: &str) -> Option<&str> {
        self.vertical(vertical).and_then(Vertical::first_field)
    }

    pub fn has_field(&self, vertical: &str, field: &str) -> bool {
        self.vertical(vertical).is_some_and(|v| v.has_field(field))
    }

    pub fn vertical_ids(&self) -> impl Iterator<Item = &str> {
        self.verticals.iter().map(|v| v.id.as_str())
    }
}

impl TryFrom<Vec<Vertical>> for Lexicon {
    type Error = LexiconError;

    fn try_from(verticals: Vec<Vertical>) -> Result<Self, Self::Error> {
        Lexicon::new(verticals)
    }
}

impl From<Lexicon> for Vec<Vertical> {
    fn from(lexicon: Lexicon) -> Self {
        lexicon.verticals
    }
}
