//! The terminal statistical operation of a query.
//!
//! Functions are declared here, never computed.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ColumnRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MomentKind {
    #[default]
    Count,
    Sum,
    Mean,
    Variance,
    Skew,
    Kurtosis,
}

impl fmt::Display for MomentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MomentKind::Count => "COUNT",
            MomentKind::Sum => "SUM",
            MomentKind::Mean => "MEAN",
            MomentKind::Variance => "VARIANCE",
            MomentKind::Skew => "SKEW",
            MomentKind::Kurtosis => "KURTOSIS",
        };
        write!(f, "{}", s)
    }
}

/// Tag of a [`QueryFunction`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    Order,
    Moment,
    LinearRegression,
    FTest,
    TTest,
}

impl FunctionKind {
    pub const ALL: [FunctionKind; 5] = [
        FunctionKind::Order,
        FunctionKind::Moment,
        FunctionKind::LinearRegression,
        FunctionKind::FTest,
        FunctionKind::TTest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionKind::Order => "Order",
            FunctionKind::Moment => "Moment",
            FunctionKind::LinearRegression => "LinearRegression",
            FunctionKind::FTest => "FTest",
            FunctionKind::TTest => "TTest",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rank or percentile lookup on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFunction {
    pub target: ColumnRef,
    pub is_percentile: bool,
    pub lowest_first: bool,
    #[serde(serialize_with = "super::number::serialize")]
    pub value: f64,
}

impl OrderFunction {
    pub fn new(target: ColumnRef) -> Self {
        Self {
            target,
            is_percentile: true,
            lowest_first: false,
            value: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MomentFunction {
    pub target: ColumnRef,
    pub moment_kind: MomentKind,
}

/// Payload shared by linear regression, F-test and T-test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionFunction {
    pub dependent: ColumnRef,
    /// May be empty; executing such a query is the executor's concern.
    pub independents: Vec<ColumnRef>,
}

impl RegressionFunction {
    pub fn new(dependent: ColumnRef) -> Self {
        Self {
            dependent,
            independents: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum QueryFunction {
    Order(OrderFunction),
    Moment(MomentFunction),
    LinearRegression(RegressionFunction),
    FTest(RegressionFunction),
    TTest(RegressionFunction),
}

impl QueryFunction {
    /// Minimal valid payload of `kind` anchored on `column`.
    pub fn default_for(kind: FunctionKind, column: ColumnRef) -> Self {
        match kind {
            FunctionKind::Order => QueryFunction::Order(OrderFunction::new(column)),
            FunctionKind::Moment => QueryFunction::Moment(MomentFunction {
                target: column,
                moment_kind: MomentKind::Count,
            }),
            FunctionKind::LinearRegression => {
                QueryFunction::LinearRegression(RegressionFunction::new(column))
            }
            FunctionKind::FTest => QueryFunction::FTest(RegressionFunction::new(column)),
            FunctionKind::TTest => QueryFunction::TTest(RegressionFunction::new(column)),
        }
    }

    pub fn kind(&self) -> FunctionKind {
        match self {
            QueryFunction::Order(_) => FunctionKind::Order,
            QueryFunction::Moment(_) => FunctionKind::Moment,
            QueryFunction::LinearRegression(_) => FunctionKind::LinearRegression,
            QueryFunction::FTest(_) => FunctionKind::FTest,
            QueryFunction::TTest(_) => FunctionKind::TTest,
        }
    }

    /// Regression-family payload, if this is one.
    pub fn regression(&self) -> Option<&RegressionFunction> {
        match self {
            QueryFunction::LinearRegression(r)
            | QueryFunction::FTest(r)
            | QueryFunction::TTest(r) => Some(r),
            QueryFunction::Order(_) | QueryFunction::Moment(_) => None,
        }
    }

    pub(crate) fn regression_mut(&mut self) -> Option<&mut RegressionFunction> {
        match self {
            QueryFunction::LinearRegression(r)
            | QueryFunction::FTest(r)
            | QueryFunction::TTest(r) => Some(r),
            QueryFunction::Order(_) | QueryFunction::Moment(_) => None,
        }
    }

    /// Every column reference in the payload, in display order.
    pub fn column_refs(&self) -> Vec<&ColumnRef> {
        match self {
            QueryFunction::Order(o) => vec![&o.target],
            QueryFunction::Moment(m) => vec![&m.target],
            QueryFunction::LinearRegression(r)
            | QueryFunction::FTest(r)
            | QueryFunction::TTest(r) => {
                std::iter::once(&r.dependent).chain(&r.independents).collect()
            }
        }
    }
}

impl fmt::Display for QueryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        match self {
            QueryFunction::Order(o) => write!(
                f,
                " target={} isPercentile={} lowestFirst={} value={}",
                o.target, o.is_percentile, o.lowest_first, o.value
            ),
            QueryFunction::Moment(m) => {
                write!(f, " target={} momentKind={}", m.target, m.moment_kind)
            }
            QueryFunction::LinearRegression(r)
            | QueryFunction::FTest(r)
            | QueryFunction::TTest(r) => {
                let independents = r
                    .independents
                    .iter()
                    .map(ColumnRef::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, " dependent={} independents=[{}]", r.dependent, independents)
            }
        }
    }
}
