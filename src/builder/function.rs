//! Query-function builder.
//!
//! Setters match on the active variant; calling one the variant has no slot
//! for yields `WrongVariant` and leaves the document unchanged.

use log::debug;

use super::finite;
use crate::error::{BuildError, BuildResult};
use crate::lexicon::Lexicon;
use crate::model::{
    ColumnChange, ColumnRef, FunctionKind, MomentKind, QueryDocument, QueryFunction,
    RegressionFunction,
};

impl QueryDocument {
    /// Replace the function with the minimal payload of `kind`.
    ///
    /// The previous payload is discarded even when `kind` is unchanged.
    pub fn set_function_kind(&self, lexicon: &Lexicon, kind: FunctionKind) -> BuildResult<Self> {
        let column = ColumnRef::lexicon_default(lexicon)?;
        let mut next = self.clone();
        next.function = QueryFunction::default_for(kind, column);
        debug!("function set to {}", kind);
        Ok(next)
    }

    /// Edit the target column of an `Order` or `Moment` function.
    pub fn set_target(&self, lexicon: &Lexicon, change: ColumnChange) -> BuildResult<Self> {
        let mut next = self.clone();
        let target = match &mut next.function {
            QueryFunction::Order(o) => &mut o.target,
            QueryFunction::Moment(m) => &mut m.target,
            other => return Err(wrong_variant(other, "target")),
        };
        target.apply(lexicon, &change)?;
        Ok(next)
    }

    pub fn set_is_percentile(&self, is_percentile: bool) -> BuildResult<Self> {
        let mut next = self.clone();
        match &mut next.function {
            QueryFunction::Order(o) => o.is_percentile = is_percentile,
            other => return Err(wrong_variant(other, "isPercentile")),
        }
        Ok(next)
    }

    pub fn set_lowest_first(&self, lowest_first: bool) -> BuildResult<Self> {
        let mut next = self.clone();
        match &mut next.function {
            QueryFunction::Order(o) => o.lowest_first = lowest_first,
            other => return Err(wrong_variant(other, "lowestFirst")),
        }
        Ok(next)
    }

    pub fn set_value(&self, value: f64) -> BuildResult<Self> {
        let value = finite("value", value)?;
        let mut next = self.clone();
        match &mut next.function {
            QueryFunction::Order(o) => o.value = value,
            other => return Err(wrong_variant(other, "value")),
        }
        Ok(next)
    }

    pub fn set_moment_kind(&self, moment_kind: MomentKind) -> BuildResult<Self> {
        let mut next = self.clone();
        match &mut next.function {
            QueryFunction::Moment(m) => m.moment_kind = moment_kind,
            other => return Err(wrong_variant(other, "momentKind")),
        }
        Ok(next)
    }

    /// Edit the dependent variable of a regression-family function.
    pub fn set_dependent(&self, lexicon: &Lexicon, change: ColumnChange) -> BuildResult<Self> {
        let mut next = self.clone();
        next.regression_mut("dependent")?
            .dependent
            .apply(lexicon, &change)?;
        Ok(next)
    }

    /// Append an independent variable on the first lexicon vertical.
    pub fn add_independent(&self, lexicon: &Lexicon) -> BuildResult<Self> {
        let column = ColumnRef::lexicon_default(lexicon)?;
        let mut next = self.clone();
        next.regression_mut("independents")?.independents.push(column);
        Ok(next)
    }

    pub fn update_independent(
        &self,
        lexicon: &Lexicon,
        index: usize,
        change: ColumnChange,
    ) -> BuildResult<Self> {
        let mut next = self.clone();
        let independents = &mut next.regression_mut("independents")?.independents;
        let len = independents.len();
        independents
            .get_mut(index)
            .ok_or(BuildError::IndexOutOfRange {
                what: "independent",
                index,
                len,
            })?
            .apply(lexicon, &change)?;
        Ok(next)
    }

    pub fn remove_independent(&self, index: usize) -> BuildResult<Self> {
        let mut next = self.clone();
        let independents = &mut next.regression_mut("independents")?.independents;
        if index >= independents.len() {
            return Err(BuildError::IndexOutOfRange {
                what: "independent",
                index,
                len: independents.len(),
            });
        }
        independents.remove(index);
        Ok(next)
    }

    fn regression_mut(&mut self, field: &'static str) -> BuildResult<&mut RegressionFunction> {
        let kind = self.function.kind();
        self.function
            .regression_mut()
            .ok_or(BuildError::WrongVariant { kind, field })
    }
}

fn wrong_variant(function: &QueryFunction, field: &'static str) -> BuildError {
    BuildError::WrongVariant {
        kind: function.kind(),
        field,
    }
}
