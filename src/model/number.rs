//! Numeric wire format.
//!
//! Integral values are written as JSON integers (`1`, not `1.0`). Anything
//! else, or anything too large to be exact as an integer, goes through as a
//! float. Reading accepts either form.

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// Largest magnitude below which every integral `f64` is exact.
const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

struct Number(f64);

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.fract() == 0.0 && value.abs() < EXACT_LIMIT {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

pub(crate) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    Number(*value).serialize(serializer)
}

pub(crate) fn serialize_pair<S: Serializer>(
    value: &(f64, f64),
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut tuple = serializer.serialize_tuple(2)?;
    tuple.serialize_element(&Number(value.0))?;
    tuple.serialize_element(&Number(value.1))?;
    tuple.end()
}
