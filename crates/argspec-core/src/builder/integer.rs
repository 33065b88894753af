//! Integer arguments with inclusive range refinements.
//!
//! Any JSON number is accepted and truncated toward zero; magnitudes beyond
//! `i64` saturate.

use serde_json::{Number, Value};

use super::{annotate, lookup, Decoded};
use crate::arg::{Arg, SchemaType};
use crate::error::{ArgError, ExpectedType, RangeBound};

/// Builder for an integer argument.
#[must_use]
#[derive(Debug, Clone)]
pub struct IntegerArgBuilder {
    key: String,
    description: String,
    bounds: Vec<RangeBound>,
}

impl IntegerArgBuilder {
    pub(crate) fn new(key: String, description: String) -> Self {
        Self {
            key,
            description,
            bounds: Vec::new(),
        }
    }

    /// Reject values below `min`.
    pub fn min(self, min: i64) -> Self {
        self.bound(RangeBound::AtLeast(min))
    }

    /// Reject values above `max`.
    pub fn max(self, max: i64) -> Self {
        self.bound(RangeBound::AtMost(max))
    }

    pub fn required(self) -> Arg<i64> {
        let described = annotate(&self.description, &self.constraint_notes(None));
        self.decoded(described).required()
    }

    pub fn optional(self) -> Arg<Option<i64>> {
        let described = annotate(&self.description, &self.constraint_notes(None));
        self.decoded(described).optional()
    }

    pub fn optional_or(self, default: i64) -> Arg<i64> {
        let described = annotate(&self.description, &self.constraint_notes(Some(default)));
        let plain = self.description.clone();
        self.decoded(plain)
            .optional_or(default, Value::from(default), described)
    }

    // Re-declaring a bound of the same kind replaces it where it stands.
    fn bound(mut self, bound: RangeBound) -> Self {
        let same_kind = |b: &RangeBound| std::mem::discriminant(b) == std::mem::discriminant(&bound);
        match self.bounds.iter_mut().find(|b| same_kind(b)) {
            Some(slot) => *slot = bound,
            None => self.bounds.push(bound),
        }
        self
    }

    fn constraint_notes(&self, default: Option<i64>) -> Vec<String> {
        let mut notes = Vec::with_capacity(self.bounds.len() + 1);
        if let Some(default) = default {
            notes.push(format!("default: {default}"));
        }
        notes.extend(self.bounds.iter().map(|bound| match bound {
            RangeBound::AtLeast(min) => format!("min: {min}"),
            RangeBound::AtMost(max) => format!("max: {max}"),
        }));
        notes
    }

    fn decoded(self, description: String) -> Decoded<i64> {
        let key = self.key.clone();
        let bounds = self.bounds;
        Decoded::new(self.key, description, SchemaType::Integer, move |arguments| {
            let value = match lookup(arguments, &key) {
                None => return Ok(None),
                Some(Value::Number(n)) => truncate(n),
                Some(_) => {
                    return Err(ArgError::TypeMismatch {
                        key: key.clone(),
                        expected: ExpectedType::Integer,
                    })
                }
            };
            for bound in &bounds {
                let within = match *bound {
                    RangeBound::AtLeast(min) => value >= min,
                    RangeBound::AtMost(max) => value <= max,
                };
                if !within {
                    return Err(ArgError::RangeViolation {
                        key: key.clone(),
                        bound: *bound,
                    });
                }
            }
            Ok(Some(value))
        })
    }
}

fn truncate(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        i
    } else if n.as_u64().is_some() {
        i64::MAX
    } else {
        // `as` truncates toward zero and saturates at the i64 limits.
        n.as_f64().map_or(0, |f| f as i64)
    }
}
