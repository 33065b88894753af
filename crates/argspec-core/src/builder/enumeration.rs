//! Enum arguments.
//!
//! Legal names come from the enum declaration itself through `strum`, so the
//! advertised list, the accepted set, and the error message share one
//! source.
//!
//! ```
//! use argspec_core::arg;
//!
//! #[derive(Debug, Clone, PartialEq, strum::VariantNames, strum::EnumString, strum::AsRefStr)]
//! enum Severity {
//!     ERROR,
//!     WARNING,
//!     INFO,
//! }
//!
//! let severity = arg::enumeration::<Severity>("minSeverity", "Lowest severity to report")
//!     .optional_or(Severity::WARNING);
//! assert_eq!(
//!     severity.description(),
//!     "Lowest severity to report (one of: ERROR, WARNING, INFO) (default: WARNING)"
//! );
//! ```

use std::marker::PhantomData;
use std::str::FromStr;

use serde_json::Value;
use strum::VariantNames;

use super::{lookup_str, Decoded};
use crate::arg::{Arg, SchemaType};
use crate::error::ArgError;

/// An enum usable as an argument type.
///
/// Implemented for every enum deriving `strum::VariantNames`,
/// `strum::EnumString` and `strum::AsRefStr`. Matching is exact and
/// case-sensitive against the declared names.
pub trait ArgEnum: Sized + Clone + Send + Sync + 'static {
    /// Declared names in declaration order.
    fn variant_names() -> &'static [&'static str];

    fn from_variant_name(name: &str) -> Option<Self>;

    fn variant_name(&self) -> &str;
}

impl<E> ArgEnum for E
where
    E: VariantNames + FromStr + AsRef<str> + Clone + Send + Sync + 'static,
{
    fn variant_names() -> &'static [&'static str] {
        E::VARIANTS
    }

    fn from_variant_name(name: &str) -> Option<Self> {
        // Guard against `EnumString` options such as `ascii_case_insensitive`.
        if E::VARIANTS.iter().any(|variant| *variant == name) {
            name.parse().ok()
        } else {
            None
        }
    }

    fn variant_name(&self) -> &str {
        self.as_ref()
    }
}

/// Builder for an enum argument. A blank string counts as absent.
#[must_use]
pub struct EnumArgBuilder<E> {
    key: String,
    description: String,
    _variant: PhantomData<fn() -> E>,
}

impl<E: ArgEnum> EnumArgBuilder<E> {
    pub(crate) fn new(key: String, description: String) -> Self {
        let description = format!("{description} (one of: {})", E::variant_names().join(", "));
        Self {
            key,
            description,
            _variant: PhantomData,
        }
    }

    pub fn required(self) -> Arg<E> {
        self.decoded().required()
    }

    pub fn optional(self) -> Arg<Option<E>> {
        self.decoded().optional()
    }

    pub fn optional_or(self, default: E) -> Arg<E> {
        let name = default.variant_name().to_string();
        let described = format!("{} (default: {name})", self.description);
        self.decoded()
            .optional_or(default, Value::String(name), described)
    }

    fn decoded(self) -> Decoded<E> {
        let key = self.key.clone();
        Decoded::new(self.key, self.description, SchemaType::String, move |arguments| {
            let Some(name) = lookup_str(arguments, &key)? else {
                return Ok(None);
            };
            E::from_variant_name(name)
                .map(Some)
                .ok_or_else(|| ArgError::EnumViolation {
                    key: key.clone(),
                    allowed: E::variant_names().iter().map(|n| n.to_string()).collect(),
                })
        })
    }
}
