//! # Applicative Combination
//!
//! Combines several independent [`Validated`] results into one outcome that
//! carries either every decoded value or every error.
//!
//! ## Contract
//!
//! - Every argument is evaluated; nothing short-circuits across arguments.
//! - On failure the error map holds exactly one entry per rejected argument,
//!   in declaration order.
//! - The success function runs only when every argument is valid.
//!
//! The combinator is written once over tuples of arity 0 through 7:
//!
//! ```
//! use argspec_core::{arg, ArgList, Arguments};
//! use serde_json::json;
//!
//! let args = (
//!     arg::string("a", "First").required(),
//!     arg::string("b", "Second").required(),
//! );
//! let mut raw = Arguments::new();
//! raw.insert("a".into(), json!("x"));
//!
//! let outcome = args
//!     .validate(&raw)
//!     .map_n(|a, b| a + &b)
//!     .or_else_errors(|errors| format!("ERR:{}", errors.len()));
//! assert_eq!(outcome, "ERR:1");
//! ```

use crate::arg::{Arg, ArgSpec};
use crate::error::ArgErrors;
use crate::validated::{Validated, ValidatedResult};
use crate::Arguments;

/// Anything that can be viewed as an [`Arg`]; lets tuples hold either owned
/// args or references to args stored elsewhere.
pub trait AsArg {
    type Value: 'static;

    fn as_arg(&self) -> &Arg<Self::Value>;
}

impl<T: 'static> AsArg for Arg<T> {
    type Value = T;

    fn as_arg(&self) -> &Arg<T> {
        self
    }
}

impl<T: 'static> AsArg for &Arg<T> {
    type Value = T;

    fn as_arg(&self) -> &Arg<T> {
        self
    }
}

/// An ordered list of argument declarations, as a tuple.
pub trait ArgList {
    /// One `Validated` per argument, in declaration order.
    type Results;

    /// Run every extractor against `arguments`.
    fn validate(&self, arguments: &Arguments) -> Validations<Self::Results>;

    /// Schema metadata of every argument, in declaration order.
    fn specs(&self) -> Vec<&dyn ArgSpec>;
}

/// Independent per-argument results awaiting combination.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validations<V> {
    results: V,
}

impl<V> Validations<V> {
    pub fn into_inner(self) -> V {
        self.results
    }
}

/// Combine `Validated` values that were produced independently.
pub fn combine<V>(results: V) -> Validations<V> {
    Validations { results }
}

/// Outcome of [`Validations::map_n`], resolved by a two-branch terminal.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapped<R> {
    outcome: ValidatedResult<R>,
}

impl<R> Mapped<R> {
    /// The mapped value, or whatever `on_errors` makes of the error map.
    pub fn or_else_errors(self, on_errors: impl FnOnce(ArgErrors) -> R) -> R {
        self.outcome.fold(|value| value, on_errors)
    }

    pub fn into_result(self) -> ValidatedResult<R> {
        self.outcome
    }
}

impl ArgList for () {
    type Results = ();

    fn validate(&self, _arguments: &Arguments) -> Validations<()> {
        combine(())
    }

    fn specs(&self) -> Vec<&dyn ArgSpec> {
        Vec::new()
    }
}

impl Validations<()> {
    pub fn map_n<R>(self, apply: impl FnOnce() -> R) -> Mapped<R> {
        Mapped {
            outcome: ValidatedResult::Success(apply()),
        }
    }
}

macro_rules! impl_arity {
    ($($idx:tt: $t:ident $v:ident),+) => {
        impl<$($t: AsArg),+> ArgList for ($($t,)+) {
            type Results = ($(Validated< <$t as AsArg>::Value >,)+);

            fn validate(&self, arguments: &Arguments) -> Validations<Self::Results> {
                combine(($(self.$idx.as_arg().extract(arguments),)+))
            }

            fn specs(&self) -> Vec<&dyn ArgSpec> {
                vec![$(self.$idx.as_arg() as &dyn ArgSpec),+]
            }
        }

        impl<$($t),+> Validations<($(Validated<$t>,)+)> {
            /// Apply `apply` to the decoded values if every argument is valid,
            /// otherwise collect every error in declaration order.
            pub fn map_n<R>(self, apply: impl FnOnce($($t),+) -> R) -> Mapped<R> {
                let ($($v,)+) = self.results;
                let errors: ArgErrors = [$($v.error()),+]
                    .into_iter()
                    .flatten()
                    .cloned()
                    .collect();
                let outcome = match ($($v,)+) {
                    ($(Validated::Valid($v),)+) => ValidatedResult::Success(apply($($v),+)),
                    _ => ValidatedResult::Failure(errors),
                };
                Mapped { outcome }
            }
        }
    };
}

impl_arity!(0: A a);
impl_arity!(0: A a, 1: B b);
impl_arity!(0: A a, 1: B b, 2: C c);
impl_arity!(0: A a, 1: B b, 2: C c, 3: D d);
impl_arity!(0: A a, 1: B b, 2: C c, 3: D d, 4: E e);
impl_arity!(0: A a, 1: B b, 2: C c, 3: D d, 4: E e, 5: F f);
impl_arity!(0: A a, 1: B b, 2: C c, 3: D d, 4: E e, 5: F f, 6: G g);
