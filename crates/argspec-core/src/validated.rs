//! # Validation Results
//!
//! [`Validated`] is the outcome of extracting one argument; [`ValidatedResult`]
//! is the outcome of combining several. Both are eliminated with `fold`,
//! which forces the caller to say what happens on the invalid branch.

use crate::error::{ArgError, ArgErrors};

/// Outcome of extracting a single argument.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(ArgError),
}

impl<T> Validated<T> {
    /// Eliminate the result by handling both branches.
    pub fn fold<R>(self, on_valid: impl FnOnce(T) -> R, on_invalid: impl FnOnce(ArgError) -> R) -> R {
        match self {
            Self::Valid(value) => on_valid(value),
            Self::Invalid(error) => on_invalid(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The error, if this result is invalid.
    pub fn error(&self) -> Option<&ArgError> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(error) => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        match self {
            Self::Valid(value) => Validated::Valid(f(value)),
            Self::Invalid(error) => Validated::Invalid(error),
        }
    }

    /// Chain a further fallible refinement onto a valid value.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Validated<U>) -> Validated<U> {
        match self {
            Self::Valid(value) => f(value),
            Self::Invalid(error) => Validated::Invalid(error),
        }
    }
}

impl<T> From<Result<T, ArgError>> for Validated<T> {
    fn from(result: Result<T, ArgError>) -> Self {
        match result {
            Ok(value) => Self::Valid(value),
            Err(error) => Self::Invalid(error),
        }
    }
}

/// Outcome of combining several [`Validated`] values.
///
/// `Failure` holds one entry per rejected argument, in declaration order,
/// and is never empty.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedResult<T> {
    Success(T),
    Failure(ArgErrors),
}

impl<T> ValidatedResult<T> {
    pub fn fold<R>(self, on_success: impl FnOnce(T) -> R, on_failure: impl FnOnce(ArgErrors) -> R) -> R {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(errors) => on_failure(errors),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn errors(&self) -> Option<&ArgErrors> {
        match self {
            Self::Success(_) => None,
            Self::Failure(errors) => Some(errors),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ValidatedResult<U> {
        match self {
            Self::Success(value) => ValidatedResult::Success(f(value)),
            Self::Failure(errors) => ValidatedResult::Failure(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid<T>(key: &str) -> Validated<T> {
        Validated::Invalid(ArgError::MissingRequired { key: key.into() })
    }

    #[test]
    fn test_fold_takes_matching_branch() {
        let valid: Validated<i64> = Validated::Valid(7);
        assert_eq!(valid.fold(|v| v * 2, |_| -1), 14);
        assert_eq!(invalid::<i64>("n").fold(|v| v * 2, |e| e.to_string().len() as i64), 13);
    }

    #[test]
    fn test_map_and_then_keep_error() {
        let mapped = invalid::<i64>("n").map(|v| v + 1);
        assert_eq!(mapped.error().map(ArgError::key), Some("n"));

        let chained = Validated::Valid(3).and_then(|v: i64| {
            if v > 2 {
                Validated::Invalid(ArgError::NotAbsolute { key: "p".into() })
            } else {
                Validated::Valid(v)
            }
        });
        assert!(!chained.is_valid());
    }

    #[test]
    fn test_from_result() {
        let ok: Validated<u8> = Ok(1).into();
        assert!(ok.is_valid());
        let err: Validated<u8> = Err(ArgError::MissingRequired { key: "k".into() }).into();
        assert_eq!(err.fold(|_| String::new(), |e| e.key().to_string()), "k");
    }

    #[test]
    fn test_result_fold_and_map() {
        let ok: ValidatedResult<&str> = ValidatedResult::Success("x");
        assert_eq!(ok.map(str::len).fold(|n| n, |_| 0), 1);

        let errors: ArgErrors = [ArgError::MissingRequired { key: "a".into() }]
            .into_iter()
            .collect();
        let failed: ValidatedResult<&str> = ValidatedResult::Failure(errors);
        assert_eq!(failed.errors().map(ArgErrors::len), Some(1));
        assert_eq!(failed.fold(|s| s.to_string(), |e| e.joined()), "a is required");
    }
}
