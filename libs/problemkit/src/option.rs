//! Options: deferred, reusable mutations that each set one member of a [`Problem`]
//!
//! Every named constructor in this module returns a [`Field`]. Options are
//! applied in order and never interact; a later option targeting the same
//! key replaces the earlier value.

use serde::Serialize;
use serde_json::Value;

use crate::problem::{DETAIL, INSTANCE, Problem, STATUS, TITLE, TYPE};

/// A unit of change that can be applied to a [`Problem`].
///
/// Applying takes `&self`, so one option value may be applied to any number
/// of problems.
pub trait ProblemOption {
    fn apply(&self, problem: &mut Problem);
}

/// Assigns one key of a [`Problem`].
///
/// The value is converted to JSON when the option is built. A value that
/// cannot be represented as JSON is remembered as rejected and reported by
/// [`Problem::to_json`] once applied.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Field {
    key: String,
    value: Result<Value, String>,
}

impl Field {
    fn json(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value: Ok(value),
        }
    }

    /// The member name this option assigns.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The JSON value, or `None` when the value could not be encoded.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref().ok()
    }
}

impl ProblemOption for Field {
    fn apply(&self, problem: &mut Problem) {
        match &self.value {
            Ok(value) => problem.insert(self.key.clone(), value.clone()),
            Err(reason) => problem.reject(self.key.clone(), reason.clone()),
        }
    }
}

impl<O: ProblemOption> ProblemOption for Option<O> {
    fn apply(&self, problem: &mut Problem) {
        if let Some(option) = self {
            option.apply(problem);
        }
    }
}

impl<O: ProblemOption + ?Sized> ProblemOption for &O {
    fn apply(&self, problem: &mut Problem) {
        (**self).apply(problem);
    }
}

impl<O: ProblemOption + ?Sized> ProblemOption for Box<O> {
    fn apply(&self, problem: &mut Problem) {
        (**self).apply(problem);
    }
}

impl<O: ProblemOption> ProblemOption for Vec<O> {
    fn apply(&self, problem: &mut Problem) {
        for option in self {
            option.apply(problem);
        }
    }
}

/// Option backed by a closure, see [`from_fn`].
#[derive(Clone)]
#[must_use]
pub struct FnOption<F>(F);

impl<F> std::fmt::Debug for FnOption<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOption").finish_non_exhaustive()
    }
}

impl<F: Fn(&mut Problem)> ProblemOption for FnOption<F> {
    fn apply(&self, problem: &mut Problem) {
        (self.0)(problem);
    }
}

/// Wraps a closure as an option, for grouping several options under one name.
///
/// ```
/// use problemkit::{Problem, ProblemOption, from_fn, status, title};
///
/// let not_found = from_fn(|p: &mut Problem| {
///     status(404).apply(p);
///     title("Not Found").apply(p);
/// });
/// let p = Problem::new([not_found]);
/// assert_eq!(p.status(), Some(404));
/// ```
pub fn from_fn<F: Fn(&mut Problem)>(f: F) -> FnOption<F> {
    FnOption(f)
}

/// Sets `type`, the URI identifying the problem category. Not validated.
pub fn type_url(uri: impl Into<String>) -> Field {
    Field::json(TYPE, Value::String(uri.into()))
}

/// Sets `title`, a short summary that stays the same for every occurrence
/// of the problem type, e.g. `Service Unavailable`.
pub fn title(title: impl Into<String>) -> Field {
    Field::json(TITLE, Value::String(title.into()))
}

/// Sets `status`, the HTTP status code of this occurrence.
///
/// Any integer is accepted; only values that fit a `u16` are applied to a
/// response by [`Problem::write_to`].
pub fn status(status: i64) -> Field {
    Field::json(STATUS, Value::from(status))
}

/// Sets `detail`, the explanation specific to this occurrence.
pub fn detail(detail: impl Into<String>) -> Field {
    Field::json(DETAIL, Value::String(detail.into()))
}

/// Sets `instance`, the URI identifying this occurrence. Not validated.
pub fn instance(uri: impl Into<String>) -> Field {
    Field::json(INSTANCE, Value::String(uri.into()))
}

/// Sets an extension member.
///
/// Reserved keys are not protected: `custom("status", "x")` replaces any
/// `status` set before it.
pub fn custom(key: impl Into<String>, value: impl Serialize) -> Field {
    let key = key.into();
    match serde_json::to_value(value) {
        Ok(value) => Field::json(key, value),
        Err(err) => {
            tracing::debug!(key = %key, error = %err, "custom problem member is not encodable");
            Field {
                key,
                value: Err(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn named_constructors_target_reserved_keys() {
        let cases = [
            (type_url("https://x/probs/rl"), "type", json!("https://x/probs/rl")),
            (title("Too Many Requests"), "title", json!("Too Many Requests")),
            (status(429), "status", json!(429)),
            (detail("Retry after 30s"), "detail", json!("Retry after 30s")),
            (instance("/req/1"), "instance", json!("/req/1")),
        ];

        for (option, key, value) in cases {
            assert_eq!(option.key(), key);
            assert_eq!(option.value(), Some(&value));
        }
    }

    #[test]
    fn status_accepts_out_of_range_values() {
        assert_eq!(status(-1).value(), Some(&json!(-1)));
        assert_eq!(status(70_000).value(), Some(&json!(70_000)));
    }

    #[test]
    fn custom_keeps_value_shape() {
        let option = custom("balance", json!({"amount": 30, "currency": "EUR"}));
        assert_eq!(option.key(), "balance");
        assert_eq!(
            option.value(),
            Some(&json!({"amount": 30, "currency": "EUR"}))
        );
    }

    #[test]
    fn custom_records_unencodable_value() {
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple keys are not JSON object keys");

        let option = custom("bad", bad);
        assert_eq!(option.key(), "bad");
        assert!(option.value().is_none());
    }

    #[test]
    fn options_are_reusable() {
        let option = detail("shared");
        let a = Problem::new([&option]);
        let b = Problem::new([&option]);
        assert_eq!(a.get("detail"), b.get("detail"));
    }

    #[test]
    fn none_option_is_skipped() {
        let request_id: Option<&str> = None;
        let p = Problem::new([Some(title("t")), request_id.map(instance)]);
        assert_eq!(p.len(), 1);
        assert!(!p.contains_key("instance"));
    }

    #[test]
    fn boxed_options_mix_kinds() {
        let options: Vec<Box<dyn ProblemOption>> = vec![
            Box::new(status(400)),
            Box::new(from_fn(|p: &mut Problem| {
                title("Bad Request").apply(p);
            })),
            Box::new(vec![detail("a"), detail("b")]),
        ];

        let p = Problem::new(options);
        assert_eq!(p.get("status"), Some(&json!(400)));
        assert_eq!(p.get("title"), Some(&json!("Bad Request")));
        assert_eq!(p.get("detail"), Some(&json!("b")));
    }
}
