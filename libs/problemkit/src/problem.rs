//! RFC 7807 Problem Details document, built from options

use std::collections::BTreeMap;

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ProblemError;
use crate::option::ProblemOption;

/// Content type for Problem Details as per RFC 7807.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// URI identifying the problem type.
pub const TYPE: &str = "type";
/// Short summary of the problem type.
pub const TITLE: &str = "title";
/// HTTP status code of this occurrence.
pub const STATUS: &str = "status";
/// Explanation specific to this occurrence.
pub const DETAIL: &str = "detail";
/// URI identifying this occurrence.
pub const INSTANCE: &str = "instance";

/// A Problem Details document.
///
/// Members live in an open map from name to JSON value, so extension members
/// need no schema. Keys are unique and the last write wins; key order is not
/// preserved. A `Problem` only changes through [`ProblemOption`]s, either in
/// [`Problem::new`] or [`Problem::append`].
///
/// `Problem` is `Send + Sync`. Mutation needs `&mut`, so a problem shared
/// between threads is read-only unless the caller wraps it in a lock.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Problem {
    fields: Map<String, Value>,
    /// Keys whose last write could not be encoded, with the encoder message.
    rejected: BTreeMap<String, String>,
}

impl Problem {
    /// Create a Problem and apply `options` left to right.
    ///
    /// An empty iterator yields an empty Problem, which serializes to `{}`.
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator,
        I::Item: ProblemOption,
    {
        let mut problem = Self::default();
        problem.append(options);
        problem
    }

    /// Apply more options in place and return the same Problem for chaining.
    ///
    /// Members not targeted by `options` keep their values.
    pub fn append<I>(&mut self, options: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: ProblemOption,
    {
        for option in options {
            option.apply(self);
        }
        self
    }

    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.rejected.remove(&key);
        self.fields.insert(key, value);
    }

    pub(crate) fn reject(&mut self, key: String, reason: String) {
        self.fields.remove(&key);
        self.rejected.insert(key, reason);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key) || self.rejected.contains_key(key)
    }

    /// The encodable members.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Number of members, rejected ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len() + self.rejected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `status` member when it is an integer that fits an HTTP status
    /// code slot (`u16`). Strings, floats and out-of-range integers yield `None`.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.fields
            .get(STATUS)?
            .as_u64()
            .and_then(|code| u16::try_from(code).ok())
    }

    fn rejection(&self) -> Option<ProblemError> {
        self.rejected
            .iter()
            .next()
            .map(|(key, reason)| ProblemError::Unencodable {
                key: key.clone(),
                reason: reason.clone(),
            })
    }

    /// Encode the Problem as JSON.
    ///
    /// # Errors
    /// Returns [`ProblemError::Unencodable`] when a member was set to a value
    /// that has no JSON representation, or [`ProblemError::Json`] when the
    /// encoder fails. With several rejected members only the first one in
    /// key order is named.
    pub fn to_json(&self) -> Result<Vec<u8>, ProblemError> {
        if let Some(err) = self.rejection() {
            return Err(err);
        }
        Ok(serde_json::to_vec(&self.fields)?)
    }

    /// Encode the Problem as JSON, never failing.
    ///
    /// When [`to_json`](Self::to_json) fails, a warning is logged and the
    /// encodable members are returned.
    #[must_use]
    pub fn json(&self) -> Vec<u8> {
        match self.to_json() {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "problem not fully encodable, emitting encodable members only");
                serde_json::to_vec(&self.fields).unwrap_or_else(|_| b"{}".to_vec())
            }
        }
    }

    /// Same content as [`json`](Self::json), as text.
    #[must_use]
    pub fn json_string(&self) -> String {
        String::from_utf8_lossy(&self.json()).into_owned()
    }
}

impl Serialize for Problem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Some(err) = self.rejection() {
            return Err(S::Error::custom(err));
        }
        self.fields.serialize(serializer)
    }
}
