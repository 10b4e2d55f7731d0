//! Builder for RFC 7807 Problem Details documents
//!
//! A [`Problem`] is an open map of JSON members assembled from options:
//! - reserved members via [`type_url`], [`title`], [`status`], [`detail`],
//!   [`instance`]
//! - extension members via [`custom`]
//! - static categories via [`ProblemDef`]
//!
//! ```
//! use problemkit::{Problem, custom, detail, status, title, type_url};
//!
//! let p = Problem::new([
//!     type_url("https://x/probs/rl"),
//!     title("Too Many Requests"),
//!     status(429),
//!     detail("Retry after 30s"),
//!     custom("retry_after", 30),
//! ]);
//! assert_eq!(p.status(), Some(429));
//! ```
//!
//! Responses are written through the [`ResponseSink`] trait, so the core
//! does not depend on an HTTP framework.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod error;
pub mod option;
pub mod problem;
pub mod sink;

// Re-export commonly used types
pub use catalog::ProblemDef;
pub use error::ProblemError;
pub use option::{
    Field, FnOption, ProblemOption, custom, detail, from_fn, instance, status, title, type_url,
};
pub use problem::{APPLICATION_PROBLEM_JSON, Problem};
pub use sink::ResponseSink;
