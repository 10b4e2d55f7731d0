//! Static problem definitions, for declaring problem categories as constants

use crate::option::{Field, detail, status, title, type_url};
use crate::problem::Problem;

/// A problem category: the members shared by every occurrence.
///
/// ```
/// use problemkit::ProblemDef;
///
/// const OUT_OF_CREDIT: ProblemDef = ProblemDef {
///     status: 403,
///     title: "You do not have enough credit.",
///     type_url: "https://example.com/probs/out-of-credit",
/// };
///
/// let p = OUT_OF_CREDIT.as_problem("Your current balance is 30, but that costs 50.");
/// assert_eq!(p.status(), Some(403));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemDef {
    pub status: u16,
    pub title: &'static str,
    pub type_url: &'static str,
}

impl ProblemDef {
    /// The `type`, `title` and `status` options of this definition.
    #[must_use]
    pub fn options(&self) -> [Field; 3] {
        [
            type_url(self.type_url),
            title(self.title),
            status(i64::from(self.status)),
        ]
    }

    /// Build a Problem for one occurrence of this category.
    #[inline]
    pub fn as_problem(&self, detail_text: impl Into<String>) -> Problem {
        let mut problem = Problem::new(self.options());
        problem.append([detail(detail_text)]);
        problem
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::option::instance;
    use serde_json::json;

    const NOT_FOUND: ProblemDef = ProblemDef {
        status: 404,
        title: "Not Found",
        type_url: "https://errors.example.com/NOT_FOUND",
    };

    #[test]
    fn def_to_problem_works() {
        let problem = NOT_FOUND.as_problem("Resource missing");

        assert_eq!(problem.status(), Some(404));
        assert_eq!(problem.get("title"), Some(&json!("Not Found")));
        assert_eq!(problem.get("detail"), Some(&json!("Resource missing")));
        assert_eq!(
            problem.get("type"),
            Some(&json!("https://errors.example.com/NOT_FOUND"))
        );
    }

    #[test]
    fn def_options_compose_with_others() {
        let mut problem = Problem::new(NOT_FOUND.options());
        problem.append([instance("/users/123"), title("Gone")]);

        assert_eq!(problem.len(), 4);
        assert_eq!(problem.get("title"), Some(&json!("Gone")));
    }
}
