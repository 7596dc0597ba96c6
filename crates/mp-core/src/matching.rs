//! Match-candidate predicates.
//!
//! The matching contract for a subject user is: candidates must declare the
//! opposite gender, live in the same city (exact comparison), be within
//! [`AGE_WINDOW`] years of the subject's age inclusive, and share at least
//! one interest with the subject (exact string comparison). The first three
//! predicates are pushed down to the store as [`MatchCriteria`]; the
//! interest intersection runs in memory over the candidate set.

use crate::User;

/// Half-width of the inclusive age window around the subject's age.
pub const AGE_WINDOW: i64 = 5;

/// The gender a candidate must declare for a subject declaring `gender`.
///
/// "male" (compared case-insensitively) maps to "female"; every other
/// value, including tokens that are neither literal, maps to "male". This
/// two-category rule is definitional, not a validation concern, and
/// unexpected inputs are not special-cased further.
pub fn opposite_gender(gender: &str) -> &'static str {
    if gender.eq_ignore_ascii_case("male") {
        "female"
    } else {
        "male"
    }
}

/// Store-side candidate filter derived from a subject user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriteria {
    /// The subject itself is never a candidate.
    pub exclude_id: i64,
    /// Candidate city must equal this exactly (case-sensitive).
    pub city: String,
    /// Inclusive lower age bound, plain arithmetic, no clamping.
    pub min_age: i64,
    /// Inclusive upper age bound.
    pub max_age: i64,
    /// Candidate gender must equal this case-insensitively.
    pub gender: String,
}

impl MatchCriteria {
    pub fn for_subject(subject: &User) -> Self {
        Self {
            exclude_id: subject.id,
            city: subject.city.clone(),
            min_age: subject.age - AGE_WINDOW,
            max_age: subject.age + AGE_WINDOW,
            gender: opposite_gender(&subject.gender).to_string(),
        }
    }
}

/// True when the candidate shares at least one interest with the subject.
///
/// Comparison is exact string equality: no trimming, no case folding, and
/// duplicate entries carry no extra weight.
pub fn shares_interest(subject: &[String], candidate: &[String]) -> bool {
    candidate
        .iter()
        .any(|interest| subject.contains(interest))
}
