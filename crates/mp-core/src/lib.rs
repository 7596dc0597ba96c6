pub mod error;
pub mod matching;
pub mod models;

pub use error::location::ErrorLocation;
pub use error::{CoreError, Result as CoreResult};
pub use matching::{AGE_WINDOW, MatchCriteria, opposite_gender, shares_interest};
pub use models::user::{NewUser, User, UserPatch};

#[cfg(test)]
mod tests;
