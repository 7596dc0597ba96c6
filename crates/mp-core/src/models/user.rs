//! User profile entity and its insert/patch records.

use crate::{CoreError, CoreResult};

use serde::{Deserialize, Serialize};

/// A stored user profile.
///
/// `id` is assigned by the store on insert and never reused or mutated.
/// `gender` and `city` are free-text tokens; the matcher is the only place
/// that interprets them. `interests` keeps insertion order and duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: Vec<String>,
}

/// A user profile as submitted for creation, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: Vec<String>,
}

impl NewUser {
    /// Check the required-field rules shared by create and update:
    /// a name that is non-empty after trimming, and an email with
    /// plausible address syntax.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        validate_name(&self.name)?;
        validate_email(&self.email)
    }
}

/// A partial update. `None` means "leave the stored value untouched";
/// no User field is nullable, so null is not a representable value here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub interests: Option<Vec<String>>,
}

impl UserPatch {
    /// True when no field is supplied. Applying an empty patch is a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.email.is_none()
            && self.city.is_none()
            && self.interests.is_none()
    }

    /// Validate only the fields that are present.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }

    /// Overwrite the supplied fields on `user`, leaving the rest as-is.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(gender) = &self.gender {
            user.gender = gender.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(city) = &self.city {
            user.city = city.clone();
        }
        if let Some(interests) = &self.interests {
            user.interests = interests.clone();
        }
    }
}

#[track_caller]
fn validate_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("name cannot be empty", "name"));
    }
    Ok(())
}

/// Minimal address-shape check: a non-empty local part, one `@`, and a
/// domain containing a dot. Deliverability is out of scope.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.contains(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[track_caller]
fn validate_email(email: &str) -> CoreResult<()> {
    if !is_valid_email(email) {
        return Err(CoreError::validation(
            format!("'{}' is not a valid email address", email),
            "email",
        ));
    }
    Ok(())
}
