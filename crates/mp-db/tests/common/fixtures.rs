#![allow(dead_code)]

use mp_core::NewUser;

/// Creates a NewUser with sensible defaults and the given email
pub fn create_test_user(email: &str) -> NewUser {
    NewUser {
        name: "Test User".to_string(),
        age: 30,
        gender: "male".to_string(),
        email: email.to_string(),
        city: "Paris".to_string(),
        interests: vec!["music".to_string(), "chess".to_string()],
    }
}

/// Creates a fully specified NewUser for matching scenarios
pub fn create_profile(
    name: &str,
    age: i64,
    gender: &str,
    email: &str,
    city: &str,
    interests: &[&str],
) -> NewUser {
    NewUser {
        name: name.to_string(),
        age,
        gender: gender.to_string(),
        email: email.to_string(),
        city: city.to_string(),
        interests: interests.iter().map(|i| i.to_string()).collect(),
    }
}
