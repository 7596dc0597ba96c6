use mp_core::User;

use serde::Serialize;

/// User DTO for JSON serialization; the wire shape is the bare object,
/// not an envelope.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: Vec<String>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            age: u.age,
            gender: u.gender,
            email: u.email,
            city: u.city,
            interests: u.interests,
        }
    }
}
