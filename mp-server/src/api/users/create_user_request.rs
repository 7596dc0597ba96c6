use mp_core::NewUser;

use serde::Deserialize;

/// Request body for creating a user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub email: String,
    pub city: String,
    pub interests: Vec<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender,
            email: req.email,
            city: req.city,
            interests: req.interests,
        }
    }
}
