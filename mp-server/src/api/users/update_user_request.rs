use mp_core::UserPatch;

use serde::Deserialize;

/// Request body for updating a user. Every field is optional; an omitted
/// field keeps its stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub age: Option<i64>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
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
