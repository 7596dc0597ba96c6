use serde::Serialize;

/// Confirmation body returned by delete endpoints instead of the entity
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
