/*
 * Responsibility
 * - Response body of GET /users/profile
 */
use serde::Serialize;

use crate::services::auth::IdentityClaim;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: IdentityClaim,
}

impl ProfileResponse {
    pub fn accessed(user: IdentityClaim) -> Self {
        Self {
            success: true,
            message: "Profile accessed successfully",
            user,
        }
    }
}
