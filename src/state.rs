/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cheap to Clone: the database handle and the verifier are both reference counted
 */
use std::sync::Arc;

use mongodb::Database;

use crate::services::auth::CredentialVerifier;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub auth: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(db: Database, auth: Arc<dyn CredentialVerifier>) -> Self {
        Self { db, auth }
    }
}
