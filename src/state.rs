use sea_orm::DatabaseConnection;

use crate::graphql::{build_schema, AppSchema};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub schema: AppSchema,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let schema = build_schema(db.clone());
        Self { db, schema }
    }
}
