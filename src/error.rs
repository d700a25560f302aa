use axum::http::StatusCode;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("{field} must be at most {max} characters (got {actual})")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("A user cannot follow themselves")]
    SelfFollow,

    #[error("{0}")]
    Conflict(String),

    #[error("This operation requires a viewer")]
    ViewerRequired,

    #[error("Only the owner can change this profile")]
    Forbidden,

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("DB error: {0}")]
    Db(#[from] DbErr),
}

impl ProfileError {
    pub fn user_not_found(id: i32) -> Self {
        Self::NotFound(format!("User {id}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::FieldTooLong { .. } | Self::SelfFollow => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ViewerRequired => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::SchemaMismatch(_) | Self::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Route handlers report errors as `(StatusCode, String)`.
impl From<ProfileError> for (StatusCode, String) {
    fn from(e: ProfileError) -> Self {
        if let ProfileError::Db(db) = &e {
            tracing::error!("Database error: {db}");
        }
        (e.status(), e.to_string())
    }
}
