use axum::http::{HeaderMap, StatusCode};

use crate::error::ProfileError;

pub const VIEWER_HEADER: &str = "x-viewer-id";

/// The user a request is executed on behalf of, if any.
///
/// Session handling lives in front of this service; it forwards the
/// authenticated user id in `x-viewer-id`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewer(pub Option<i32>);

impl Viewer {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, (StatusCode, String)> {
        let Some(raw) = headers.get(VIEWER_HEADER) else {
            return Ok(Self(None));
        };
        raw.to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i32>().ok())
            .map(|id| Self(Some(id)))
            .ok_or((StatusCode::BAD_REQUEST, format!("Invalid {VIEWER_HEADER} header")))
    }

    pub fn id(&self) -> Result<i32, ProfileError> {
        self.0.ok_or(ProfileError::ViewerRequired)
    }

    /// Fails unless the viewer is `owner`.
    pub fn require_owner(&self, owner: i32) -> Result<(), ProfileError> {
        if self.id()? == owner {
            Ok(())
        } else {
            Err(ProfileError::Forbidden)
        }
    }
}
