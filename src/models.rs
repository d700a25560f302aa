use serde::{Deserialize, Serialize};

use crate::profile::User;

// ─── Re-export entity models used in API responses ───
pub use crate::entities::member::Model as Member;
pub use crate::entities::social_id::Model as SocialId;

// ─── API Types ───

/// A profile as seen by a particular viewer.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    pub follower_count: u64,
    pub following_count: u64,
    pub am_following: bool,
    pub current_room: Option<Member>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddSocialRequest {
    pub platform: String,
    pub external_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnterRoomRequest {
    pub room_id: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
