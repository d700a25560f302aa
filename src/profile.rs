//! The user profile record.
//!
//! `ProfileFields` holds what the owner may edit. `User` embeds it together
//! with the identity and timestamps. Relational and computed fields (follows,
//! socials, current room, counts) are not stored here; the query layer
//! resolves them per request.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::user;

pub const DEFAULT_USERNAME: &str = "Anonymous";
pub const DEFAULT_BIO: &str = "Hello Dogehouse";

/// Owner-editable profile fields. None of them is an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub username: String,
    pub avatar: String,
    pub bio: String,
}

impl Default for ProfileFields {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            avatar: String::new(),
            bio: DEFAULT_BIO.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the database on first insert, never changed afterwards.
    pub id: Option<i32>,
    #[serde(flatten)]
    pub profile: ProfileFields,
    pub created_on: NaiveDateTime,
    pub modified_on: NaiveDateTime,
}

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl User {
    pub fn new() -> Self {
        Self::with_profile(ProfileFields::default())
    }

    pub fn with_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::new()
        }
    }

    pub fn with_profile(profile: ProfileFields) -> Self {
        let ts = now();
        Self {
            id: None,
            profile,
            created_on: ts,
            modified_on: ts,
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            profile: ProfileFields {
                username: m.username,
                avatar: m.avatar,
                bio: m.bio,
            },
            created_on: m.created_on,
            modified_on: m.modified_on,
            ..Self::with_id(m.id)
        }
    }
}

/// A partial edit of [`ProfileFields`]; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl ProfileUpdate {
    pub fn apply(self, profile: &mut ProfileFields) {
        if let Some(username) = self.username {
            profile.username = username;
        }
        if let Some(avatar) = self.avatar {
            profile.avatar = avatar;
        }
        if let Some(bio) = self.bio {
            profile.bio = bio;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.avatar.is_none() && self.bio.is_none()
    }
}

/// Stamps `modified_on` right before the first write of a record.
///
/// Runs on insert only, so after creation `created_on` and `modified_on` are
/// effectively the same instant. Nothing else is touched and it cannot fail.
pub fn before_insert(user: User) -> User {
    before_insert_at(user, now())
}

pub fn before_insert_at(mut user: User, at: NaiveDateTime) -> User {
    user.modified_on = at;
    user
}
