//! Save/load for the profile record.
//!
//! Bounds are checked here before anything reaches the database, and the
//! insert-time timestamp is applied explicitly via [`before_insert`].

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::user;
use crate::error::ProfileError;
use crate::profile::{before_insert, User};
use crate::schema::check_bounds;

#[async_trait]
pub trait Persistable: Sized {
    type Id;

    /// Inserts the record when it has no id yet, updates it otherwise.
    async fn save<C>(self, db: &C) -> Result<Self, ProfileError>
    where
        C: ConnectionTrait;

    async fn load<C>(db: &C, id: Self::Id) -> Result<Option<Self>, ProfileError>
    where
        C: ConnectionTrait;
}

#[async_trait]
impl Persistable for User {
    type Id = i32;

    async fn save<C>(self, db: &C) -> Result<Self, ProfileError>
    where
        C: ConnectionTrait,
    {
        check_bounds(&self.profile)?;

        match self.id {
            None => insert(before_insert(self), db).await,
            Some(id) => update(id, self, db).await,
        }
    }

    async fn load<C>(db: &C, id: i32) -> Result<Option<Self>, ProfileError>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find_by_id(id).one(db).await?.map(User::from))
    }
}

async fn insert<C: ConnectionTrait>(record: User, db: &C) -> Result<User, ProfileError> {
    let model = user::ActiveModel {
        username: Set(record.profile.username),
        avatar: Set(record.profile.avatar),
        bio: Set(record.profile.bio),
        created_on: Set(record.created_on),
        modified_on: Set(record.modified_on),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(user_id = model.id, "Created user {}", model.username);
    Ok(model.into())
}

// Only the profile fields change; ids and timestamps are left as stored.
async fn update<C: ConnectionTrait>(id: i32, record: User, db: &C) -> Result<User, ProfileError> {
    let existing = user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ProfileError::user_not_found(id))?;

    let mut active: user::ActiveModel = existing.into();
    active.username = Set(record.profile.username);
    active.avatar = Set(record.profile.avatar);
    active.bio = Set(record.profile.bio);

    let model = active.update(db).await?;
    tracing::debug!(user_id = model.id, "Updated profile");
    Ok(model.into())
}

/// Deletes a user. Follow edges, socials and room membership go with it.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, ProfileError> {
    let res = user::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected > 0 {
        tracing::info!(user_id = id, "Deleted user");
    }
    Ok(res.rows_affected > 0)
}

/// Loads a user or fails with `NotFound`.
pub async fn require<C: ConnectionTrait>(db: &C, id: i32) -> Result<User, ProfileError> {
    User::load(db, id)
        .await?
        .ok_or_else(|| ProfileError::user_not_found(id))
}
