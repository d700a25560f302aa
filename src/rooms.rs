//! Room occupancy lookups backing `current_room`.
//!
//! Rooms are owned by the room service; this only tracks which room, if any,
//! a user is sitting in.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::member;
use crate::error::ProfileError;
use crate::persist::require;
use crate::profile::now;

pub async fn current_room<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Option<member::Model>, ProfileError> {
    Ok(member::Entity::find()
        .filter(member::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

/// Moves the user into `room_id`, leaving whatever room they were in.
pub async fn enter_room<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    room_id: i32,
) -> Result<member::Model, ProfileError> {
    require(db, user_id).await?;

    // One row per user: entering a room overwrites the previous occupancy.
    member::Entity::insert(member::ActiveModel {
        user_id: Set(user_id),
        room_id: Set(room_id),
        joined_on: Set(now()),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::column(member::Column::UserId)
            .update_columns([member::Column::RoomId, member::Column::JoinedOn])
            .to_owned(),
    )
    .exec(db)
    .await?;

    tracing::debug!(user_id, room_id, "Entered room");
    current_room(db, user_id)
        .await?
        .ok_or_else(|| ProfileError::Conflict(format!("user {user_id} left room {room_id}")))
}

pub async fn leave_room<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<bool, ProfileError> {
    let res = member::Entity::delete_many()
        .filter(member::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}
