//! Follow edges between users.
//!
//! An edge is directed: `follower_id` follows `following_id`. A user's
//! `following` list holds the edges where they are the follower, their
//! `followers` list the edges where they are followed.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TryInsertResult,
};

use crate::entities::follow;
use crate::error::ProfileError;
use crate::persist::require;
use crate::profile::now;

/// Creates the edge `follower -> following`. Following twice returns the
/// existing edge.
pub async fn follow<C: ConnectionTrait>(
    db: &C,
    follower: i32,
    following: i32,
) -> Result<follow::Model, ProfileError> {
    if follower == following {
        return Err(ProfileError::SelfFollow);
    }
    require(db, follower).await?;
    require(db, following).await?;

    // The (follower_id, following_id) unique index settles concurrent follows.
    let res = follow::Entity::insert(follow::ActiveModel {
        follower_id: Set(follower),
        following_id: Set(following),
        created_on: Set(now()),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::columns([follow::Column::FollowerId, follow::Column::FollowingId])
            .do_nothing()
            .to_owned(),
    )
    .do_nothing()
    .exec(db)
    .await?;

    if let TryInsertResult::Inserted(_) = res {
        tracing::debug!(follower, following, "Follow created");
    }

    find_edge(db, follower, following).await?.ok_or_else(|| {
        ProfileError::Conflict(format!("follow {follower} -> {following} removed concurrently"))
    })
}

/// Removes the edge `follower -> following`. Returns whether one existed.
pub async fn unfollow<C: ConnectionTrait>(
    db: &C,
    follower: i32,
    following: i32,
) -> Result<bool, ProfileError> {
    let res = follow::Entity::delete_many()
        .filter(follow::Column::FollowerId.eq(follower))
        .filter(follow::Column::FollowingId.eq(following))
        .exec(db)
        .await?;
    Ok(res.rows_affected > 0)
}

async fn find_edge<C: ConnectionTrait>(
    db: &C,
    follower: i32,
    following: i32,
) -> Result<Option<follow::Model>, ProfileError> {
    Ok(follow::Entity::find()
        .filter(follow::Column::FollowerId.eq(follower))
        .filter(follow::Column::FollowingId.eq(following))
        .one(db)
        .await?)
}

pub async fn is_following<C: ConnectionTrait>(
    db: &C,
    viewer: i32,
    target: i32,
) -> Result<bool, ProfileError> {
    Ok(find_edge(db, viewer, target).await?.is_some())
}

pub async fn follower_count<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, ProfileError> {
    Ok(follow::Entity::find()
        .filter(follow::Column::FollowingId.eq(user_id))
        .count(db)
        .await?)
}

pub async fn following_count<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, ProfileError> {
    Ok(follow::Entity::find()
        .filter(follow::Column::FollowerId.eq(user_id))
        .count(db)
        .await?)
}

/// Edges where `user_id` is the follower, newest first.
pub async fn following_of<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Vec<follow::Model>, ProfileError> {
    Ok(follow::Entity::find()
        .filter(follow::Column::FollowerId.eq(user_id))
        .order_by_desc(follow::Column::CreatedOn)
        .order_by_desc(follow::Column::Id)
        .all(db)
        .await?)
}

/// Edges where `user_id` is the one being followed, newest first.
pub async fn followers_of<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Vec<follow::Model>, ProfileError> {
    Ok(follow::Entity::find()
        .filter(follow::Column::FollowingId.eq(user_id))
        .order_by_desc(follow::Column::CreatedOn)
        .order_by_desc(follow::Column::Id)
        .all(db)
        .await?)
}
