use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::social_id;
use crate::error::ProfileError;
use crate::persist::require;
use crate::profile::now;

const MAX_PLATFORM: usize = 32;
const MAX_EXTERNAL_ID: usize = 200;

/// Links an external platform account to a user. An external account can only
/// be linked to one user.
pub async fn add_social<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    platform: &str,
    external_id: &str,
) -> Result<social_id::Model, ProfileError> {
    let platform = platform.trim().to_lowercase();
    let external_id = external_id.trim().to_string();

    for (field, value, max) in [
        ("platform", &platform, MAX_PLATFORM),
        ("external_id", &external_id, MAX_EXTERNAL_ID),
    ] {
        let actual = value.chars().count();
        if actual > max {
            return Err(ProfileError::FieldTooLong { field, max, actual });
        }
    }

    require(db, user_id).await?;

    social_id::Entity::insert(social_id::ActiveModel {
        user_id: Set(user_id),
        platform: Set(platform.clone()),
        external_id: Set(external_id.clone()),
        created_on: Set(now()),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::columns([social_id::Column::Platform, social_id::Column::ExternalId])
            .do_nothing()
            .to_owned(),
    )
    .do_nothing()
    .exec(db)
    .await?;

    let link = social_id::Entity::find()
        .filter(social_id::Column::Platform.eq(&platform))
        .filter(social_id::Column::ExternalId.eq(&external_id))
        .one(db)
        .await?
        .ok_or_else(|| ProfileError::Conflict(format!("{platform} link removed concurrently")))?;

    if link.user_id != user_id {
        return Err(ProfileError::Conflict(format!(
            "{platform} account already linked to another user"
        )));
    }
    Ok(link)
}

pub async fn socials_of<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Vec<social_id::Model>, ProfileError> {
    Ok(social_id::Entity::find()
        .filter(social_id::Column::UserId.eq(user_id))
        .order_by_asc(social_id::Column::Id)
        .all(db)
        .await?)
}
