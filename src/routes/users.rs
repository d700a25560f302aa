use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use sea_orm::DatabaseConnection;

use crate::error::ProfileError;
use crate::follows;
use crate::models::{AddSocialRequest, EnterRoomRequest, Member, SocialId, UserView};
use crate::persist::{self, require, Persistable};
use crate::profile::{ProfileUpdate, User};
use crate::rooms;
use crate::socials;
use crate::state::AppState;
use crate::viewer::Viewer;

async fn build_view(
    db: &DatabaseConnection,
    user: User,
    viewer: Viewer,
) -> Result<UserView, ProfileError> {
    let id = user.id.ok_or(ProfileError::NotFound("Unsaved user".into()))?;

    let am_following = match viewer.0 {
        Some(v) => follows::is_following(db, v, id).await?,
        None => false,
    };

    Ok(UserView {
        follower_count: follows::follower_count(db, id).await?,
        following_count: follows::following_count(db, id).await?,
        am_following,
        current_room: rooms::current_room(db, id).await?,
        user,
    })
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<ProfileUpdate>,
) -> Result<(StatusCode, Json<UserView>), (StatusCode, String)> {
    let mut user = User::new();
    req.apply(&mut user.profile);
    let user = user.save(&state.db).await?;

    let view = build_view(&state.db, user, Viewer::default()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<Json<UserView>, (StatusCode, String)> {
    let viewer = Viewer::from_headers(&headers)?;
    let user = require(&state.db, id).await?;
    Ok(Json(build_view(&state.db, user, viewer).await?))
}

pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(req): Json<ProfileUpdate>,
) -> Result<Json<UserView>, (StatusCode, String)> {
    let viewer = Viewer::from_headers(&headers)?;
    viewer.require_owner(id)?;

    if req.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Nothing to update".into()));
    }

    let mut user = require(&state.db, id).await?;
    req.apply(&mut user.profile);
    let user = user.save(&state.db).await?;

    Ok(Json(build_view(&state.db, user, viewer).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<StatusCode, (StatusCode, String)> {
    let viewer = Viewer::from_headers(&headers)?;
    viewer.require_owner(id)?;

    if persist::delete(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ProfileError::user_not_found(id).into())
    }
}

pub async fn list_socials(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<SocialId>>, (StatusCode, String)> {
    require(&state.db, id).await?;
    Ok(Json(socials::socials_of(&state.db, id).await?))
}

pub async fn add_social(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(req): Json<AddSocialRequest>,
) -> Result<(StatusCode, Json<SocialId>), (StatusCode, String)> {
    let viewer = Viewer::from_headers(&headers)?;
    viewer.require_owner(id)?;

    if req.platform.trim().is_empty() || req.external_id.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Platform and external id are required".into()));
    }

    let link = socials::add_social(&state.db, id, &req.platform, &req.external_id).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

pub async fn enter_room(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(req): Json<EnterRoomRequest>,
) -> Result<Json<Member>, (StatusCode, String)> {
    let viewer = Viewer::from_headers(&headers)?;
    viewer.require_owner(id)?;
    Ok(Json(rooms::enter_room(&state.db, id, req.room_id).await?))
}

pub async fn leave_room(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<StatusCode, (StatusCode, String)> {
    let viewer = Viewer::from_headers(&headers)?;
    viewer.require_owner(id)?;
    rooms::leave_room(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
