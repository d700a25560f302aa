use async_graphql::{Context, ErrorExtensions, Object, Result};
use sea_orm::DatabaseConnection;

use crate::entities::{follow, member};
use crate::follows;
use crate::profile::User;
use crate::rooms;
use crate::viewer::Viewer;

/// GraphQL view of a persisted user. Relational and computed fields are
/// resolved on demand, per request.
pub struct UserNode {
    id: i32,
    user: User,
}

impl UserNode {
    pub fn new(user: User) -> Result<Self> {
        let id = user
            .id
            .ok_or_else(|| async_graphql::Error::new("User has not been saved"))?;
        Ok(Self { id, user })
    }
}

fn count(n: u64) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[Object(name = "User", rename_fields = "snake_case")]
impl UserNode {
    async fn username(&self) -> &str {
        &self.user.profile.username
    }

    async fn avatar(&self) -> &str {
        &self.user.profile.avatar
    }

    async fn bio(&self) -> &str {
        &self.user.profile.bio
    }

    async fn id(&self) -> i32 {
        self.id
    }

    async fn current_room(&self, ctx: &Context<'_>) -> Result<Option<member::Model>> {
        let db = ctx.data::<DatabaseConnection>()?;
        rooms::current_room(db, self.id).await.map_err(|e| e.extend())
    }

    async fn follower_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let db = ctx.data::<DatabaseConnection>()?;
        let n = follows::follower_count(db, self.id)
            .await
            .map_err(|e| e.extend())?;
        Ok(count(n))
    }

    async fn following_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let db = ctx.data::<DatabaseConnection>()?;
        let n = follows::following_count(db, self.id)
            .await
            .map_err(|e| e.extend())?;
        Ok(count(n))
    }

    /// Whether the requesting viewer follows this user. Always false without a viewer.
    async fn am_following(&self, ctx: &Context<'_>) -> Result<bool> {
        let Some(viewer) = ctx.data_opt::<Viewer>().and_then(|v| v.0) else {
            return Ok(false);
        };
        let db = ctx.data::<DatabaseConnection>()?;
        follows::is_following(db, viewer, self.id)
            .await
            .map_err(|e| e.extend())
    }

    async fn following(&self, ctx: &Context<'_>) -> Result<Vec<follow::Model>> {
        let db = ctx.data::<DatabaseConnection>()?;
        follows::following_of(db, self.id)
            .await
            .map_err(|e| e.extend())
    }

    async fn followers(&self, ctx: &Context<'_>) -> Result<Vec<follow::Model>> {
        let db = ctx.data::<DatabaseConnection>()?;
        follows::followers_of(db, self.id)
            .await
            .map_err(|e| e.extend())
    }
}
