use async_graphql::{Context, ErrorExtensions, InputObject, Object, Result};
use sea_orm::DatabaseConnection;

use crate::entities::follow;
use crate::follows;
use crate::persist::{require, Persistable};
use crate::profile::{ProfileUpdate, User};
use crate::viewer::Viewer;

use super::UserNode;

/// Profile fields to set. Omitted fields keep their current (or default) value.
#[derive(InputObject, Default)]
pub struct ProfileInput {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl From<ProfileInput> for ProfileUpdate {
    fn from(input: ProfileInput) -> Self {
        ProfileUpdate {
            username: input.username,
            avatar: input.avatar,
            bio: input.bio,
        }
    }
}

fn viewer(ctx: &Context<'_>) -> Viewer {
    ctx.data_opt::<Viewer>().copied().unwrap_or_default()
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] input: ProfileInput,
    ) -> Result<UserNode> {
        let db = ctx.data::<DatabaseConnection>()?;
        let mut user = User::new();
        ProfileUpdate::from(input).apply(&mut user.profile);
        let user = user.save(db).await.map_err(|e| e.extend())?;
        UserNode::new(user)
    }

    /// Edits the viewer's own profile.
    async fn update_profile(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: ProfileInput,
    ) -> Result<UserNode> {
        let db = ctx.data::<DatabaseConnection>()?;
        viewer(ctx).require_owner(id).map_err(|e| e.extend())?;

        let mut user = require(db, id).await.map_err(|e| e.extend())?;
        ProfileUpdate::from(input).apply(&mut user.profile);
        let user = user.save(db).await.map_err(|e| e.extend())?;
        UserNode::new(user)
    }

    /// The viewer follows user `id`.
    async fn follow_user(&self, ctx: &Context<'_>, id: i32) -> Result<follow::Model> {
        let db = ctx.data::<DatabaseConnection>()?;
        let me = viewer(ctx).id().map_err(|e| e.extend())?;
        follows::follow(db, me, id).await.map_err(|e| e.extend())
    }

    /// Returns whether an edge was removed.
    async fn unfollow_user(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let db = ctx.data::<DatabaseConnection>()?;
        let me = viewer(ctx).id().map_err(|e| e.extend())?;
        follows::unfollow(db, me, id).await.map_err(|e| e.extend())
    }
}
