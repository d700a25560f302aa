use async_graphql::{Context, ErrorExtensions, Object, Result};
use sea_orm::DatabaseConnection;

use crate::persist::Persistable;
use crate::profile::User;
use crate::viewer::Viewer;

use super::UserNode;

async fn load_node(ctx: &Context<'_>, id: i32) -> Result<Option<UserNode>> {
    let db = ctx.data::<DatabaseConnection>()?;
    let user = User::load(db, id).await.map_err(|e| e.extend())?;
    user.map(UserNode::new).transpose()
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn user(&self, ctx: &Context<'_>, id: i32) -> Result<Option<UserNode>> {
        load_node(ctx, id).await
    }

    /// The viewer's own profile.
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<UserNode>> {
        match ctx.data_opt::<Viewer>().and_then(|v| v.0) {
            Some(id) => load_node(ctx, id).await,
            None => Ok(None),
        }
    }
}
