mod mutation;
mod query;
mod user;

use async_graphql::{EmptySubscription, ErrorExtensions, Schema};
use sea_orm::DatabaseConnection;

use crate::error::ProfileError;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use user::UserNode;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema. The viewer is attached per request by the HTTP handler.
pub fn build_schema(db: DatabaseConnection) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .finish()
}

impl ErrorExtensions for ProfileError {
    fn extend(&self) -> async_graphql::Error {
        if let ProfileError::Db(e) = self {
            tracing::error!("Database error in GraphQL resolver: {e}");
        }
        let code = match self {
            ProfileError::FieldTooLong { .. } | ProfileError::SelfFollow => "BAD_USER_INPUT",
            ProfileError::NotFound(_) => "NOT_FOUND",
            ProfileError::Conflict(_) => "CONFLICT",
            ProfileError::ViewerRequired => "UNAUTHENTICATED",
            ProfileError::Forbidden => "FORBIDDEN",
            ProfileError::SchemaMismatch(_) | ProfileError::Db(_) => "INTERNAL",
        };
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::memory_db;
    use crate::follows;
    use crate::persist::Persistable;
    use crate::profile::User;
    use crate::rooms;
    use crate::viewer::Viewer;
    use async_graphql::Request;
    use serde_json::{json, Value};

    async fn run(schema: &AppSchema, query: &str, viewer: Viewer) -> Value {
        let res = schema.execute(Request::new(query).data(viewer)).await;
        assert!(res.errors.is_empty(), "unexpected errors: {:?}", res.errors);
        res.data.into_json().unwrap()
    }

    async fn run_err(schema: &AppSchema, query: &str, viewer: Viewer) -> String {
        let res = schema.execute(Request::new(query).data(viewer)).await;
        assert_eq!(res.errors.len(), 1, "expected one error, got {:?}", res.errors);
        res.errors[0].message.clone()
    }

    #[tokio::test]
    async fn test_user_query_resolves_all_fields() {
        let db = memory_db().await;
        let a = User::new().save(&db).await.unwrap().id.unwrap();
        let b = User::new().save(&db).await.unwrap().id.unwrap();
        follows::follow(&db, a, b).await.unwrap();
        rooms::enter_room(&db, b, 7).await.unwrap();
        let schema = build_schema(db);

        let data = run(
            &schema,
            &format!(
                "{{ user(id: {b}) {{ id username avatar bio follower_count following_count \
                 am_following current_room {{ room_id user_id }} \
                 followers {{ follower_id following_id }} following {{ id }} }} }}"
            ),
            Viewer(Some(a)),
        )
        .await;

        assert_eq!(
            data["user"],
            json!({
                "id": b,
                "username": "Anonymous",
                "avatar": "",
                "bio": "Hello Dogehouse",
                "follower_count": 1,
                "following_count": 0,
                "am_following": true,
                "current_room": { "room_id": 7, "user_id": b },
                "followers": [{ "follower_id": a, "following_id": b }],
                "following": [],
            })
        );
    }

    #[tokio::test]
    async fn test_am_following_is_viewer_relative() {
        let db = memory_db().await;
        let a = User::new().save(&db).await.unwrap().id.unwrap();
        let b = User::new().save(&db).await.unwrap().id.unwrap();
        let c = User::new().save(&db).await.unwrap().id.unwrap();
        follows::follow(&db, a, b).await.unwrap();
        let schema = build_schema(db);
        let query = format!("{{ user(id: {b}) {{ am_following current_room {{ id }} }} }}");

        let as_a = run(&schema, &query, Viewer(Some(a))).await;
        let as_c = run(&schema, &query, Viewer(Some(c))).await;
        let anonymous = run(&schema, &query, Viewer(None)).await;

        assert_eq!(as_a["user"]["am_following"], true);
        assert_eq!(as_c["user"]["am_following"], false);
        assert_eq!(anonymous["user"]["am_following"], false);
        assert_eq!(anonymous["user"]["current_room"], Value::Null);
    }

    #[tokio::test]
    async fn test_user_fields_are_snake_case() {
        let sdl = build_schema(memory_db().await).sdl();
        for field in [
            "current_room: Member",
            "follower_count: Int!",
            "following_count: Int!",
            "am_following: Boolean!",
            "follower_id: Int!",
            "room_id: Int!",
        ] {
            assert!(sdl.contains(field), "missing `{field}` in\n{sdl}");
        }
        assert!(!sdl.contains("followerCount"));
        assert!(!sdl.contains("amFollowing"));
    }

    #[tokio::test]
    async fn test_unknown_user_is_null() {
        let schema = build_schema(memory_db().await);
        let data = run(&schema, "{ user(id: 99) { id } }", Viewer(None)).await;
        assert_eq!(data["user"], Value::Null);
    }

    #[tokio::test]
    async fn test_create_and_update_profile() {
        let schema = build_schema(memory_db().await);

        let data = run(
            &schema,
            r#"mutation { createUser(input: { avatar: "https://cdn.example/doge.png" }) { id username avatar bio } }"#,
            Viewer(None),
        )
        .await;
        let id = data["createUser"]["id"].as_i64().unwrap();
        assert_eq!(data["createUser"]["username"], "Anonymous");
        assert_eq!(data["createUser"]["avatar"], "https://cdn.example/doge.png");
        assert_eq!(data["createUser"]["bio"], "Hello Dogehouse");

        let data = run(
            &schema,
            &format!(r#"mutation {{ updateProfile(id: {id}, input: {{ username: "shibe" }}) {{ username bio }} }}"#),
            Viewer(Some(id as i32)),
        )
        .await;
        assert_eq!(data["updateProfile"], json!({ "username": "shibe", "bio": "Hello Dogehouse" }));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_overlong_and_foreign() {
        let db = memory_db().await;
        let id = User::new().save(&db).await.unwrap().id.unwrap();
        let schema = build_schema(db);

        let msg = run_err(
            &schema,
            &format!(r#"mutation {{ updateProfile(id: {id}, input: {{ username: "muchtoolongname" }}) {{ id }} }}"#),
            Viewer(Some(id)),
        )
        .await;
        assert_eq!(msg, "username must be at most 12 characters (got 15)");

        let msg = run_err(
            &schema,
            &format!(r#"mutation {{ updateProfile(id: {id}, input: {{ bio: "hi" }}) {{ id }} }}"#),
            Viewer(Some(id + 1)),
        )
        .await;
        assert_eq!(msg, "Only the owner can change this profile");
    }

    #[tokio::test]
    async fn test_follow_mutations() {
        let db = memory_db().await;
        let a = User::new().save(&db).await.unwrap().id.unwrap();
        let b = User::new().save(&db).await.unwrap().id.unwrap();
        let schema = build_schema(db);

        let data = run(
            &schema,
            &format!("mutation {{ followUser(id: {b}) {{ follower_id following_id }} }}"),
            Viewer(Some(a)),
        )
        .await;
        assert_eq!(data["followUser"], json!({ "follower_id": a, "following_id": b }));

        let data = run(&schema, "{ me { following_count } }", Viewer(Some(a))).await;
        assert_eq!(data["me"]["following_count"], 1);

        let data = run(
            &schema,
            &format!("mutation {{ unfollowUser(id: {b}) }}"),
            Viewer(Some(a)),
        )
        .await;
        assert_eq!(data["unfollowUser"], true);

        let msg = run_err(
            &schema,
            &format!("mutation {{ followUser(id: {b}) {{ id }} }}"),
            Viewer(None),
        )
        .await;
        assert_eq!(msg, "This operation requires a viewer");
    }
}
