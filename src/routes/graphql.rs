use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::ServerError;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse},
};

use crate::state::AppState;
use crate::viewer::Viewer;

pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let viewer = match Viewer::from_headers(&headers) {
        Ok(viewer) => viewer,
        Err((_, msg)) => {
            return async_graphql::Response::from_errors(vec![ServerError::new(msg, None)]).into();
        }
    };
    state.schema.execute(req.into_inner().data(viewer)).await.into()
}

pub async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/api/graphql")))
}
