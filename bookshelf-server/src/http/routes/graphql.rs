//! GraphQL endpoint and GraphiQL playground

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;

use crate::graphql::BookSchema;
use crate::http::server::AppState;

/// Path of the GraphQL endpoint
pub const GRAPHQL_PATH: &str = "/query";

/// GET / - GraphiQL playground
async fn playground() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// GraphQL routes.
///
/// `/query` accepts GET, POST and multipart requests.
pub fn router(schema: BookSchema, playground_enabled: bool) -> Router<Arc<AppState>> {
    let router = Router::new().route_service(GRAPHQL_PATH, GraphQL::new(schema));

    if playground_enabled {
        router.route("/", get(playground))
    } else {
        router
    }
}
