use actix_web::{get, web, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::{auth::resolve_identity, graphql::Schema};

/// Executes a GraphQL request on behalf of the bearer-token caller, or a guest.
pub async fn graphql(
    schema: web::Data<Schema>,
    req: HttpRequest,
    gql_request: GraphQLRequest,
) -> GraphQLResponse {
    let identity = resolve_identity(&req);
    schema
        .execute(gql_request.into_inner().data(identity))
        .await
        .into()
}

#[get("/graphiql")]
async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
