use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::extract::rejection::JsonRejection;
use axum::http::Uri;
use ledgerkit::{Authz, Problem};

use crate::domain::service::Service;

use super::dto::{ChatRequestDto, ChatResponseDto};
use super::error::domain_error_to_problem;

#[utoipa::path(
    post,
    path = "/chat",
    tag = "Advisor",
    operation_id = "advisor.chat",
    summary = "Ask for insurance advice about the catalog",
    request_body = ChatRequestDto,
    responses(
        (status = 200, body = ChatResponseDto),
        (status = 400, body = Problem),
        (status = 401, body = Problem),
        (status = 500, body = Problem),
    )
)]
pub async fn chat(
    Authz(principal): Authz,
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<ChatRequestDto>, JsonRejection>,
) -> Result<Json<ChatResponseDto>, Problem> {
    let Json(req) = body.map_err(|e| Problem::from(e).with_instance(uri.path()))?;
    let response = svc
        .advise(&principal, req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(ChatResponseDto { response }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{principal, service};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use serde_json::Value;
    use tower::ServiceExt as _;

    fn create_test_router(svc: Service) -> Router {
        Router::new()
            .route("/chat", post(chat))
            .layer(Extension(Arc::new(svc)))
            .layer(Extension(principal()))
    }

    async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_chat_returns_response() {
        let app = create_test_router(service(None, Some(vec![]), Some("en")));
        let (status, json) = post_chat(
            app,
            r#"{"message":"deductible?","assets":[{"make":"LG","model":"TV","value":800}],"language":"en"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(
            json["response"]
                .as_str()
                .unwrap()
                .starts_with("A deductible")
        );
    }

    #[tokio::test]
    async fn test_missing_message_is_bad_request() {
        let app = create_test_router(service(None, Some(vec![]), Some("en")));
        let (status, json) = post_chat(app, r#"{"assets":[]}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "insurance_advisor.validation");
        assert_eq!(json["instance"], "/chat");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = create_test_router(service(None, Some(vec![]), Some("en")));
        let (status, json) = post_chat(app, "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "request.invalid_body");
    }

    #[tokio::test]
    async fn test_catalog_failure_is_internal_error() {
        let app = create_test_router(service(None, None, Some("en")));
        let (status, json) = post_chat(app, r#"{"message":"coverage?"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "insurance_advisor.internal");
    }
}
