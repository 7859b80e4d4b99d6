#[cfg(test)]
mod tests {
    use super::super::handlers::PROXY_CACHE_CONTROL;
    use super::super::routes::{protected_router, public_router};
    use crate::domain::proxy::ImageProxy;
    use crate::infra::blob::MemoryBlobStore;
    use crate::infra::imaging::test_support::png;
    use crate::test_support::{BASE_URL, sqlite_service};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use ledgerkit::auth::{AuthState, HOUSEHOLD_ID_HEADER, auth_middleware};
    use ledgerkit::{APPLICATION_PROBLEM_JSON, AuthConfig};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    const MAX_UPLOAD: usize = 1024 * 1024;
    const BOUNDARY: &str = "ledger-test-boundary";

    async fn app() -> (Router, Arc<MemoryBlobStore>) {
        let (svc, store) = sqlite_service(MAX_UPLOAD).await;
        let proxy =
            Arc::new(ImageProxy::new(svc.images().clone(), Vec::new(), 5, MAX_UPLOAD).unwrap());
        let auth = AuthState::new(AuthConfig {
            allow_dev_headers: true,
        });
        let router = protected_router(svc.clone(), proxy, MAX_UPLOAD)
            .route_layer(from_fn_with_state(auth, auth_middleware))
            .merge(public_router(svc));
        (router, store)
    }

    fn request(method: &str, uri: &str, household: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(h) = household {
            builder = builder.header(HOUSEHOLD_ID_HEADER, h);
        }
        match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn multipart(part_name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{part_name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(household: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(HOUSEHOLD_ID_HEADER, household)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, headers, body)
    }

    async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = send(app, req).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_missing_principal_is_unauthorized() {
        let (app, _) = app().await;
        let (status, headers, body) = send(&app, request("GET", "/assets", None, None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(headers[header::CONTENT_TYPE], APPLICATION_PROBLEM_JSON);
        let problem: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem["code"], "auth.unauthenticated");
    }

    #[tokio::test]
    async fn test_asset_crud_flow() {
        let (app, _) = app().await;

        let (status, created) = send_json(
            &app,
            request(
                "POST",
                "/assets",
                Some("house-1"),
                Some(json!({
                    "make": "Sony",
                    "model": "Bravia",
                    "value": 1299.5,
                    "category": "Electronics",
                    "householdId": "intruder",
                    "imageUrl": "https://cdn.example.com/tv.jpg"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["householdId"], "house-1");
        assert_eq!(created["imageUrls"][0]["low"], "https://cdn.example.com/tv.jpg");
        let id = created["id"].as_str().unwrap().to_owned();

        let (status, fetched) =
            send_json(&app, request("GET", &format!("/assets/{id}"), Some("house-1"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["make"], "Sony");

        let (status, updated) = send_json(
            &app,
            request(
                "PUT",
                &format!("/assets/{id}"),
                Some("house-1"),
                Some(json!({
                    "value": 999,
                    "category": null,
                    "id": "ignored",
                    "householdId": "intruder"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], id.as_str());
        assert_eq!(updated["householdId"], "house-1");
        assert_eq!(updated["value"], 999.0);
        assert_eq!(updated["category"], Value::Null);
        assert_eq!(updated["make"], "Sony");

        let (status, refetched) =
            send_json(&app, request("GET", &format!("/assets/{id}"), Some("house-1"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(refetched["householdId"], "house-1");
        assert_eq!(refetched["value"], 999.0);
        let (status, _) =
            send_json(&app, request("GET", &format!("/assets/{id}"), Some("intruder"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, listed) = send_json(&app, request("GET", "/assets", Some("house-1"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, summary) =
            send_json(&app, request("GET", "/assets/summary", Some("house-1"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["count"], 1);
        assert_eq!(summary["byCategory"][0]["category"], "Uncategorized");

        let (status, deleted) = send_json(
            &app,
            request("DELETE", &format!("/assets/{id}"), Some("house-1"), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted, json!({"id": id, "deleted": true}));

        let (status, problem) =
            send_json(&app, request("GET", &format!("/assets/{id}"), Some("house-1"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(problem["code"], "assets.not_found");
        assert_eq!(problem["instance"], format!("/assets/{id}"));
    }

    #[tokio::test]
    async fn test_other_household_sees_not_found() {
        let (app, _) = app().await;
        let (_, created) = send_json(
            &app,
            request(
                "POST",
                "/assets",
                Some("house-1"),
                Some(json!({"make": "Rolex", "model": "Sub", "value": 9000})),
            ),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, _) =
            send_json(&app, request("GET", &format!("/assets/{id}"), Some("house-2"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send_json(
            &app,
            request("DELETE", &format!("/assets/{id}"), Some("house-2"), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_input_is_bad_request() {
        let (app, _) = app().await;

        let (status, problem) =
            send_json(&app, request("GET", "/assets/not-a-uuid", Some("h"), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["code"], "assets.invalid_id");

        let (status, problem) = send_json(
            &app,
            request(
                "POST",
                "/assets",
                Some("h"),
                Some(json!({"make": "", "model": "X", "value": 1})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["code"], "assets.validation");
        assert_eq!(problem["errors"][0]["field"], "make");

        let (status, problem) = send_json(
            &app,
            request(
                "POST",
                "/assets",
                Some("h"),
                Some(json!({"make": "A", "model": "B", "value": 1, "purchaseDate": "yesterday"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["errors"][0]["field"], "purchaseDate");

        let req = Request::builder()
            .method("POST")
            .uri("/assets")
            .header(HOUSEHOLD_ID_HEADER, "h")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, problem) = send_json(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["code"], "request.invalid_body");

        let (status, problem) = send_json(
            &app,
            request(
                "POST",
                "/assets",
                Some("h"),
                Some(json!({"make": "Sony", "model": "TV"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["errors"][0]["field"], "value");
    }

    #[tokio::test]
    async fn test_undecodable_bodies_are_bad_request() {
        let (app, _) = app().await;

        // well-formed JSON with a mistyped field
        let (status, problem) = send_json(
            &app,
            request(
                "POST",
                "/assets",
                Some("h"),
                Some(json!({"make": "Sony", "model": "TV", "value": "abc"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["status"], 400);
        assert_eq!(problem["code"], "request.invalid_body");

        let req = Request::builder()
            .method("POST")
            .uri("/assets")
            .header(HOUSEHOLD_ID_HEADER, "h")
            .body(Body::from(r#"{"make":"Sony","model":"TV","value":1}"#))
            .unwrap();
        let (status, problem) = send_json(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["code"], "request.invalid_body");

        let (status, listed) = send_json(&app, request("GET", "/assets", Some("h"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(listed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_then_read_blob_publicly() {
        let (app, store) = app().await;

        let (status, uploaded) = send_json(
            &app,
            upload_request("h", multipart("image", "photo.png", "image/png", &png(32, 16))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(uploaded["imageUrl"], uploaded["imageUrls"]["high"]);
        assert_eq!(store.len(), 2);

        let low = uploaded["imageUrls"]["low"].as_str().unwrap();
        let path = low.strip_prefix(BASE_URL).unwrap();
        let (status, headers, body) = send(&app, request("GET", path, None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
        assert_eq!(&body[..2], &[0xFF, 0xD8]);

        let tampered = path.replace("sig=", "sig=ff");
        let (status, _, _) = send(&app, request("GET", &tampered, None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_accepts_first_file_part_and_rejects_non_images() {
        let (app, store) = app().await;

        let (status, _) = send_json(
            &app,
            upload_request("h", multipart("attachment", "scan.png", "image/png", &png(4, 4))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.len(), 2);

        let (status, problem) = send_json(
            &app,
            upload_request("h", multipart("image", "doc.pdf", "application/pdf", b"%PDF-1.7")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["code"], "assets.validation");
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_proxy_serves_own_blobs_and_rejects_foreign_urls() {
        let (app, _) = app().await;
        let (_, uploaded) = send_json(
            &app,
            upload_request("h", multipart("file", "a.png", "image/png", &png(4, 4))),
        )
        .await;
        let high = uploaded["imageUrl"].as_str().unwrap();

        let uri = format!(
            "/proxy-image?url={}",
            url::form_urlencoded::byte_serialize(high.as_bytes()).collect::<String>()
        );
        let (status, headers, _) = send(&app, request("GET", &uri, Some("h"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CACHE_CONTROL], PROXY_CACHE_CONTROL);
        assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");

        let (status, problem) = send_json(
            &app,
            request(
                "GET",
                "/proxy-image?url=https%3A%2F%2Fevil.example.com%2Fx.jpg",
                Some("h"),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(problem["errors"][0]["field"], "url");

        let (status, _) = send_json(&app, request("GET", "/proxy-image", Some("h"), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send_json(&app, request("GET", &uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
