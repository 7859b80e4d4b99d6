#[cfg(test)]
mod tests {
    use super::super::error::DomainError;
    use super::super::proxy::ImageProxy;
    use crate::infra::imaging::test_support::png;
    use crate::test_support::{BASE_URL, memory_images};
    use bytes::Bytes;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_allowed_upstream_image() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/images/chair.png");
                then.status(200)
                    .header("content-type", "image/png")
                    .body(b"png-bytes");
            })
            .await;

        let (_, images) = memory_images(1024);
        let proxy = ImageProxy::new(images, vec![server.url("/images/")], 5, 1024).unwrap();

        let blob = proxy.fetch(&server.url("/images/chair.png")).await.unwrap();
        assert_eq!(blob.content_type, "image/png");
        assert_eq!(blob.bytes.as_ref(), b"png-bytes");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upstream_status_mapping() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/images/missing.jpg");
                then.status(404);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/images/broken.jpg");
                then.status(500).body("boom");
            })
            .await;

        let (_, images) = memory_images(1024);
        let proxy = ImageProxy::new(images, vec![server.url("/images/")], 5, 1024).unwrap();

        assert!(matches!(
            proxy.fetch(&server.url("/images/missing.jpg")).await,
            Err(DomainError::UpstreamNotFound)
        ));
        assert!(matches!(
            proxy.fetch(&server.url("/images/broken.jpg")).await,
            Err(DomainError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_oversized_upstream_body_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/images/huge.jpg");
                then.status(200)
                    .header("content-type", "image/jpeg")
                    .body(vec![0_u8; 64]);
            })
            .await;

        let (_, images) = memory_images(1024);
        let proxy = ImageProxy::new(images, vec![server.url("/images/")], 5, 16).unwrap();

        assert!(matches!(
            proxy.fetch(&server.url("/images/huge.jpg")).await,
            Err(DomainError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_disallowed_urls_are_rejected_without_fetching() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200);
            })
            .await;

        let (_, images) = memory_images(1024);
        let proxy = ImageProxy::new(images, Vec::new(), 5, 1024).unwrap();

        for url in [
            server.url("/images/chair.png"),
            "ftp://ledger.test/blobs/x-high.jpg".to_owned(),
            "not a url".to_owned(),
        ] {
            let err = proxy.fetch(&url).await.unwrap_err();
            assert!(
                matches!(err, DomainError::Validation { ref field, .. } if field == "url"),
                "unexpected error for {url}: {err:?}"
            );
        }
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_dot_segments_cannot_leave_allowed_prefix() {
        let server = MockServer::start_async().await;
        let secret = server
            .mock_async(|when, then| {
                when.method(GET).path("/internal/secret");
                then.status(200)
                    .header("content-type", "text/plain")
                    .body("top secret");
            })
            .await;

        let (_, images) = memory_images(1024);
        let proxy = ImageProxy::new(images, vec![server.url("/blobs/")], 5, 1024).unwrap();

        for url in [
            format!("{}/blobs/../internal/secret", server.base_url()),
            format!("{}/blobs/%2e%2e/internal/secret", server.base_url()),
        ] {
            let err = proxy.fetch(&url).await.unwrap_err();
            assert!(
                matches!(err, DomainError::Validation { ref field, .. } if field == "url"),
                "unexpected error for {url}: {err:?}"
            );
        }
        secret.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_upstream_redirects_are_not_followed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/images/moved.png");
                then.status(302)
                    .header("location", "/internal/secret");
            })
            .await;
        let secret = server
            .mock_async(|when, then| {
                when.method(GET).path("/internal/secret");
                then.status(200).body("top secret");
            })
            .await;

        let (_, images) = memory_images(1024);
        let proxy = ImageProxy::new(images, vec![server.url("/images/")], 5, 1024).unwrap();

        assert!(matches!(
            proxy.fetch(&server.url("/images/moved.png")).await,
            Err(DomainError::Upstream(_))
        ));
        secret.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_own_blob_urls_are_served_locally() {
        let (_, images) = memory_images(1024 * 1024);
        let urls = images
            .upload(Bytes::from(png(8, 8)), Some("image/png"), None)
            .await
            .unwrap();
        assert!(urls.high.starts_with(BASE_URL));

        let proxy = ImageProxy::new(images, Vec::new(), 5, 1024 * 1024).unwrap();
        let blob = proxy.fetch(&urls.high).await.unwrap();
        assert_eq!(blob.content_type, "image/jpeg");

        let forged = urls.high.replace("sig=", "sig=00");
        assert!(matches!(
            proxy.fetch(&forged).await,
            Err(DomainError::BlobNotFound)
        ));
    }
}
