use crate::error;
use crate::handlers;
use crate::limiter::{self, IpRateLimiter};
use crate::middleware;
use crate::service::ImageService;
use std::convert::Infallible;
use warp::{Filter, Reply};

pub fn routes(
    service: ImageService,
    limiter: Option<IpRateLimiter>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let service = warp::any().map(move || service.clone());

    let root = warp::path::end()
        .and(warp::get())
        .and_then(handlers::root_handler);

    let fetch_image = warp::path("fetch_image")
        .and(warp::path::end())
        .and(warp::post())
        .and(limiter::with_rate_limit(limiter))
        .and(service.clone())
        .and(warp::body::bytes())
        .and_then(handlers::fetch_image_handler);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(service)
        .and_then(handlers::health_handler);

    middleware::with_request_id()
        .and(root.or(fetch_image).or(health))
        .map(middleware::add_request_id_header)
        .recover(error::handle_rejection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FetchCache, DEFAULT_CAPACITY};
    use crate::error::FetchError;
    use crate::fetcher::testing::{CountingFetcher, FailingFetcher};
    use crate::fetcher::Fetcher;
    use crate::models::FetchImageResponse;
    use crate::service::DEFAULT_FETCH_TIMEOUT;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use warp::http::StatusCode;

    fn service(fetcher: Arc<dyn Fetcher>) -> ImageService {
        let cache = FetchCache::new(DEFAULT_CAPACITY, fetcher);
        ImageService::new(cache, DEFAULT_FETCH_TIMEOUT)
    }

    fn body_json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn root_reports_service_status() {
        let api = routes(service(Arc::new(CountingFetcher::default())), None);
        let res = warp::test::request()
            .method("GET")
            .path("/")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(middleware::REQUEST_ID_HEADER));
        assert_eq!(
            body_json(res.body()),
            json!({"message": "Educational Image Service", "status": "active"})
        );
    }

    #[tokio::test]
    async fn fetch_image_returns_embedded_data() {
        let api = routes(service(Arc::new(CountingFetcher::default())), None);
        let res = warp::test::request()
            .method("POST")
            .path("/fetch_image")
            .json(&json!({"query": "Shakespeare", "count": 1}))
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res.body());
        assert_eq!(body["success"], true);
        assert!(body.get("error").is_none());

        let images = body["images"].as_array().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0]["title"], "William Shakespeare Portrait");
        assert_eq!(images[0]["url"], "");
        assert_eq!(images[0]["source"], "wikimedia");
        let caption = "William Shakespeare - The Bard";
        assert_eq!(images[0]["educational_caption"], caption);
        assert_eq!(images[0]["alt_text"], "Portrait of William Shakespeare");
        assert!(!images[0]["data"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_returns_url_with_ok_status() {
        let fetcher = FailingFetcher(FetchError::Timeout(DEFAULT_FETCH_TIMEOUT));
        let api = routes(service(Arc::new(fetcher)), None);
        let res = warp::test::request()
            .method("POST")
            .path("/fetch_image")
            .json(&json!({"query": "dna"}))
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: FetchImageResponse = serde_json::from_slice(res.body()).unwrap();
        assert!(body.success);
        assert_eq!(body.images[0].data, "");
        let url = &body.images[0].url;
        assert!(url.starts_with("https://upload.wikimedia.org/"));
    }

    #[tokio::test]
    async fn malformed_body_is_reported_with_ok_status() {
        let api = routes(service(Arc::new(CountingFetcher::default())), None);
        let res = warp::test::request()
            .method("POST")
            .path("/fetch_image")
            .body("{not json")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res.body());
        assert_eq!(body["success"], false);
        assert_eq!(body["images"], json!([]));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn health_reports_cache_size() {
        let api = routes(service(Arc::new(CountingFetcher::default())), None);

        let res = warp::test::request().path("/health").reply(&api).await;
        let expected = json!({"status": "healthy", "cache_size": 0});
        assert_eq!(body_json(res.body()), expected);

        for query in ["dna", "genetic code", "planets"] {
            warp::test::request()
                .method("POST")
                .path("/fetch_image")
                .json(&json!({ "query": query }))
                .reply(&api)
                .await;
        }

        let res = warp::test::request().path("/health").reply(&api).await;
        assert_eq!(res.status(), StatusCode::OK);
        let expected = json!({"status": "healthy", "cache_size": 2});
        assert_eq!(body_json(res.body()), expected);
    }

    #[tokio::test]
    async fn unknown_routes_and_methods_are_rejected() {
        let api = routes(service(Arc::new(CountingFetcher::default())), None);

        let res = warp::test::request().path("/nope").reply(&api).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res.body())["code"], 404);

        let res = warp::test::request()
            .method("GET")
            .path("/fetch_image")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn rate_limit_rejects_bursts() {
        let api = routes(
            service(Arc::new(CountingFetcher::default())),
            IpRateLimiter::new(1, 60),
        );
        let request = || {
            warp::test::request()
                .method("POST")
                .path("/fetch_image")
                .header("X-Forwarded-For", "203.0.113.7")
                .json(&json!({"query": "dna"}))
        };

        assert_eq!(request().reply(&api).await.status(), StatusCode::OK);

        let res = request().reply(&api).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body_json(res.body())["code"], 429);

        let res = warp::test::request().path("/health").reply(&api).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
