use crate::models::{HealthResponse, ServiceInfo};
use crate::service::ImageService;
use bytes::Bytes;
use warp::{Rejection, Reply};

pub async fn root_handler() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&ServiceInfo {
        message: "Educational Image Service",
        status: "active",
    }))
}

pub async fn fetch_image_handler(
    service: ImageService,
    body: Bytes,
) -> Result<impl Reply, Rejection> {
    let response = service.handle_body(&body).await;
    Ok(warp::reply::json(&response))
}

pub async fn health_handler(service: ImageService) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&HealthResponse {
        status: "healthy",
        cache_size: service.cache_size(),
    }))
}
