use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::dashboard::promotion::{promotion_router, PromotionResolver, PromotionSelection};

pub(super) fn resolver() -> PromotionResolver {
    PromotionResolver::default()
}

pub(super) fn opened(available_credits: u32) -> PromotionSelection {
    resolver().open(available_credits)
}

pub(super) fn router() -> axum::Router {
    promotion_router(Arc::new(resolver()))
}

pub(super) fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
