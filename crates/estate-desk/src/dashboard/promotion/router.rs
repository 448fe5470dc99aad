use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

use super::resolver::PromotionResolver;
use super::selection::{PromotionSelection, SelectionAction};

/// Dialog round trip: the balance is authoritative and replaces whatever the
/// client echoes back inside `selection`.
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub available_credits: u32,
    #[serde(default)]
    pub selection: Option<PromotionSelection>,
    #[serde(default)]
    pub action: Option<SelectionAction>,
}

/// Confirmation of the dialog's final state, priced against `available_credits`
/// rather than the balance echoed inside `selection`.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub available_credits: u32,
    pub selection: PromotionSelection,
}

/// Router builder exposing the promotion purchase dialog endpoints.
pub fn promotion_router(resolver: Arc<PromotionResolver>) -> Router {
    Router::new()
        .route("/api/v1/promotions/catalog", get(catalog_handler))
        .route("/api/v1/promotions/selection", post(selection_handler))
        .route("/api/v1/promotions/confirm", post(confirm_handler))
        .with_state(resolver)
}

pub(crate) async fn catalog_handler(State(resolver): State<Arc<PromotionResolver>>) -> Response {
    (StatusCode::OK, Json(resolver.catalog().clone())).into_response()
}

/// Client state with the server's balance, rejected when the dialog could
/// never have produced it.
fn client_selection(
    resolver: &PromotionResolver,
    selection: PromotionSelection,
    available_credits: u32,
) -> Result<PromotionSelection, AppError> {
    let selection = PromotionSelection {
        available_credits,
        ..selection
    };
    resolver.validate(&selection)?;
    Ok(selection)
}

pub(crate) async fn selection_handler(
    State(resolver): State<Arc<PromotionResolver>>,
    payload: Result<Json<SelectionRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(SelectionRequest {
        available_credits,
        selection,
        action,
    }) = payload?;

    let selection = match selection {
        Some(selection) => client_selection(&resolver, selection, available_credits)?,
        None => resolver.open(available_credits),
    };
    let selection = match action {
        Some(action) => resolver.apply(selection, action),
        None => selection,
    };

    Ok((StatusCode::OK, Json(resolver.view(&selection))).into_response())
}

pub(crate) async fn confirm_handler(
    State(resolver): State<Arc<PromotionResolver>>,
    payload: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(ConfirmRequest {
        available_credits,
        selection,
    }) = payload?;
    let selection = client_selection(&resolver, selection, available_credits)?;

    let response = match resolver.confirm(&selection) {
        Some(purchase) => {
            tracing::info!(
                plan = %purchase.plan,
                duration = %purchase.duration,
                cost = purchase.cost,
                auto_renew = purchase.auto_renew,
                "promotion purchase confirmed"
            );
            (StatusCode::OK, Json(purchase)).into_response()
        }
        None => {
            let payload = json!({
                "error": "insufficient credits",
                "deficit": resolver.deficit(&selection),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    };
    Ok(response)
}
