//! Sale route handlers.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use stockroom_core::sale::{
    self,
    model::{NewSale, PopulatedSale, Sale, SalesStats, TodaySales},
};
use stockroom_live::{event::SALE, Event};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Record a sale and notify live dashboards.
pub async fn create_sale(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(req): JsonBody<NewSale>,
) -> Result<(StatusCode, Json<Sale>), ApiError> {
    let sale = sale::record_sale(state.store.as_ref(), user.owner(), &req).await?;

    state.broadcast(
        &Event::new(SALE)
            .with("saleId", sale.id.clone())
            .with("amount", sale.total_amount),
    );

    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn list_sales(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<PopulatedSale>>, ApiError> {
    let sales = sale::list_sales(state.store.as_ref(), user.owner()).await?;
    Ok(Json(sales))
}

pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<SalesStats>, ApiError> {
    let stats = sale::sales_stats(state.store.as_ref(), user.owner(), Utc::now()).await?;
    Ok(Json(stats))
}

pub async fn today(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<TodaySales>, ApiError> {
    let today = sale::today_sales(state.store.as_ref(), user.owner(), Utc::now()).await?;
    Ok(Json(today))
}

pub async fn unique_customers(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<usize>, ApiError> {
    let count = sale::unique_customers(state.store.as_ref(), user.owner()).await?;
    Ok(Json(count))
}
