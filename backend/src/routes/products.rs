//! Public catalogue routes

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use shopfront_shared::{Pagination, Product};

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}

/// GET /products - Available products, one page at a time
async fn list_products(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Product>>> {
    if !(1..=Pagination::MAX_LIMIT).contains(&page.limit) || page.offset < 0 {
        return Err(ApiError::Validation(format!(
            "limit must be between 1 and {} and offset must not be negative",
            Pagination::MAX_LIMIT
        )));
    }

    let products = state
        .store()
        .list_available_products(page.limit, page.offset)
        .await?;

    Ok(Json(products))
}

/// GET /products/:id
///
/// An id that is not a number names no product, so it is a 404 as well.
async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Product>> {
    let id: i32 = raw_id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("Product {} not found", raw_id)))?;

    let product = state
        .store()
        .get_product(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {} not found", id)))?;

    Ok(Json(product))
}
