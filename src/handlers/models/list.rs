// handlers/models/list.rs - GET /api/models handler

use axum::extract::{Query, State};
use serde::Serialize;

use crate::config;
use crate::listing::{build_url_with_params, ListingParams, ListingQuery, Pager};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::store::Model;

/// Search strings for the adjacent pages; a null link means that control is
/// disabled.
#[derive(Debug, Serialize)]
pub struct PageLinks {
    pub prev: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModelListData {
    pub items: Vec<Model>,
    pub total_pages: u32,
    pub current_page: u32,
    pub links: PageLinks,
}

/// GET /api/models - paginated, filterable model listing.
///
/// Raw query parameters are clamped into a valid descriptor (see
/// `ListingQuery::from_params`), the store returns one page plus the true
/// total, and the response carries prev/next search strings so clients stay
/// in sync with the address bar. A page past the end returns an empty item
/// list with the totals intact. Storage failures propagate; an empty page is
/// never substituted for an error.
pub async fn model_list(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> ApiResult<ModelListData> {
    let query = ListingQuery::from_params(&params, &config::config().listing);
    let page = state.store.find_page(&query).await?;

    let pager = Pager::new(page.current_page, page.total_pages);
    let links = PageLinks {
        prev: pager.prev(&query).map(|q| build_url_with_params(&q, "")),
        next: pager.next(&query).map(|q| build_url_with_params(&q, "")),
    };

    Ok(ApiResponse::success(ModelListData {
        items: page.items,
        total_pages: page.total_pages,
        current_page: page.current_page,
        links,
    }))
}
