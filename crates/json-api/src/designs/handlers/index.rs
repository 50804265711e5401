//! Design Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use atelier_app::domain::{
    designs::{DesignCategory, DesignFilter},
    paging::Page,
};

use crate::{
    designs::{errors::into_status_error, get::DesignResponse},
    extensions::*,
    state::State,
};

/// Catalogue page size when the client does not ask for one.
const DEFAULT_LIMIT: u32 = 12;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DesignsResponse {
    /// One page of the catalogue
    pub designs: Vec<DesignResponse>,

    /// Total designs matching the filter
    pub total: u64,

    /// The returned page number
    pub page: u32,

    /// Total page count at this limit
    pub pages: u32,
}

/// Design Index Handler
///
/// Returns one filtered page of the catalogue, newest first. Accepts
/// `page`, `limit`, `search`, `category`, `material`, `min_price`, and
/// `max_price` query parameters.
#[endpoint(tags("designs"), summary = "List Designs")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<DesignsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = req
        .query::<String>("category")
        .map(|value| {
            DesignCategory::parse(&value)
                .ok_or_else(|| StatusError::bad_request().brief("Unknown category"))
        })
        .transpose()?;

    let filter = DesignFilter {
        search: req.query::<String>("search"),
        category,
        material: req.query::<String>("material"),
        min_price: req.query::<u64>("min_price"),
        max_price: req.query::<u64>("max_price"),
    };

    let page = Page::new(
        req.query::<u32>("page").unwrap_or(1),
        req.query::<u32>("limit").unwrap_or(DEFAULT_LIMIT),
    );

    let designs = state
        .app
        .designs
        .list_designs(filter, page)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DesignsResponse {
        designs: designs.designs.into_iter().map(Into::into).collect(),
        total: designs.total,
        page: designs.page,
        pages: designs.pages,
    }))
}
