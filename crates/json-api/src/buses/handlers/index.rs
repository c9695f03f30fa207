//! List Buses Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use fleet_app::{
    domain::buses::{
        data::BusQuery,
        pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest},
    },
    validation::ValidationErrors,
};

use crate::{
    buses::{
        errors::into_api_error,
        models::{BusListData, BusResponse},
    },
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// List Buses Handler
///
/// Returns one page of the depot's buses, newest first. `isActive=true|false`
/// filters on status.
#[endpoint(
    tags("buses"),
    summary = "List Buses",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page: QueryParam<String, false>,
    limit: QueryParam<String, false>,
    search: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Envelope<BusListData>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_or_401()?;

    let query = parse_query(
        page.into_inner(),
        limit.into_inner(),
        search.into_inner(),
        req.query::<String>("isActive"),
    )?;

    let page = state
        .app
        .buses
        .list_buses(tenant.uuid, query)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::data(BusListData {
        buses: page
            .buses
            .into_iter()
            .map(|bus| BusResponse::new(bus, &tenant))
            .collect(),
        pagination: page.pagination.into(),
    })))
}

fn parse_query(
    page: Option<String>,
    limit: Option<String>,
    search: Option<String>,
    is_active: Option<String>,
) -> Result<BusQuery, ApiError> {
    let mut errors = ValidationErrors::new();

    let page = parse_number(&mut errors, "page", "Page", page, DEFAULT_PAGE);
    let limit = parse_number(&mut errors, "limit", "Limit", limit, DEFAULT_LIMIT);

    let page = match PageRequest::new(page, limit) {
        Ok(page) => page,
        Err(range) => {
            errors.extend(range);

            PageRequest::default()
        }
    };

    let is_active = match is_active.as_deref().map(str::trim) {
        None | Some("") => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => {
            errors.push("isActive", "isActive must be true or false");

            None
        }
    };

    let page = errors.finish(page).map_err(ApiError::validation)?;

    Ok(BusQuery::new(page, search, is_active))
}

/// Parse an optional integer parameter.
///
/// Negative and oversized values saturate into `u32` so the page range check
/// reports them.
fn parse_number(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    raw: Option<String>,
    default: u32,
) -> u32 {
    let Some(value) = raw.as_deref().map(str::trim).filter(|value| !value.is_empty()) else {
        return default;
    };

    match value.parse::<i64>() {
        Ok(number) if number < 0 => 0,
        Ok(number) => u32::try_from(number).unwrap_or(u32::MAX),
        Err(_not_a_number) => {
            errors.push(field, format!("{label} must be a number"));

            default
        }
    }
}
