//! Serverless entry points.
//!
//! Each function binary wires one of these handlers into the `lambda_http`
//! runtime. The handlers share the catalog operations with the development
//! server and only deal with event extraction and response conversion.

use std::sync::Arc;

use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, RequestExt, Response};

use crate::api::ApiResponse;
use crate::config::Settings;
use crate::db::{create_price_store, PriceStore};
use crate::logging::init_tracing;
use crate::services::catalog::{self, FRAGRANCE_NAME_PARAM};

impl From<ApiResponse> for Response<Body> {
    fn from(api: ApiResponse) -> Self {
        let body = if api.body.is_empty() {
            Body::Empty
        } else {
            Body::Text(api.body)
        };
        let mut response = Response::new(body);
        *response.status_mut() = api.status;
        *response.headers_mut() = api.headers;
        response
    }
}

/// Cold-start setup: settings, tracing and the shared price store.
pub async fn bootstrap() -> Result<Arc<dyn PriceStore>, Error> {
    let settings = Settings::load().map_err(|err| Error::from(format!("{err:#}")))?;
    init_tracing(&settings.log_level);

    tracing::info!(
        app_name = %settings.app_name,
        version = %settings.app_version,
        table = %settings.fragrance_table,
        storage = %settings.storage_backend,
        "Function initialized"
    );

    Ok(create_price_store(Arc::new(settings)).await)
}

/// First value of a query string parameter, if the event carries one.
pub fn query_param<'a>(event: &'a Request, name: &str) -> Option<&'a str> {
    event
        .query_string_parameters_ref()
        .and_then(|params| params.first(name))
}

fn log_event(event: &Request, function: &'static str) {
    tracing::info!(
        function,
        method = %event.method(),
        path = %event.uri().path(),
        body_bytes = event.body().len(),
        "Received event"
    );
}

fn is_preflight(event: &Request) -> bool {
    event.method() == Method::OPTIONS
}

/// GET one fragrance by the `fragrance_name` query parameter.
pub async fn get_fragrance(store: &dyn PriceStore, event: Request) -> Result<Response<Body>, Error> {
    log_event(&event, "get_fragrance");
    if is_preflight(&event) {
        return Ok(ApiResponse::preflight().into());
    }

    let name = query_param(&event, FRAGRANCE_NAME_PARAM);
    Ok(catalog::get_by_name(store, name).await.into())
}

/// GET every listing in the table.
pub async fn get_all_fragrances(
    store: &dyn PriceStore,
    event: Request,
) -> Result<Response<Body>, Error> {
    log_event(&event, "get_all_fragrances");
    if is_preflight(&event) {
        return Ok(ApiResponse::preflight().into());
    }

    Ok(catalog::get_all(store).await.into())
}

/// Write the sample listings. The event content is ignored.
pub async fn seed_fragrances(
    store: &dyn PriceStore,
    event: Request,
) -> Result<Response<Body>, Error> {
    log_event(&event, "seed_fragrances");
    if is_preflight(&event) {
        return Ok(ApiResponse::preflight().into());
    }

    Ok(catalog::seed(store).await.into())
}

/// Insert or overwrite the listings named in the request body.
pub async fn update_fragrance(
    store: &dyn PriceStore,
    event: Request,
) -> Result<Response<Body>, Error> {
    log_event(&event, "update_fragrance");
    if is_preflight(&event) {
        return Ok(ApiResponse::preflight().into());
    }

    Ok(catalog::upsert(store, event.body().as_ref()).await.into())
}
