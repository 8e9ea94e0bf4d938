use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use derisk_core::{ChainDataSource, DeriskLookup, LookupError};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::params_structs::{LookupQuery, ProfitQuery, SubmitBody};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("sale price {0:?} is not a number")]
    SalePrice(String),
    #[error("lookup pipeline stopped unexpectedly")]
    Pipeline,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Lookup(LookupError::NothingLoaded | LookupError::NoCollection) => {
                StatusCode::CONFLICT
            }
            ApiError::Lookup(_) | ApiError::SalePrice(_) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

pub fn configure<S: ChainDataSource + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/lookup")
            .route("", web::get().to(get_lookup::<S>))
            .route("", web::post().to(submit_lookup::<S>))
            .route("/stats/refresh", web::post().to(refresh_stats::<S>))
            .route("/profit", web::get().to(project_profit::<S>)),
    );
}

async fn submit_and_wait<S: ChainDataSource + 'static>(
    lookup: &DeriskLookup<S>,
    raw_hash: &str,
) -> Result<(), ApiError> {
    if let Some(pipeline) = lookup.submit(raw_hash).await? {
        pipeline.await.map_err(|e| {
            error!(error = %e, "lookup pipeline panicked");
            ApiError::Pipeline
        })?;
    }
    Ok(())
}

pub async fn get_lookup<S: ChainDataSource + 'static>(
    lookup: web::Data<DeriskLookup<S>>,
    query: web::Query<LookupQuery>,
) -> Result<HttpResponse, ApiError> {
    if let Some(raw_hash) = query.tx_hash.as_deref().filter(|hash| !hash.trim().is_empty()) {
        submit_and_wait(&lookup, raw_hash).await?;
    }
    Ok(HttpResponse::Ok().json(lookup.snapshot().await))
}

pub async fn submit_lookup<S: ChainDataSource + 'static>(
    lookup: web::Data<DeriskLookup<S>>,
    body: web::Json<SubmitBody>,
) -> Result<HttpResponse, ApiError> {
    submit_and_wait(&lookup, &body.tx_hash).await?;
    Ok(HttpResponse::Ok().json(lookup.snapshot().await))
}

pub async fn refresh_stats<S: ChainDataSource + 'static>(
    lookup: web::Data<DeriskLookup<S>>,
) -> Result<HttpResponse, ApiError> {
    lookup.refresh_stats().await?;
    Ok(HttpResponse::Ok().json(lookup.snapshot().await))
}

pub async fn project_profit<S: ChainDataSource + 'static>(
    lookup: web::Data<DeriskLookup<S>>,
    query: web::Query<ProfitQuery>,
) -> Result<HttpResponse, ApiError> {
    let sale_price: Decimal = query
        .sale_price
        .trim()
        .parse()
        .map_err(|_| ApiError::SalePrice(query.sale_price.clone()))?;
    let projection = lookup.project_profit(sale_price).await?;
    Ok(HttpResponse::Ok().json(projection))
}
