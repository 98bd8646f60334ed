//! # Catalog and Calculator Handlers

use axum::{
    extract::{Query, rejection::QueryRejection},
    response::Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::catalog::Catalog;
use crate::error::{ApiError, validation_error};
use crate::format::MortgageEstimate;

const MAX_TERM_YEARS: u32 = 50;

/// Option lists for listing filters and forms
#[utoipa::path(
    get,
    path = "/catalog",
    responses(
        (status = 200, description = "Property types, neighborhoods and distressed types", body = Catalog)
    ),
    tag = "tools"
)]
pub async fn catalog() -> Json<Catalog> {
    Json(Catalog::default())
}

/// Mortgage calculator inputs
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MortgageQuery {
    /// Purchase price
    pub price: f64,
    /// Cash paid up front; defaults to 0
    #[serde(default)]
    pub down_payment: f64,
    /// Annual interest rate in percent, e.g. `6.5`
    pub interest_rate: f64,
    /// Loan term in years, 1 to 50
    pub years: u32,
}

impl MortgageQuery {
    fn validate(&self) -> Result<(), ApiError> {
        let mut invalid = serde_json::Map::new();

        for (name, value) in [
            ("price", self.price),
            ("downPayment", self.down_payment),
            ("interestRate", self.interest_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                invalid.insert(name.to_string(), json!("must be a non-negative number"));
            }
        }

        if !(1..=MAX_TERM_YEARS).contains(&self.years) {
            invalid.insert("years".to_string(), json!("must be between 1 and 50"));
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(validation_error("Invalid mortgage parameters", invalid.into()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/mortgage-estimate",
    params(MortgageQuery),
    responses(
        (status = 200, description = "Monthly payment and loan summary", body = MortgageEstimate),
        (status = 400, description = "Missing or out-of-range inputs", body = ApiError)
    ),
    tag = "tools"
)]
pub async fn mortgage_estimate(
    query: Result<Query<MortgageQuery>, QueryRejection>,
) -> Result<Json<MortgageEstimate>, ApiError> {
    let Query(input) = query?;
    input.validate()?;

    Ok(Json(MortgageEstimate::compute(
        input.price,
        input.down_payment,
        input.interest_rate,
        input.years,
    )))
}
