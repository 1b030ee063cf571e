//! HTTP handlers for the pricing API.
//!
//! Mounted under `/api/pricing`. All decimals travel as strings.

use axum::{extract::State, routing::post, Json, Router};
use tracing::debug;

use crate::error::Result;
use crate::AppState;

use super::calculators::{self, TotalsLineInput};
use super::requests::{
    CalculateTotalsRequest, EquipmentSaleValueRequest, LaborSaleValueRequest,
    PriceProposalRequest, SalaryVariationRequest, VariableCostsRequest, VariationRateRequest,
};
use super::responses::{
    PricedProposalResponse, SalaryVariationResponse, SaleValueResponse, TotalsResponse,
    VariableCostsResponse, VariationRateResponse,
};
use super::services::{self, ProposalInput};

/// Pricing routes, to be nested under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/variation-rate", post(variation_rate))
        .route("/labor-sale-value", post(labor_sale_value))
        .route("/equipment-sale-value", post(equipment_sale_value))
        .route("/variable-costs", post(variable_costs))
        .route("/salary-variation", post(salary_variation))
        .route("/totals", post(totals))
        .route("/proposal", post(price_proposal))
}

async fn variation_rate(
    Json(req): Json<VariationRateRequest>,
) -> Result<Json<VariationRateResponse>> {
    let variation_rate = calculators::variation_rate(req.base_value, req.additional_value)?;
    Ok(Json(VariationRateResponse { variation_rate }))
}

async fn labor_sale_value(
    Json(req): Json<LaborSaleValueRequest>,
) -> Result<Json<SaleValueResponse>> {
    let sale_value = calculators::labor_sale_value(
        req.hourly_value,
        req.base_value,
        req.variation_rate,
        req.hours,
    )?;
    Ok(Json(SaleValueResponse { sale_value }))
}

async fn equipment_sale_value(
    Json(req): Json<EquipmentSaleValueRequest>,
) -> Result<Json<SaleValueResponse>> {
    let sale_value = calculators::equipment_sale_value(
        req.hourly_value,
        req.indirect_expense_rate,
        req.fixed_margin_rate,
        req.tax_rate,
        req.hours,
    )?;
    Ok(Json(SaleValueResponse { sale_value }))
}

async fn variable_costs(
    Json(req): Json<VariableCostsRequest>,
) -> Result<Json<VariableCostsResponse>> {
    let value = calculators::variable_costs(req.cost, req.margin_rate)?;
    Ok(Json(VariableCostsResponse { value }))
}

async fn salary_variation(
    Json(req): Json<SalaryVariationRequest>,
) -> Result<Json<SalaryVariationResponse>> {
    let rate = calculators::salary_variation_rate(req.base_value, req.raised_value)?;
    let percentage = calculators::salary_variation_percentage(req.base_value, req.raised_value)?;
    Ok(Json(SalaryVariationResponse { rate, percentage }))
}

async fn totals(Json(req): Json<CalculateTotalsRequest>) -> Json<TotalsResponse> {
    let lines: Vec<TotalsLineInput> = req.lines.into_iter().map(Into::into).collect();
    let result = calculators::calculate_totals(&lines, &req.margin_percent);
    debug!(
        lines = lines.len(),
        total = %result.totals.total_value,
        "Recalculated totals"
    );
    Json(result.into())
}

async fn price_proposal(
    State(state): State<AppState>,
    Json(req): Json<PriceProposalRequest>,
) -> Result<Json<PricedProposalResponse>> {
    let input: ProposalInput = req.into();
    let priced = services::price_proposal(&state.catalog, &input)?;
    Ok(Json(priced.into()))
}
