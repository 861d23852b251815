use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::{
    CurrentDeductions, FinancialData, FinancialDataInput, RegimeComparison, TaxCalculation,
    TaxRegime, TaxSavingSuggestion, TaxSlab, suggest_tax_savings,
};
use tracing::info;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TaxCalculationRequest {
    pub financial_data: FinancialData,
    #[serde(default)]
    pub assessment_year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssessmentYearQuery {
    #[serde(default)]
    pub assessment_year: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaxSlabsResponse {
    pub regime: TaxRegime,
    pub assessment_year: String,
    pub slabs: Vec<TaxSlab>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    #[serde(default)]
    pub regime: Option<String>,
    #[serde(default)]
    pub section_80c: Decimal,
    #[serde(default)]
    pub section_80d: Decimal,
    #[serde(default)]
    pub section_80ccd1b: Decimal,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<TaxSavingSuggestion>,
}

fn requested_year(
    state: &AppState,
    requested: Option<String>,
) -> String {
    requested.unwrap_or_else(|| state.engine.config().default_assessment_year.to_string())
}

fn parse_regime(regime: &str) -> Result<TaxRegime, ApiError> {
    TaxRegime::parse(regime).ok_or_else(|| {
        ApiError::Validation(format!("Invalid regime '{regime}'. Use 'old' or 'new'"))
    })
}

/// POST /api/calculate-tax
pub async fn handle_calculate_tax(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TaxCalculationRequest>,
) -> Json<TaxCalculation> {
    let year = requested_year(&state, req.assessment_year);
    let calculation = state.engine.compare_regimes(&req.financial_data, &year);
    info!(
        assessment_year = %year,
        recommended = %calculation.recommended_regime,
        savings = %calculation.savings_amount,
        "tax calculated"
    );
    Json(calculation)
}

/// POST /api/compare-regimes
pub async fn handle_compare_regimes(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TaxCalculationRequest>,
) -> Json<RegimeComparison> {
    let year = requested_year(&state, req.assessment_year);
    Json(state.engine.regime_comparison(&req.financial_data, &year))
}

/// GET /api/tax-slabs/:regime
pub async fn handle_tax_slabs(
    State(state): State<AppState>,
    Path(regime): Path<String>,
    ApiQuery(params): ApiQuery<AssessmentYearQuery>,
) -> Result<Json<TaxSlabsResponse>, ApiError> {
    let regime = parse_regime(&regime)?;
    let year = requested_year(&state, params.assessment_year);
    let (resolved, slabs) = state.engine.slabs_for(&year, regime);

    Ok(Json(TaxSlabsResponse {
        regime,
        assessment_year: resolved.to_string(),
        slabs: slabs.to_vec(),
    }))
}

/// GET /api/tax-saving-suggestions
pub async fn handle_tax_saving_suggestions(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SuggestionsQuery>,
) -> Result<Json<SuggestionsResponse>, ApiError> {
    let regime = match params.regime.as_deref() {
        Some(regime) => parse_regime(regime)?,
        None => TaxRegime::Old,
    };
    // Clamped like any other financial data.
    let claimed = FinancialData::from(FinancialDataInput {
        section_80c: params.section_80c,
        section_80d: params.section_80d,
        section_80ccd1b: params.section_80ccd1b,
        ..FinancialDataInput::default()
    });
    let current = CurrentDeductions::from(&claimed);

    Ok(Json(SuggestionsResponse {
        suggestions: suggest_tax_savings(&current, regime, state.engine.limits()),
    }))
}
