//! Split routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::{
    AppState,
    extractors::ApiJson,
    response::{ApiError, ApiResponse},
};
use splitter_core::split::{CreateSplitInput, ParticipantInput, Split, SplitError, SplitSummary};
use splitter_shared::{AppError, AppResult};
use splitter_shared::types::{CurrencyCode, ParticipantId, SplitId};

/// Creates the split routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/splits", post(create_split))
        .route("/splits/{id}", get(get_split).delete(delete_split))
        .route("/splits/{id}/settle", post(settle_split))
        .route("/splits/{id}/summary", get(split_summary))
}

/// Request body for creating a split.
#[derive(Debug, Deserialize)]
pub struct CreateSplitRequest {
    /// Split title.
    #[serde(default)]
    pub title: String,
    /// Total amount to split.
    #[serde(default)]
    pub total_amount: Decimal,
    /// Currency code.
    #[serde(default)]
    pub currency: String,
    /// "equal", "exact" or "percentage".
    #[serde(default)]
    pub strategy: String,
    /// Identifier of the creating user.
    #[serde(default)]
    pub created_by: String,
    /// Participants in order.
    #[serde(default)]
    pub participants: Vec<ParticipantRequest>,
}

/// A participant inside [`CreateSplitRequest`].
#[derive(Debug, Deserialize)]
pub struct ParticipantRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Owed amount for exact splits.
    pub amount: Option<Decimal>,
    /// Percentage (0-100) for percentage splits.
    pub percentage: Option<Decimal>,
}

/// Request body for settling a participant.
#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    /// Participant to mark as paid.
    #[serde(default)]
    pub participant_id: String,
}

impl CreateSplitRequest {
    /// Checks required fields and converts into engine input.
    ///
    /// Amount, participant count and strategy are left to the engine.
    fn into_input(self) -> AppResult<CreateSplitInput> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("title is required".to_string()));
        }

        let currency =
            CurrencyCode::parse(&self.currency).map_err(|e| AppError::Validation(e.to_string()))?;

        let participants = self
            .participants
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                let name = p.name.trim();
                if name.is_empty() {
                    return Err(AppError::Validation(format!(
                        "participants[{i}].name is required"
                    )));
                }
                Ok(ParticipantInput {
                    name: name.to_string(),
                    email: p
                        .email
                        .map(|e| e.trim().to_string())
                        .filter(|e| !e.is_empty()),
                    amount: p.amount,
                    percentage: p.percentage,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CreateSplitInput {
            title: title.to_string(),
            total_amount: self.total_amount,
            currency,
            strategy: self.strategy,
            created_by: self.created_by.trim().to_string(),
            participants,
        })
    }
}

/// An ID that does not parse cannot exist in the store.
fn parse_split_id(raw: &str) -> Result<SplitId, SplitError> {
    raw.parse()
        .map_err(|_| SplitError::SplitNotFound(raw.to_string()))
}

/// POST `/splits` - Create a split.
async fn create_split(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateSplitRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Split>>), ApiError> {
    let input = payload.into_input()?;
    let split = state.splits.create(input)?;

    info!(
        split_id = %split.id,
        strategy = %split.strategy,
        participants = split.participants.len(),
        total = %split.total_amount,
        currency = %split.currency,
        "Split created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(split))))
}

/// GET `/splits/{id}` - Fetch a split.
async fn get_split(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Split>>, ApiError> {
    let split_id = parse_split_id(&id)?;
    let split = state.splits.get(&split_id)?;
    Ok(Json(ApiResponse::success(split)))
}

/// GET `/splits/{id}/summary` - Settlement overview of a split.
async fn split_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SplitSummary>>, ApiError> {
    let split_id = parse_split_id(&id)?;
    let summary = state.splits.summary(&split_id)?;
    Ok(Json(ApiResponse::success(summary)))
}

/// POST `/splits/{id}/settle` - Mark a participant as paid.
async fn settle_split(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<SettleRequest>,
) -> Result<Json<ApiResponse<Split>>, ApiError> {
    let raw_participant = payload.participant_id.trim();
    if raw_participant.is_empty() {
        return Err(AppError::Validation("participant_id is required".to_string()).into());
    }

    let split_id = parse_split_id(&id)?;
    let Ok(participant_id) = raw_participant.parse::<ParticipantId>() else {
        // Unknown split still wins over an unparseable participant.
        state.splits.get(&split_id)?;
        return Err(SplitError::ParticipantNotFound(raw_participant.to_string()).into());
    };

    let split = state.splits.settle(&split_id, &participant_id)?;

    info!(
        split_id = %split_id,
        participant_id = %participant_id,
        "Participant settled"
    );

    Ok(Json(ApiResponse::success(split)))
}

/// DELETE `/splits/{id}` - Delete a split.
async fn delete_split(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let split_id = parse_split_id(&id)?;
    state.splits.delete(&split_id)?;

    info!(split_id = %split_id, "Split deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(title: &str, currency: &str, names: &[&str]) -> CreateSplitRequest {
        CreateSplitRequest {
            title: title.to_string(),
            total_amount: dec!(10),
            currency: currency.to_string(),
            strategy: "equal".to_string(),
            created_by: " user-1 ".to_string(),
            participants: names
                .iter()
                .map(|n| ParticipantRequest {
                    name: (*n).to_string(),
                    email: Some("  ".to_string()),
                    amount: None,
                    percentage: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_into_input_normalizes_fields() {
        let input = request(" Lunch ", "usd", &["ana ", "ben"]).into_input().unwrap();

        assert_eq!(input.title, "Lunch");
        assert_eq!(input.currency.as_str(), "USD");
        assert_eq!(input.created_by, "user-1");
        assert_eq!(input.participants[0].name, "ana");
        assert!(input.participants[1].email.is_none());
    }

    #[test]
    fn test_into_input_requires_title_currency_and_names() {
        let err = request("  ", "USD", &["a", "b"]).into_input().unwrap_err();
        assert_eq!(err.public_message(), "title is required");

        let err = request("Lunch", "", &["a", "b"]).into_input().unwrap_err();
        assert_eq!(err.public_message(), "currency is required");

        let err = request("Lunch", "USD", &["a", " "]).into_input().unwrap_err();
        assert_eq!(err.public_message(), "participants[1].name is required");
    }

    #[test]
    fn test_parse_split_id_maps_garbage_to_not_found() {
        assert_eq!(
            parse_split_id("nope"),
            Err(SplitError::SplitNotFound("nope".to_string()))
        );
        let id = SplitId::new();
        assert_eq!(parse_split_id(&id.to_string()), Ok(id));
    }
}
