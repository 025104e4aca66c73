use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{auth::AuthUser, error::ApiError, state::AppState};

use super::aggregate;
use super::dto::{
    CreateLogRequest, DeleteResponse, LogIdQuery, LogQuery, NutritionSummary, UpdateLogRequest,
};
use super::range::LogWindow;
use super::repo::{self, NutritionLog};

#[instrument(skip(state))]
pub async fn list_logs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<LogQuery>,
) -> Result<Json<NutritionSummary>, ApiError> {
    let window = LogWindow::resolve(&query, OffsetDateTime::now_utc())
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let logs = repo::list_in_range(&state.db, user_id, window).await?;

    let totals = aggregate::totals(&logs);
    let meal_groups = aggregate::group_by_meal(&logs);

    Ok(Json(NutritionSummary {
        logs,
        totals,
        meal_groups,
    }))
}

#[instrument(skip(state, body))]
pub async fn create_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateLogRequest>,
) -> Result<(StatusCode, Json<NutritionLog>), ApiError> {
    let new = body
        .validate(OffsetDateTime::now_utc())
        .map_err(ApiError::Validation)?;

    let log = repo::insert(&state.db, user_id, new).await?;
    info!(log_id = %log.id, meal_type = ?log.meal_type, "nutrition log created");

    Ok((StatusCode::CREATED, Json(log)))
}

#[instrument(skip(state, body))]
pub async fn update_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<LogIdQuery>,
    Json(body): Json<UpdateLogRequest>,
) -> Result<Json<NutritionLog>, ApiError> {
    let id = query
        .id
        .ok_or_else(|| ApiError::Validation("Nutrition log ID is required".into()))?;

    let patch = body.into_patch().map_err(ApiError::Validation)?;

    match repo::update(&state.db, user_id, id, patch).await? {
        Some(log) => {
            info!(log_id = %log.id, "nutrition log updated");
            Ok(Json(log))
        }
        None => {
            warn!(%id, "nutrition log not found for update");
            Err(ApiError::NotFound("Nutrition log not found".into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<LogIdQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = query
        .id
        .ok_or_else(|| ApiError::Validation("Nutrition log ID is required".into()))?;

    if !repo::delete(&state.db, user_id, id).await? {
        warn!(%id, "nutrition log not found for delete");
        return Err(ApiError::NotFound("Nutrition log not found".into()));
    }

    info!(log_id = %id, "nutrition log deleted");
    Ok(Json(DeleteResponse {
        message: "Nutrition log deleted successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_envelope_always_has_all_keys() {
        let summary = NutritionSummary {
            logs: vec![],
            totals: aggregate::totals(&[]),
            meal_groups: aggregate::group_by_meal(&[]),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["logs"], serde_json::json!([]));
        assert_eq!(json["totals"]["calories"], 0.0);
        assert_eq!(json["totals"]["protein"], 0.0);
        assert!(json["mealGroups"]["BREAKFAST"].is_array());
        assert!(json["mealGroups"]["SNACK"].is_array());
    }

    #[test]
    fn delete_confirmation_serializes_message() {
        let json = serde_json::to_value(DeleteResponse {
            message: "Nutrition log deleted successfully".into(),
        })
        .unwrap();
        assert_eq!(json["message"], "Nutrition log deleted successfully");
    }
}
