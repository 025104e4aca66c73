use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::aggregate::{MealGroups, Totals};
use super::repo::{LogPatch, MealType, NewLog, NutritionLog};

/// The recognized date filters. Raw strings here; `LogWindow::resolve`
/// validates them before anything reaches the database.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LogIdQuery {
    pub id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummary {
    pub logs: Vec<NutritionLog>,
    pub totals: Totals,
    pub meal_groups: MealGroups,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogRequest {
    pub food_name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub meal_type: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub logged_at: Option<OffsetDateTime>,
}

impl CreateLogRequest {
    /// Checks presence, category, and sign; `loggedAt` defaults to `now`.
    pub fn validate(self, now: OffsetDateTime) -> Result<NewLog, String> {
        let (
            Some(food_name),
            Some(calories),
            Some(protein),
            Some(carbs),
            Some(fats),
            Some(quantity),
            Some(unit),
            Some(meal_type),
        ) = (
            self.food_name,
            self.calories,
            self.protein,
            self.carbs,
            self.fats,
            self.quantity,
            self.unit,
            self.meal_type,
        )
        else {
            return Err("Missing required fields".into());
        };

        let meal_type: MealType = meal_type
            .parse()
            .map_err(|_| "Invalid meal type".to_string())?;

        if [calories, protein, carbs, fats, quantity]
            .iter()
            .any(|v| *v < 0.0)
        {
            return Err("Nutrition values must be non-negative".into());
        }

        Ok(NewLog {
            food_name,
            calories,
            protein,
            carbs,
            fats,
            quantity,
            unit,
            meal_type,
            logged_at: self.logged_at.unwrap_or(now),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogRequest {
    pub food_name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub meal_type: Option<String>,
}

impl UpdateLogRequest {
    /// Any subset of fields is fine, an empty patch included; whatever is
    /// supplied still has to be a valid category and non-negative.
    pub fn into_patch(self) -> Result<LogPatch, String> {
        let meal_type = match self.meal_type {
            Some(s) => Some(
                s.parse::<MealType>()
                    .map_err(|_| "Invalid meal type".to_string())?,
            ),
            None => None,
        };

        if [self.calories, self.protein, self.carbs, self.fats, self.quantity]
            .into_iter()
            .flatten()
            .any(|v| v < 0.0)
        {
            return Err("Nutrition values must be non-negative".into());
        }

        Ok(LogPatch {
            food_name: self.food_name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
            quantity: self.quantity,
            unit: self.unit,
            meal_type,
        })
    }
}
