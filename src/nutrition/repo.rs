use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::range::LogWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "meal_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl std::str::FromStr for MealType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BREAKFAST" => Ok(Self::Breakfast),
            "LUNCH" => Ok(Self::Lunch),
            "DINNER" => Ok(Self::Dinner),
            "SNACK" => Ok(Self::Snack),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NutritionLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub quantity: f64,
    pub unit: String,
    pub meal_type: MealType,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

/// A fully validated entry ready for insertion.
#[derive(Debug, Clone)]
pub struct NewLog {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub quantity: f64,
    pub unit: String,
    pub meal_type: MealType,
    pub logged_at: OffsetDateTime,
}

/// Field-level merge for updates: `None` keeps the stored value.
/// `logged_at` is fixed at creation and never patched.
#[derive(Debug, Clone, Default)]
pub struct LogPatch {
    pub food_name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub meal_type: Option<MealType>,
}

const RETURNING: &str =
    "id, user_id, food_name, calories, protein, carbs, fats, quantity, unit, meal_type, logged_at";

pub async fn list_in_range(
    db: &PgPool,
    user_id: Uuid,
    window: LogWindow,
) -> anyhow::Result<Vec<NutritionLog>> {
    let rows = sqlx::query_as::<_, NutritionLog>(&format!(
        r#"
        SELECT {RETURNING}
        FROM nutrition_logs
        WHERE user_id = $1 AND logged_at >= $2 AND logged_at <= $3
        ORDER BY logged_at ASC
        "#,
    ))
    .bind(user_id)
    .bind(window.from)
    .bind(window.to)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn insert(db: &PgPool, user_id: Uuid, new: NewLog) -> anyhow::Result<NutritionLog> {
    let log = sqlx::query_as::<_, NutritionLog>(&format!(
        r#"
        INSERT INTO nutrition_logs
            (id, user_id, food_name, calories, protein, carbs, fats, quantity, unit, meal_type, logged_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {RETURNING}
        "#,
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(new.food_name)
    .bind(new.calories)
    .bind(new.protein)
    .bind(new.carbs)
    .bind(new.fats)
    .bind(new.quantity)
    .bind(new.unit)
    .bind(new.meal_type)
    .bind(new.logged_at)
    .fetch_one(db)
    .await?;
    Ok(log)
}

/// Scoped by owner: a row belonging to someone else merges nothing and
/// comes back as `None`, indistinguishable from a missing row.
pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: LogPatch,
) -> anyhow::Result<Option<NutritionLog>> {
    let log = sqlx::query_as::<_, NutritionLog>(&format!(
        r#"
        UPDATE nutrition_logs SET
            food_name = COALESCE($3, food_name),
            calories  = COALESCE($4, calories),
            protein   = COALESCE($5, protein),
            carbs     = COALESCE($6, carbs),
            fats      = COALESCE($7, fats),
            quantity  = COALESCE($8, quantity),
            unit      = COALESCE($9, unit),
            meal_type = COALESCE($10, meal_type)
        WHERE id = $1 AND user_id = $2
        RETURNING {RETURNING}
        "#,
    ))
    .bind(id)
    .bind(user_id)
    .bind(patch.food_name)
    .bind(patch.calories)
    .bind(patch.protein)
    .bind(patch.carbs)
    .bind(patch.fats)
    .bind(patch.quantity)
    .bind(patch.unit)
    .bind(patch.meal_type)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM nutrition_logs WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
