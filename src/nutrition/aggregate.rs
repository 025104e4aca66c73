use serde::Serialize;

use super::repo::{MealType, NutritionLog};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Entries partitioned by meal category. A struct rather than a map so
/// every category is present in the JSON even when empty.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct MealGroups {
    pub breakfast: Vec<NutritionLog>,
    pub lunch: Vec<NutritionLog>,
    pub dinner: Vec<NutritionLog>,
    pub snack: Vec<NutritionLog>,
}

/// Sums the nutrition fields over all entries. Plain f64 addition, no
/// rounding; empty input sums to zero.
pub fn totals(logs: &[NutritionLog]) -> Totals {
    logs.iter().fold(Totals::default(), |acc, log| Totals {
        calories: acc.calories + log.calories,
        protein: acc.protein + log.protein,
        carbs: acc.carbs + log.carbs,
        fats: acc.fats + log.fats,
    })
}

/// Partitions entries into their meal buckets, preserving relative order.
pub fn group_by_meal(logs: &[NutritionLog]) -> MealGroups {
    let mut groups = MealGroups::default();
    for log in logs {
        let bucket = match log.meal_type {
            MealType::Breakfast => &mut groups.breakfast,
            MealType::Lunch => &mut groups.lunch,
            MealType::Dinner => &mut groups.dinner,
            MealType::Snack => &mut groups.snack,
        };
        bucket.push(log.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn log(food_name: &str, meal_type: MealType, calories: f64) -> NutritionLog {
        NutritionLog {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            food_name: food_name.into(),
            calories,
            protein: 1.0,
            carbs: 2.0,
            fats: 0.5,
            quantity: 1.0,
            unit: "serving".into(),
            meal_type,
            logged_at: datetime!(2024-03-10 08:00:00 UTC),
        }
    }

    #[test]
    fn totals_sum_every_field() {
        let logs = vec![
            log("Oats", MealType::Breakfast, 150.0),
            log("Banana", MealType::Breakfast, 105.0),
            log("Chicken", MealType::Dinner, 300.0),
        ];
        let t = totals(&logs);
        assert_eq!(t.calories, 555.0);
        assert_eq!(t.protein, 3.0);
        assert_eq!(t.carbs, 6.0);
        assert_eq!(t.fats, 1.5);
    }

    #[test]
    fn totals_of_empty_input_are_zero() {
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn entries_land_only_in_their_own_bucket() {
        let logs = vec![
            log("Oats", MealType::Breakfast, 150.0),
            log("Salad", MealType::Lunch, 120.0),
            log("Chips", MealType::Snack, 200.0),
        ];
        let groups = group_by_meal(&logs);
        assert_eq!(groups.breakfast.len(), 1);
        assert_eq!(groups.breakfast[0].food_name, "Oats");
        assert_eq!(groups.lunch.len(), 1);
        assert_eq!(groups.snack.len(), 1);
        assert!(groups.dinner.is_empty());
    }

    #[test]
    fn buckets_preserve_relative_order() {
        let logs = vec![
            log("First", MealType::Lunch, 1.0),
            log("Break", MealType::Breakfast, 1.0),
            log("Second", MealType::Lunch, 2.0),
            log("Third", MealType::Lunch, 3.0),
        ];
        let groups = group_by_meal(&logs);
        let names: Vec<_> = groups.lunch.iter().map(|l| l.food_name.as_str()).collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn empty_buckets_serialize_as_empty_arrays() {
        let json = serde_json::to_value(group_by_meal(&[])).unwrap();
        for key in ["BREAKFAST", "LUNCH", "DINNER", "SNACK"] {
            assert_eq!(json[key], serde_json::json!([]));
        }
    }
}
