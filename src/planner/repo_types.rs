use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::{LineItem, NutrientProfile, TempMealLine, TempMealRecord};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TempMeal {
    pub id: Uuid,
    pub name: String,
    pub created_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One temp-meal item joined to its meal and dish.
#[derive(Debug, Clone, FromRow)]
pub struct TempMealItemRow {
    pub temp_meal_id: Uuid,
    pub temp_meal_name: String,
    pub dish_name: String,
    pub weight_grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrate: f64,
    pub fat: f64,
}

impl TempMealItemRow {
    fn into_line(self) -> TempMealLine {
        TempMealLine {
            dish_name: self.dish_name,
            line: LineItem::new(
                NutrientProfile {
                    calories: self.calories,
                    protein: self.protein,
                    carbohydrate: self.carbohydrate,
                    fat: self.fat,
                },
                self.weight_grams,
            ),
        }
    }
}

/// Groups rows ordered by temp meal into one record per meal, keeping the
/// row order.
pub fn group_records(rows: Vec<TempMealItemRow>) -> Vec<TempMealRecord> {
    let mut records: Vec<TempMealRecord> = Vec::new();
    for row in rows {
        if let Some(last) = records.last_mut().filter(|r| r.id == row.temp_meal_id) {
            last.items.push(row.into_line());
            continue;
        }
        records.push(TempMealRecord {
            id: row.temp_meal_id,
            name: row.temp_meal_name.clone(),
            items: vec![row.into_line()],
        });
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(meal: Uuid, meal_name: &str, dish: &str, grams: f64) -> TempMealItemRow {
        TempMealItemRow {
            temp_meal_id: meal,
            temp_meal_name: meal_name.into(),
            dish_name: dish.into(),
            weight_grams: grams,
            calories: 100.0,
            protein: 10.0,
            carbohydrate: 10.0,
            fat: 1.0,
        }
    }

    #[test]
    fn groups_consecutive_rows_per_meal() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let records = group_records(vec![
            row(a, "A", "Chicken", 150.0),
            row(a, "A", "Rice", 200.0),
            row(b, "B", "Salad", 80.0),
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].items.len(), 2);
        assert_eq!(records[0].items[1].dish_name, "Rice");
        assert_eq!(records[1].items[0].line.weight_grams, 80.0);
        assert_eq!(records[0].totals().calories, 350.0);
    }

    #[test]
    fn no_rows_no_records() {
        assert!(group_records(Vec::new()).is_empty());
    }
}
