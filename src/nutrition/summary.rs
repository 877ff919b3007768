use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use super::aggregate::NutritionTotals;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Stored totals of one logged meal, as read back from the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct MealRecord<'a> {
    pub category: Option<&'a str>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealSummary {
    pub count: u64,
    pub by_category: Vec<CategoryCount>,
    pub totals: NutritionTotals,
}

/// A missing stored total contributes nothing to a sum.
pub fn coalesce_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

pub fn category_label(category: Option<&str>) -> &str {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => UNCATEGORIZED,
    }
}

/// Keeps the records whose day falls in `start..=end`.
pub fn select_in_range<T, F>(
    records: impl IntoIterator<Item = T>,
    start: Date,
    end: Date,
    day_of: F,
) -> Vec<T>
where
    F: Fn(&T) -> Date,
{
    records
        .into_iter()
        .filter(|r| (start..=end).contains(&day_of(r)))
        .collect()
}

/// Counts the records, groups them by category label (sorted by label) and
/// sums their stored totals under the coalesce-to-zero policy.
pub fn summarize_meals<'a, I>(records: I) -> MealSummary
where
    I: IntoIterator<Item = MealRecord<'a>>,
{
    let mut count = 0u64;
    let mut groups: BTreeMap<String, u64> = BTreeMap::new();
    let mut totals = NutritionTotals::default();

    for record in records {
        count += 1;
        *groups
            .entry(category_label(record.category).to_string())
            .or_default() += 1;
        totals.calories += coalesce_zero(record.calories);
        totals.protein += coalesce_zero(record.protein);
        totals.carbohydrate += coalesce_zero(record.carbohydrate);
        totals.fat += coalesce_zero(record.fat);
    }

    MealSummary {
        count,
        by_category: groups
            .into_iter()
            .map(|(label, count)| CategoryCount { label, count })
            .collect(),
        totals,
    }
}
