use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use super::aggregate::{aggregate_line_items, LineItem, NutritionTotals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring containment.
    Fuzzy,
    /// Case-insensitive full equality.
    Exact,
}

impl MatchMode {
    /// Both arguments must already be lowercased.
    fn accepts(self, dish_name: &str, token: &str) -> bool {
        match self {
            MatchMode::Fuzzy => dish_name.contains(token),
            MatchMode::Exact => dish_name == token,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TempMealLine {
    pub dish_name: String,
    pub line: LineItem,
}

/// A provisional meal with its items already joined to their dishes.
#[derive(Debug, Clone)]
pub struct TempMealRecord {
    pub id: Uuid,
    pub name: String,
    pub items: Vec<TempMealLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainedDish {
    pub dish_name: String,
    pub weight_grams: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedMeal {
    pub id: Uuid,
    pub name: String,
    pub totals: NutritionTotals,
    pub items: Vec<ContainedDish>,
}

impl TempMealRecord {
    pub fn totals(&self) -> NutritionTotals {
        aggregate_line_items(self.items.iter().map(|i| &i.line))
    }

    pub fn to_matched(&self) -> MatchedMeal {
        MatchedMeal {
            id: self.id,
            name: self.name.clone(),
            totals: self.totals(),
            items: self
                .items
                .iter()
                .map(|i| ContainedDish {
                    dish_name: i.dish_name.clone(),
                    weight_grams: i.line.weight_grams,
                })
                .collect(),
        }
    }

    /// True when every token is matched by at least one item. One item may
    /// satisfy several tokens.
    pub fn contains_all(&self, tokens: &[String], mode: MatchMode) -> bool {
        let names: Vec<String> = self
            .items
            .iter()
            .map(|i| i.dish_name.to_lowercase())
            .collect();
        tokens
            .iter()
            .all(|token| names.iter().any(|name| mode.accepts(name, token)))
    }
}

/// Splits a comma-separated `dishes` parameter.
pub fn split_dish_list(raw: &str) -> Vec<&str> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').collect()
}

/// Trims, drops empties and lowercases.
pub fn clean_tokens<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Returns each candidate (once) whose dishes satisfy every token under
/// `mode`, with its totals computed from the item portions.
pub fn match_meals_by_dishes<S: AsRef<str>>(
    candidates: &[TempMealRecord],
    raw_tokens: &[S],
    mode: MatchMode,
) -> Vec<MatchedMeal> {
    let tokens = clean_tokens(raw_tokens);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter(|meal| meal.contains_all(&tokens, mode))
        .filter(|meal| seen.insert(meal.id))
        .map(TempMealRecord::to_matched)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::aggregate::NutrientProfile;

    fn line(dish_name: &str, calories: f64, weight_grams: f64) -> TempMealLine {
        TempMealLine {
            dish_name: dish_name.to_string(),
            line: LineItem::new(
                NutrientProfile {
                    calories,
                    protein: calories / 10.0,
                    carbohydrate: calories / 20.0,
                    fat: calories / 40.0,
                },
                weight_grams,
            ),
        }
    }

    fn meal(name: &str, items: Vec<TempMealLine>) -> TempMealRecord {
        TempMealRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            items,
        }
    }

    fn fixtures() -> Vec<TempMealRecord> {
        vec![
            meal(
                "A",
                vec![line("Chicken Breast", 165.0, 150.0), line("Rice", 130.0, 200.0)],
            ),
            meal("B", vec![line("chicken", 200.0, 100.0), line("rice", 130.0, 100.0)]),
            meal("C", vec![line("Fried Rice", 180.0, 250.0)]),
            meal("D", vec![line("Garden Salad", 40.0, 120.0)]),
        ]
    }

    fn names(found: &[MatchedMeal]) -> Vec<&str> {
        found.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn no_tokens_means_no_results() {
        let meals = fixtures();
        for mode in [MatchMode::Fuzzy, MatchMode::Exact] {
            assert!(match_meals_by_dishes::<&str>(&meals, &[], mode).is_empty());
            assert!(match_meals_by_dishes(&meals, &["  ", ""], mode).is_empty());
        }
    }

    #[test]
    fn exact_excludes_partial_names_fuzzy_includes_them() {
        let meals = fixtures();
        let tokens = ["chicken", "rice"];

        let exact = match_meals_by_dishes(&meals, &tokens, MatchMode::Exact);
        assert_eq!(names(&exact), vec!["B"]);

        let fuzzy = match_meals_by_dishes(&meals, &tokens, MatchMode::Fuzzy);
        assert_eq!(names(&fuzzy), vec!["A", "B"]);
    }

    #[test]
    fn exact_is_case_insensitive() {
        let meals = fixtures();
        let found = match_meals_by_dishes(&meals, &["CHICKEN BREAST", " rice "], MatchMode::Exact);
        assert_eq!(names(&found), vec!["A"]);
    }

    #[test]
    fn exact_results_are_subset_of_fuzzy() {
        let meals = fixtures();
        let token_sets: Vec<Vec<&str>> = vec![
            vec!["rice"],
            vec!["chicken"],
            vec!["Chicken Breast", "Rice"],
            vec!["fried rice"],
            vec!["salad", "rice"],
        ];
        for tokens in token_sets {
            let exact = match_meals_by_dishes(&meals, &tokens, MatchMode::Exact);
            let fuzzy = match_meals_by_dishes(&meals, &tokens, MatchMode::Fuzzy);
            for m in &exact {
                assert!(fuzzy.iter().any(|f| f.id == m.id), "{tokens:?}");
            }
        }
    }

    #[test]
    fn one_item_may_satisfy_several_tokens() {
        let meals = fixtures();
        let found = match_meals_by_dishes(&meals, &["fried", "rice"], MatchMode::Fuzzy);
        assert_eq!(names(&found), vec!["C"]);
    }

    #[test]
    fn duplicate_candidates_are_reported_once() {
        let mut meals = fixtures();
        let dup = meals[2].clone();
        meals.push(dup);
        let found = match_meals_by_dishes(&meals, &["fried rice"], MatchMode::Exact);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn matched_meal_carries_rounded_totals_and_portions() {
        let meals = fixtures();
        let found = match_meals_by_dishes(&meals, &["salad"], MatchMode::Fuzzy);
        assert_eq!(found.len(), 1);
        let salad = &found[0];
        assert_eq!(salad.totals.calories, 48.0);
        assert_eq!(salad.totals.protein, 4.8);
        assert_eq!(salad.totals.carbohydrate, 2.4);
        assert_eq!(salad.totals.fat, 1.2);
        assert_eq!(
            salad.items,
            vec![ContainedDish {
                dish_name: "Garden Salad".into(),
                weight_grams: 120.0
            }]
        );
    }

    #[test]
    fn split_and_clean_tokens() {
        assert!(split_dish_list("").is_empty());
        let raw = split_dish_list(" Chicken , ,Rice,");
        assert_eq!(clean_tokens(&raw), vec!["chicken", "rice"]);
    }
}
