//! Pure nutrition arithmetic shared by the HTTP features: portion scaling,
//! meal-log summaries, dish-set matching and daily targets.

pub mod aggregate;
pub mod matcher;
pub mod summary;
pub mod target;

pub use aggregate::{aggregate_line_items, LineItem, NutrientProfile, NutritionTotals};
pub use matcher::{match_meals_by_dishes, MatchMode, MatchedMeal, TempMealLine, TempMealRecord};
pub use summary::{select_in_range, summarize_meals, MealRecord, MealSummary};
pub use target::{daily_target, Biometrics, DailyTarget, Goal, Sex};
