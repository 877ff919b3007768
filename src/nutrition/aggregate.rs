use serde::{Deserialize, Serialize};

/// Macronutrient values of a dish, expressed per 100 grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrate: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrate: f64,
    pub fat: f64,
}

/// One dish portion: a per-100g profile and the weight eaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItem {
    pub profile: NutrientProfile,
    pub weight_grams: f64,
}

impl LineItem {
    pub fn new(profile: NutrientProfile, weight_grams: f64) -> Self {
        Self {
            profile,
            weight_grams,
        }
    }
}

impl NutritionTotals {
    fn add_scaled(&mut self, item: &LineItem) {
        let factor = item.weight_grams / 100.0;
        self.calories += item.profile.calories * factor;
        self.protein += item.profile.protein * factor;
        self.carbohydrate += item.profile.carbohydrate * factor;
        self.fat += item.profile.fat * factor;
    }

    pub fn rounded(self) -> Self {
        Self {
            calories: round1(self.calories),
            protein: round1(self.protein),
            carbohydrate: round1(self.carbohydrate),
            fat: round1(self.fat),
        }
    }
}

/// Sums `profile * weight / 100` over all items, rounding each total to one
/// decimal. An empty list yields zeros.
pub fn aggregate_line_items<'a, I>(items: I) -> NutritionTotals
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let mut totals = NutritionTotals::default();
    for item in items {
        totals.add_scaled(item);
    }
    totals.rounded()
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(calories: f64, protein: f64, carbohydrate: f64, fat: f64) -> NutrientProfile {
        NutrientProfile {
            calories,
            protein,
            carbohydrate,
            fat,
        }
    }

    fn close(a: &NutritionTotals, b: &NutritionTotals, tol: f64) -> bool {
        (a.calories - b.calories).abs() <= tol
            && (a.protein - b.protein).abs() <= tol
            && (a.carbohydrate - b.carbohydrate).abs() <= tol
            && (a.fat - b.fat).abs() <= tol
    }

    #[test]
    fn empty_list_is_all_zero() {
        let totals = aggregate_line_items(&Vec::<LineItem>::new());
        assert_eq!(totals, NutritionTotals::default());
    }

    #[test]
    fn single_portion_scales_by_weight() {
        let items = [LineItem::new(profile(200.0, 20.0, 10.0, 5.0), 150.0)];
        let totals = aggregate_line_items(&items);
        assert_eq!(
            totals,
            NutritionTotals {
                calories: 300.0,
                protein: 30.0,
                carbohydrate: 15.0,
                fat: 7.5,
            }
        );
    }

    #[test]
    fn totals_are_rounded_to_one_decimal() {
        let items = [LineItem::new(profile(123.0, 4.56, 7.89, 0.33), 33.0)];
        let totals = aggregate_line_items(&items);
        assert_eq!(totals.calories, 40.6);
        assert_eq!(totals.protein, 1.5);
        assert_eq!(totals.carbohydrate, 2.6);
        assert_eq!(totals.fat, 0.1);
    }

    #[test]
    fn doubling_weights_doubles_totals() {
        let items = vec![
            LineItem::new(profile(165.0, 31.0, 0.0, 3.6), 120.0),
            LineItem::new(profile(130.0, 2.7, 28.2, 0.3), 180.0),
            LineItem::new(profile(34.0, 2.8, 6.6, 0.4), 75.0),
        ];
        let doubled: Vec<LineItem> = items
            .iter()
            .map(|i| LineItem::new(i.profile, i.weight_grams * 2.0))
            .collect();

        let single = aggregate_line_items(&items);
        let double = aggregate_line_items(&doubled);
        let expected = NutritionTotals {
            calories: single.calories * 2.0,
            protein: single.protein * 2.0,
            carbohydrate: single.carbohydrate * 2.0,
            fat: single.fat * 2.0,
        };
        assert!(close(&double, &expected, 0.1 + 1e-9), "{double:?} vs {expected:?}");
    }

    #[test]
    fn order_does_not_matter() {
        let mut items = vec![
            LineItem::new(profile(52.0, 0.3, 13.8, 0.2), 182.0),
            LineItem::new(profile(250.0, 26.0, 0.0, 15.0), 90.0),
            LineItem::new(profile(389.0, 16.9, 66.3, 6.9), 40.0),
            LineItem::new(profile(0.0, 0.0, 0.0, 0.0), 500.0),
        ];
        let forward = aggregate_line_items(&items);
        items.reverse();
        assert_eq!(aggregate_line_items(&items), forward);
        items.swap(0, 2);
        assert_eq!(aggregate_line_items(&items), forward);
    }

    #[test]
    fn zero_inputs_give_zero_totals() {
        let items = [
            LineItem::new(profile(200.0, 20.0, 10.0, 5.0), 0.0),
            LineItem::new(NutrientProfile::default(), 250.0),
        ];
        assert_eq!(aggregate_line_items(&items), NutritionTotals::default());
    }
}
