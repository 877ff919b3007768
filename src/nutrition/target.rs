//! Daily calorie and macro targets from profile biometrics.
//!
//! BMR uses the Mifflin-St Jeor equation
//! (`10*weight + 6.25*height - 5*age + 5` for men, `- 161` for women), scaled
//! by a fixed light-activity factor to get TDEE, then shifted by the goal.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ACTIVITY_FACTOR: f64 = 1.55;
const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    MuscleGain,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(format!("unknown sex: {other}")),
        }
    }
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::FatLoss => "fat_loss",
            Goal::MuscleGain => "muscle_gain",
        }
    }

    fn plan(self) -> GoalPlan {
        match self {
            Goal::FatLoss => GoalPlan {
                calorie_offset: -500.0,
                protein_per_kg: 2.0,
                carb_share: 0.40,
                fat_share: 0.25,
            },
            Goal::MuscleGain => GoalPlan {
                calorie_offset: 300.0,
                protein_per_kg: 2.2,
                carb_share: 0.45,
                fat_share: 0.25,
            },
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fat_loss" => Ok(Goal::FatLoss),
            "muscle_gain" => Ok(Goal::MuscleGain),
            other => Err(format!("unknown goal: {other}")),
        }
    }
}

struct GoalPlan {
    calorie_offset: f64,
    protein_per_kg: f64,
    carb_share: f64,
    fat_share: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Biometrics {
    pub sex: Option<Sex>,
    pub age: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<Goal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTarget {
    pub calories: i64,
    pub protein: i64,
    pub carbohydrate: i64,
    pub fat: i64,
}

pub fn bmr(sex: Sex, age: i32, height_cm: f64, weight_kg: f64) -> f64 {
    let offset = match sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + offset
}

pub fn tdee(sex: Sex, age: i32, height_cm: f64, weight_kg: f64) -> f64 {
    bmr(sex, age, height_cm, weight_kg) * ACTIVITY_FACTOR
}

/// `None` when any biometric or the goal is missing.
pub fn daily_target(b: &Biometrics) -> Option<DailyTarget> {
    let sex = b.sex?;
    let age = b.age?;
    let height_cm = b.height_cm?;
    let weight_kg = b.weight_kg?;
    let plan = b.goal?.plan();

    let calories = tdee(sex, age, height_cm, weight_kg) + plan.calorie_offset;
    Some(DailyTarget {
        calories: calories.round() as i64,
        protein: (weight_kg * plan.protein_per_kg).round() as i64,
        carbohydrate: (calories * plan.carb_share / KCAL_PER_G_CARB).round() as i64,
        fat: (calories * plan.fat_share / KCAL_PER_G_FAT).round() as i64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(goal: Goal) -> Biometrics {
        Biometrics {
            sex: Some(Sex::Male),
            age: Some(20),
            height_cm: Some(180.0),
            weight_kg: Some(75.0),
            goal: Some(goal),
        }
    }

    #[test]
    fn male_fat_loss() {
        // 750 + 1125 - 100 + 5
        assert_eq!(bmr(Sex::Male, 20, 180.0, 75.0), 1780.0);
        assert!((tdee(Sex::Male, 20, 180.0, 75.0) - 2759.0).abs() < 1e-9);

        let target = daily_target(&complete(Goal::FatLoss)).unwrap();
        assert_eq!(
            target,
            DailyTarget {
                calories: 2259,
                protein: 150,
                carbohydrate: 226,
                fat: 63,
            }
        );
    }

    #[test]
    fn tdee_chain_for_bmr_1692_5() {
        let b = Biometrics {
            height_cm: Some(166.0),
            ..complete(Goal::FatLoss)
        };
        assert_eq!(bmr(Sex::Male, 20, 166.0, 75.0), 1692.5);
        assert!((tdee(Sex::Male, 20, 166.0, 75.0) - 2623.375).abs() < 1e-9);

        let target = daily_target(&b).unwrap();
        assert_eq!(target.calories, 2123);
        assert_eq!(target.protein, 150);
        assert_eq!(target.carbohydrate, 212);
        assert_eq!(target.fat, 59);
    }

    #[test]
    fn male_muscle_gain() {
        // 2759 + 300 = 3059
        let target = daily_target(&complete(Goal::MuscleGain)).unwrap();
        assert_eq!(target.calories, 3059);
        assert_eq!(target.protein, 165);
        assert_eq!(target.carbohydrate, 344);
        assert_eq!(target.fat, 85);
    }

    #[test]
    fn female_offset() {
        assert_eq!(bmr(Sex::Female, 30, 165.0, 60.0), 600.0 + 1031.25 - 150.0 - 161.0);
    }

    #[test]
    fn missing_biometrics_yield_no_target() {
        for goal in [Goal::FatLoss, Goal::MuscleGain] {
            let base = complete(goal);
            let variants = [
                Biometrics { sex: None, ..base },
                Biometrics { age: None, ..base },
                Biometrics { height_cm: None, ..base },
                Biometrics { weight_kg: None, ..base },
            ];
            for b in variants {
                assert_eq!(daily_target(&b), None, "{b:?}");
            }
        }
        assert_eq!(daily_target(&Biometrics::default()), None);
    }

    #[test]
    fn missing_goal_yields_no_target() {
        let b = Biometrics {
            goal: None,
            ..complete(Goal::FatLoss)
        };
        assert_eq!(daily_target(&b), None);
    }

    #[test]
    fn parses_enum_strings() {
        assert_eq!("Male".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!(" female ".parse::<Sex>(), Ok(Sex::Female));
        assert!("other".parse::<Sex>().is_err());
        assert_eq!("fat_loss".parse::<Goal>(), Ok(Goal::FatLoss));
        assert_eq!("MUSCLE_GAIN".parse::<Goal>(), Ok(Goal::MuscleGain));
        assert!("bulk".parse::<Goal>().is_err());
        assert_eq!(Goal::MuscleGain.as_str(), "muscle_gain");
        assert_eq!(Sex::Female.as_str(), "female");
    }
}
