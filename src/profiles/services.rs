use crate::{
    errors::{ApiError, ApiResult},
    nutrition::{Goal, Sex},
};

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn parse_sex(raw: Option<&str>) -> ApiResult<Option<Sex>> {
    non_blank(raw)
        .map(|s| s.parse::<Sex>().map_err(ApiError::InvalidInput))
        .transpose()
}

pub(crate) fn parse_goal(raw: Option<&str>) -> ApiResult<Option<Goal>> {
    non_blank(raw)
        .map(|g| g.parse::<Goal>().map_err(ApiError::InvalidInput))
        .transpose()
}

pub(crate) fn validate_biometrics(
    age: Option<i32>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
) -> ApiResult<()> {
    if let Some(age) = age {
        if !(1..=120).contains(&age) {
            return Err(ApiError::invalid_input("age must be between 1 and 120"));
        }
    }
    if matches!(height_cm, Some(h) if !(h.is_finite() && h > 0.0)) {
        return Err(ApiError::invalid_input("height_cm must be positive"));
    }
    if matches!(weight_kg, Some(w) if !(w.is_finite() && w > 0.0)) {
        return Err(ApiError::invalid_input("weight_kg must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_enum_values_mean_absent() {
        assert_eq!(parse_sex(None).unwrap(), None);
        assert_eq!(parse_sex(Some("")).unwrap(), None);
        assert_eq!(parse_goal(Some("   ")).unwrap(), None);
        assert_eq!(parse_sex(Some("Female")).unwrap(), Some(Sex::Female));
        assert_eq!(parse_goal(Some("muscle_gain")).unwrap(), Some(Goal::MuscleGain));
    }

    #[test]
    fn unknown_enum_values_are_invalid_input() {
        assert!(matches!(parse_sex(Some("robot")), Err(ApiError::InvalidInput(_))));
        assert!(matches!(parse_goal(Some("cut")), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn biometric_bounds() {
        assert!(validate_biometrics(None, None, None).is_ok());
        assert!(validate_biometrics(Some(20), Some(180.0), Some(75.0)).is_ok());
        assert!(validate_biometrics(Some(0), None, None).is_err());
        assert!(validate_biometrics(Some(121), None, None).is_err());
        assert!(validate_biometrics(None, Some(0.0), None).is_err());
        assert!(validate_biometrics(None, None, Some(-70.0)).is_err());
        assert!(validate_biometrics(None, Some(f64::NAN), None).is_err());
    }
}
