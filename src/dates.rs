use time::{format_description::FormatItem, macros::format_description, Date};

use crate::errors::ApiError;

pub const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw.trim(), ISO_DATE)
        .map_err(|_| ApiError::invalid_input("Date format must be YYYY-MM-DD"))
}

/// Inclusive date range from two optional query values.
pub fn parse_date_range(start: Option<&str>, end: Option<&str>) -> Result<(Date, Date), ApiError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ApiError::invalid_input("Please provide start and end dates"));
    };
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err(ApiError::invalid_input("Please provide start and end dates"));
    }
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if end < start {
        return Err(ApiError::invalid_input("end date must not precede start date"));
    }
    Ok((start, end))
}

/// Serde adapter writing dates as `YYYY-MM-DD`.
pub mod iso_date {
    use serde::Serializer;
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, s: S) -> Result<S::Ok, S::Error> {
        let text = date
            .format(super::ISO_DATE)
            .map_err(serde::ser::Error::custom)?;
        s.serialize_str(&text)
    }

    #[cfg(test)]
    pub fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Date, D::Error> {
        use serde::Deserialize;

        let text = String::deserialize(d)?;
        Date::parse(&text, super::ISO_DATE).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-03-09").unwrap(), date!(2024 - 03 - 09));
        assert_eq!(parse_date(" 2024-03-09 ").unwrap(), date!(2024 - 03 - 09));
    }

    #[test]
    fn rejects_malformed_dates() {
        for raw in ["2024/03/09", "09-03-2024", "2024-13-01", "2024-02-30", "yesterday"] {
            let err = parse_date(raw).unwrap_err();
            assert!(matches!(err, ApiError::InvalidInput(_)), "{raw}");
        }
    }

    #[test]
    fn range_requires_both_ends() {
        let err = parse_date_range(Some("2024-01-01"), None).unwrap_err();
        assert_eq!(err.to_string(), "Please provide start and end dates");
        let err = parse_date_range(Some(""), Some("2024-01-01")).unwrap_err();
        assert_eq!(err.to_string(), "Please provide start and end dates");
    }

    #[test]
    fn range_rejects_reversed_bounds() {
        let err = parse_date_range(Some("2024-02-01"), Some("2024-01-31")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn single_day_range_is_valid() {
        let (start, end) = parse_date_range(Some("2024-02-01"), Some("2024-02-01")).unwrap();
        assert_eq!(start, end);
    }

    #[test]
    fn serde_adapter_writes_plain_dates() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Row {
            #[serde(with = "iso_date")]
            day: Date,
        }
        let json = serde_json::to_string(&Row { day: date!(2025 - 11 - 04) }).unwrap();
        assert_eq!(json, r#"{"day":"2025-11-04"}"#);
        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back.day, date!(2025 - 11 - 04));
    }
}
