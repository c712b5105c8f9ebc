//! Form Input Helpers
//!
//! Inputs hold raw strings; these turn them into typed values.

use chrono::NaiveDate;
use farm_core::domain::serde_helpers::parse_date;

/// Finite number, commas allowed as thousands separators
pub fn parse_number(input: &str) -> Option<f64> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Like [`parse_number`] but empty input is `Ok(None)`
pub fn parse_optional_number(input: &str) -> Result<Option<f64>, String> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_number(input)
        .map(Some)
        .ok_or_else(|| format!("'{}' is not a number", input.trim()))
}

pub fn parse_input_date(input: &str) -> Option<NaiveDate> {
    if input.trim().is_empty() {
        return None;
    }
    parse_date(input)
}

/// Trimmed text, `None` when blank
pub fn optional_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Value for an `<input type="date">`
pub fn date_input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 1,250.5 "), Some(1250.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_parse_optional_number() {
        assert_eq!(parse_optional_number("  "), Ok(None));
        assert_eq!(parse_optional_number("12"), Ok(Some(12.0)));
        assert!(parse_optional_number("twelve").is_err());
    }

    #[test]
    fn test_dates_and_text() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_input_date("2024-01-01"), Some(date));
        assert_eq!(parse_input_date(""), None);
        assert_eq!(date_input_value(date), "2024-01-01");
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text(" Nyandarua "), Some("Nyandarua".to_string()));
    }
}
