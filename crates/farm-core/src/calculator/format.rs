//! Display formatting for amounts

/// `1234567.8` → `"KES 1,234,568"`
pub fn format_kes(amount: f64) -> String {
    format!("KES {}", format_number(amount, 0))
}

/// Fixed decimals with comma thousands separators
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_separators() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1_000.0, 0), "1,000");
        assert_eq!(format_number(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-45_000.0, 0), "-45,000");
        assert_eq!(format_number(-0.001, 0), "0");
    }

    #[test]
    fn test_kes() {
        assert_eq!(format_kes(170_000.0), "KES 170,000");
        assert_eq!(format_kes(1_234_567.8), "KES 1,234,568");
        assert_eq!(format_kes(f64::NAN), "KES -");
    }
}
