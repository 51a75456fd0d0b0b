//! Number formatting with Italian separators (`.` for thousands, `,` for decimals).

/// Formats `value` with `decimals` fractional digits and grouped thousands.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// Gridline label: abbreviated with a `k` suffix from 1000 upwards.
pub fn scale_label(value: f64) -> String {
    // Compare at display precision so 999.999 is not shown as "1.000,00".
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.abs() >= 1000.0 {
        let short = format_number(value / 1000.0, 1);
        let short = short.strip_suffix(",0").unwrap_or(&short);
        format!("{short}k")
    } else {
        format_number(value, 2)
    }
}

pub fn price_label(value: f64) -> String {
    format!("{} €", format_number(value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_uses_decimal_comma() {
        assert_eq!(format_number(1234.5, 2), "1.234,50");
        assert_eq!(format_number(1234567.0, 0), "1.234.567");
        assert_eq!(format_number(999.0, 1), "999,0");
        assert_eq!(format_number(0.2, 2), "0,20");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.001, 2), "0,00");
        assert_eq!(format_number(-1500.0, 0), "-1.500");
    }

    #[test]
    fn scale_labels_switch_to_k_suffix() {
        assert_eq!(scale_label(2.42), "2,42");
        assert_eq!(scale_label(999.99), "999,99");
        assert_eq!(scale_label(1000.0), "1k");
        assert_eq!(scale_label(1500.0), "1,5k");
        assert_eq!(scale_label(12_345.0), "12,3k");
    }

    #[test]
    fn values_rounding_up_to_a_thousand_use_k_suffix() {
        assert_eq!(scale_label(999.999), "1k");
        assert_eq!(scale_label(-999.996), "-1k");
        assert_eq!(scale_label(999.994), "999,99");
    }

    #[test]
    fn price_label_appends_currency() {
        assert_eq!(price_label(1586.0), "1.586,00 €");
    }
}
