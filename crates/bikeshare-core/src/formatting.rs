/// Width of the horizontal rule printed between report sections.
pub const RULE_WIDTH: usize = 50;

/// A horizontal rule of [`RULE_WIDTH`] dashes.
pub fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by half an ULP at the target precision so exact midpoints round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // "0.50" -> ".50"
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format an integer count with thousands separators.
///
/// ```
/// use bikeshare_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(238_889), "238,889");
/// ```
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// Format a duration in seconds as days, hours, minutes and seconds.
///
/// Zero-valued leading units are dropped; fractional seconds are rounded.
///
/// ```
/// use bikeshare_core::formatting::format_duration;
///
/// assert_eq!(format_duration(45.0), "45s");
/// assert_eq!(format_duration(3600.0), "1h 0m 0s");
/// assert_eq!(format_duration(93784.0), "1d 2h 3m 4s");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let secs = total % 60;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, secs)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_width() {
        assert_eq!(rule().len(), RULE_WIDTH);
        assert!(rule().chars().all(|c| c == '-'));
    }

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_no_thousands() {
        assert_eq!(format_number(123.456, 2), "123.46");
    }

    #[test]
    fn test_format_number_millions() {
        assert_eq!(format_number(280_871_787.0, 0), "280,871,787");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    // ── format_count ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_count_exact_thousands() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(999), "999");
    }

    // ── format_duration ──────────────────────────────────────────────────────

    #[test]
    fn test_format_duration_minutes_only() {
        assert_eq!(format_duration(936.6), "15m 37s");
    }

    #[test]
    fn test_format_duration_zero_and_negative() {
        assert_eq!(format_duration(0.0), "0s");
        assert_eq!(format_duration(-5.0), "0s");
    }

    #[test]
    fn test_format_duration_days() {
        assert_eq!(format_duration(2.0 * 86_400.0 + 59.0), "2d 0h 0m 59s");
    }
}
