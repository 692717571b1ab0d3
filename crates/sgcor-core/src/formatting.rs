//! Display formatting for monetary amounts, ratios, and missing values.

/// Placeholder shown for a missing value.
pub const MISSING_PLACEHOLDER: &str = "—";

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use sgcor_core::formatting::format_number;
///
/// assert_eq!(format_number(2543.75, 2), "2,543.75");
/// assert_eq!(format_number(1500000.0, 0), "1,500,000");
/// assert_eq!(format_number(-312.5, 1), "-312.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Thousands grouping works on the absolute value; the sign is re-applied
    // at the end.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places, nudged by a half ULP so IEEE 754
    // midpoints land on the expected side.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        // `frac_str` starts with "0.", e.g. "0.75"; keep only the ".75".
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount in Brazilian reais with two decimal places.
///
/// # Examples
///
/// ```
/// use sgcor_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56), "R$ 1,234.56");
/// assert_eq!(format_currency(0.0),     "R$ 0.00");
/// assert_eq!(format_currency(-9.99),   "R$ -9.99");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("R$ {}", format_number(amount, 2))
}

/// Format a ratio already expressed in percent, e.g. `12.345` → `"12.3%"`.
///
/// # Examples
///
/// ```
/// use sgcor_core::formatting::format_percent;
///
/// assert_eq!(format_percent(12.345), "12.3%");
/// assert_eq!(format_percent(-4.0),   "-4.0%");
/// ```
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value, 1))
}

/// Format an optional value, substituting the missing placeholder for `None`.
///
/// # Examples
///
/// ```
/// use sgcor_core::formatting::format_opt;
///
/// assert_eq!(format_opt(Some(1234.5), 2), "1,234.50");
/// assert_eq!(format_opt(None, 2), "—");
/// ```
pub fn format_opt(value: Option<f64>, decimals: u32) -> String {
    match value {
        Some(v) => format_number(v, decimals),
        None => MISSING_PLACEHOLDER.to_string(),
    }
}

/// Insert `,` separators every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
