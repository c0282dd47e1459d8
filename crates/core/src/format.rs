//! Display formatting for prices, values and percentages.
//!
//! Follows the dashboard's locale: Spanish (es-ES) number style with the
//! euro sign as suffix, e.g. `52.387,12 €`. Thousands separators appear only
//! from five integer digits up (`2875,34 €` but `52.387,12 €`), as es-ES
//! does. The space before `€` and `%` is a non-breaking space (U+00A0).

/// Placeholder shown for values that cannot be displayed (NaN, ∞).
pub const NOT_AVAILABLE: &str = "N/A";

const NBSP: char = '\u{a0}';
const CURRENCY_SYMBOL: char = '€';

/// Compact suffixes, largest first: (threshold, suffix).
const COMPACT_UNITS: [(f64, &str); 4] = [
    (1e12, "B"),
    (1e9, "mil M"),
    (1e6, "M"),
    (1e3, "mil"),
];

/// Round half away from zero to `decimals` fractional digits.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Currency with precision adapted to magnitude: two decimals from 1 up,
/// four to six decimals below 1 (so sub-cent coins stay readable).
pub fn format_currency(value: f64) -> String {
    match format_currency_plain(value) {
        s if s == NOT_AVAILABLE => s,
        s => format!("{s}{NBSP}{CURRENCY_SYMBOL}"),
    }
}

/// Same as [`format_currency`] without the currency symbol.
pub fn format_currency_plain(value: f64) -> String {
    if value.abs() < 1.0 {
        format_decimal(value, 4, 6)
    } else {
        format_decimal(value, 2, 2)
    }
}

/// Short currency form for large figures: `1,03 B €`, `762,33 M €`.
pub fn format_currency_compact(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let magnitude = value.abs();
    for (threshold, suffix) in COMPACT_UNITS {
        if magnitude >= threshold {
            let scaled = format_decimal(value / threshold, 0, 2);
            return format!("{scaled}{NBSP}{suffix}{NBSP}{CURRENCY_SYMBOL}");
        }
    }
    format!("{}{NBSP}{CURRENCY_SYMBOL}", format_decimal(value, 0, 2))
}

/// Always-signed percentage with two decimals: `+1,72 %`, `-4,33 %`.
/// `value` is already in percent (1.72 means 1.72 %).
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let body = format_decimal(value.abs(), 2, 2);
    let sign = if value < 0.0 && round_to(value, 2) != 0.0 { '-' } else { '+' };
    format!("{sign}{body}{NBSP}%")
}

/// Whole number with thousands grouping: `19.000.000`.
pub fn format_number(value: f64) -> String {
    format_decimal(value, 0, 0)
}

/// es-ES decimal rendering with between `min_frac` and `max_frac` fraction digits.
pub fn format_decimal(value: f64, min_frac: usize, max_frac: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let rounded = round_to(value.abs(), max_frac as u32);
    let fixed = format!("{rounded:.max_frac$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let mut frac = frac_part.to_string();
    while frac.len() > min_frac && frac.ends_with('0') {
        frac.pop();
    }

    let mut out = String::new();
    if value < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push(',');
        out.push_str(&frac);
    }
    out
}

/// Insert `.` every three digits, only when there are at least five digits.
fn group_thousands(digits: &str) -> String {
    if digits.len() < 5 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
