//! Monetary value normalization and BRL formatting.

use serde_json::Value;

/// Parses a monetary value from whatever shape the dataset sent.
///
/// Numbers pass through; strings are stripped of currency symbols and read
/// with the Brazilian convention (`.` thousands, `,` decimals). Anything
/// unparsable, non-finite or of another JSON type yields `0.0`.
pub fn parse_money(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_money_str(s),
        _ => 0.0,
    }
}

/// String form of [`parse_money`].
pub fn parse_money_str(raw: &str) -> f64 {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let normalized = if kept.contains(',') {
        kept.replace('.', "").replace(',', ".")
    } else if kept.matches('.').count() > 1 {
        kept.replace('.', "")
    } else {
        kept
    };

    leading_number(&normalized)
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

/// Longest prefix of the form `-?digits(.digits)?`, if it holds a digit.
fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        None
    } else {
        Some(&s[..end])
    }
}

/// Formats a value as Brazilian reais without cents (`R$ 1.234.568`).
///
/// Zero and non-finite values render as `R$ 0,00`.
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "R$ 0,00".to_string();
    }

    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if value < 0.0 {
        format!("-R$ {}", grouped)
    } else {
        format!("R$ {}", grouped)
    }
}
