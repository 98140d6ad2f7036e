//! Inline style values.

/// Formats a number the way a stylesheet author would write it: at most three
/// decimals, no trailing zeros.
pub fn number(value: f64) -> String {
    let rounded = format!("{:.3}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

pub fn seconds(value: f64) -> String {
    format!("{}s", number(value))
}

pub fn scale(factor: f64) -> String {
    format!("scale({})", number(factor))
}

pub fn translate_y(pixels: f64) -> String {
    if pixels == 0.0 {
        "translateY(0)".to_string()
    } else {
        format!("translateY({}px)", number(pixels))
    }
}
