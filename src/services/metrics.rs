//! Display formatting for numeric portfolio fields.
//!
//! Every function here is pure and total: absent, `NaN`, and non-finite
//! inputs produce the `-` placeholder instead of a formatted zero, so an
//! unknown value is never confused with a real one.

/// Rendered in place of any value the feed could not supply.
pub const PLACEHOLDER: &str = "-";

/// Three-way direction of a percentage-valued field. Exact zero is a real,
/// distinct observation in many feeds, so this is not a boolean sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Gain,
    Loss,
    Flat,
}

impl Trend {
    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Gain => "gain",
            Trend::Loss => "loss",
            Trend::Flat => "neutral",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Gain => "▲",
            Trend::Loss => "▼",
            Trend::Flat => "",
        }
    }
}

/// Classifies a percentage-valued field. Unknown values classify as `Flat`;
/// their text form is the placeholder, so no direction is ever shown for them.
pub fn classify(value: Option<f64>) -> Trend {
    match value.filter(|v| v.is_finite()) {
        Some(v) if v > 0.0 => Trend::Gain,
        Some(v) if v < 0.0 => Trend::Loss,
        _ => Trend::Flat,
    }
}

/// Formats a rupee amount with Indian digit grouping (`₹12,34,567.89`).
/// P&L magnitudes use 0 decimals, unit prices 2.
pub fn format_rupees(value: Option<f64>, decimals: usize) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };
    let rendered = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };
    let grouped = group_indian(int_part);
    let sign = if v < 0.0 && rendered.trim_matches(|c| c == '0' || c == '.') != "" {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}₹{grouped}.{frac}"),
        None => format!("{sign}₹{grouped}"),
    }
}

/// Formats an unsigned percentage (`12.3%`), used for allocation shares and
/// win rates.
pub fn format_percent(value: Option<f64>, decimals: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.*}%", decimals, v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Formats a signed percentage with a directional glyph: `▲ +1.23%`,
/// `▼ -0.50%`, or `0.00%` at exactly zero. A value whose magnitude rounds to
/// zero at the requested precision renders as an unsigned zero too, never as
/// `▼ -0.00%`.
pub fn format_signed_percent(value: Option<f64>, decimals: usize) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };
    let magnitude = format!("{:.*}", decimals, v.abs());
    if magnitude.trim_matches(|c| c == '0' || c == '.').is_empty() {
        return format!("{magnitude}%");
    }
    match classify(Some(v)) {
        Trend::Gain => format!("▲ +{magnitude}%"),
        Trend::Loss => format!("▼ -{magnitude}%"),
        Trend::Flat => format!("{magnitude}%"),
    }
}

/// Formats a share quantity, trimming a trailing `.00` for whole lots.
pub fn format_quantity(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return PLACEHOLDER.to_string();
    };
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v:.2}")
    }
}

// Indian grouping: rightmost group of three, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let head_bytes = head.as_bytes();
    let mut end = head_bytes.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
