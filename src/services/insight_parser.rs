use std::sync::OnceLock;

use regex::Regex;

use crate::models::InsightReport;

// Compiled once; `parse` sits on every commentary refresh.
fn insights_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?i)behavioral insights[:：]*").unwrap())
}

fn suggestions_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?i)personalized suggestions[:：]*").unwrap())
}

/// Splits the raw AI commentary blob into categorized bullet lists.
///
/// The generator is asked to produce two labeled sections, "Behavioral
/// Insights" then "Personalized Suggestions", but nothing guarantees it
/// complied. Slicing is order-dependent: the suggestions marker is only
/// looked for after the insights marker when the latter is present. A missing
/// marker yields an empty region, which is a degraded-but-valid result, not
/// an error. Item order within each region is preserved as written.
pub fn parse(raw: &str) -> InsightReport {
    let (insights_region, suggestions_region) = match insights_marker().find(raw) {
        Some(start) => {
            let rest = &raw[start.end()..];
            match suggestions_marker().find(rest) {
                Some(split) => (&rest[..split.start()], &rest[split.end()..]),
                None => (rest, ""),
            }
        }
        None => match suggestions_marker().find(raw) {
            Some(split) => ("", &raw[split.end()..]),
            None => ("", ""),
        },
    };

    InsightReport {
        insights: split_items(insights_region),
        suggestions: split_items(suggestions_region),
    }
}

// Items are separated by line breaks or by the `*` emphasis character the
// generator uses for bold markup. Fragments with no alphanumeric content are
// markup residue, not items.
fn split_items(region: &str) -> Vec<String> {
    region
        .split(['\n', '\r', '*'])
        .map(str::trim)
        .filter(|item| !item.is_empty() && item.chars().any(char::is_alphanumeric))
        .map(str::to_string)
        .collect()
}
