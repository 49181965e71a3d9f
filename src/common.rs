use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use rand::{seq::SliceRandom, Rng};
use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(.*?)\}").unwrap());

/// Replaces `{key}` with its value, unknown keys stay as written.
pub fn fill(template: &str, values: &[(&str, String)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(key, _)| *key == &caps[1])
                .map(|(_, value)| value.to_owned())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

// month name only in the current year, with the year otherwise
pub fn display_month(date: NaiveDate, current_year: i32, months: &[String; 12], cap: bool) -> String {
    let name = &months[date.month0() as usize];
    let raw = if date.year() == current_year {
        name.to_owned()
    } else {
        format!("{name} {}", date.year())
    };

    if cap {
        capitalize(&raw)
    } else {
        raw
    }
}

fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Splits `!word arg arg` into a lowercase command word and its arguments.
/// Returns None when the prefix is missing or nothing follows it.
pub fn split_command(content: &str, prefix: &str) -> Option<(String, Vec<String>)> {
    let rest = content.strip_prefix(prefix)?;
    let mut words = rest.split_whitespace().map(String::from);
    let command = words.next()?.to_lowercase();
    Some((command, words.collect()))
}

pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [String]) -> Option<&'a str> {
    items.choose(rng).map(String::as_str)
}
