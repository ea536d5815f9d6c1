//! Display Formatting
//!
//! Pure string helpers used by the views.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Anything that is not an ASCII word character or whitespace
static SYMBOLS: OnceLock<Regex> = OnceLock::new();

fn symbols() -> &'static Regex {
    SYMBOLS.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid symbol regex"))
}

/// Long US-style date, e.g. "Sunday, October 18, 2026"
pub fn format_date<D: Datelike>(date: &D) -> String {
    match NaiveDate::from_ymd_opt(date.year(), date.month(), date.day()) {
        Some(day) => day.format("%A, %B %-d, %Y").to_string(),
        None => String::new(),
    }
}

/// Replace every symbol with a space, then lowercase
pub fn normalize_text(text: &str) -> String {
    symbols().replace_all(text, " ").to_lowercase()
}
