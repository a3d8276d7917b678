//! HTML views rendered with askama
//!
//! Templates live in `templates/` and receive the lookup result unchanged;
//! display-only transformations happen here through the `title_case` filter.

use crate::models::WeatherResult;
use askama::Template;

/// The form page, with the lookup result when there is one
#[derive(Debug, Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub weather: Option<WeatherResult>,
    pub city: String,
}

impl IndexTemplate {
    /// Empty form shown before anything was submitted
    pub fn awaiting_input() -> Self {
        Self {
            weather: None,
            city: String::new(),
        }
    }

    pub fn with_result(weather: WeatherResult, city: String) -> Self {
        Self {
            weather: Some(weather),
            city,
        }
    }
}

/// Generic failure page
#[derive(Debug, Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub status: u16,
    pub reason: &'a str,
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// Words are separated by whitespace, `-`, `(`, `{`, `[` and `<`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;

    for c in s.chars() {
        if is_word_boundary(c) {
            out.push(c);
            word_start = true;
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '(' | '{' | '[' | '<')
}

mod filters {
    pub fn title_case<T: std::fmt::Display>(s: T) -> ::askama::Result<String> {
        Ok(super::title_case(&s.to_string()))
    }
}
