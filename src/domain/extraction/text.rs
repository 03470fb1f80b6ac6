use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\d.]+").expect("number pattern is valid"));

/// Parse a selector group; an invalid one matches nothing.
pub(crate) fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Concatenated descendant text, the `textContent` of the element
pub(crate) fn text_content(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Trimmed text of the first descendant matching `css`, if non-empty
pub(crate) fn child_text(element: &ElementRef<'_>, css: &str) -> Option<String> {
    let selector = selector(css)?;
    let child = element.select(&selector).next()?;
    non_empty(text_content(&child).trim())
}

pub(crate) fn attr(element: &ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).and_then(non_empty)
}

/// First run of digits and dots, e.g. `"4.0"` out of `"4.0 out of 5 stars"`
pub(crate) fn first_number(text: &str) -> Option<String> {
    NUMBER_PATTERN.find(text).map(|m| m.as_str().to_string())
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
