//! Capture-group helpers shared by the dispatcher and diagnostics.

use regex::Regex;

/// Match `text` against `re` and return its capture groups in order.
///
/// Returns `None` when the pattern does not match so callers can move on to
/// the next candidate. Group 0 (the whole match) is dropped. Optional groups
/// that did not participate become empty strings, keeping every later capture
/// at the index the pattern author expects.
///
/// # Examples
/// ```
/// # use regex::Regex;
/// # use plainbdd_patterns::extract_captures;
/// let re = Regex::new(r"^I have (\d+) (\w+)$").expect("example pattern compiles");
/// assert_eq!(
///     extract_captures(&re, "I have 2 apples"),
///     Some(vec!["2".to_string(), "apples".to_string()]),
/// );
/// assert_eq!(extract_captures(&re, "I have none"), None);
/// ```
#[must_use]
pub fn extract_captures(re: &Regex, text: &str) -> Option<Vec<String>> {
    let caps = re.captures(text)?;
    Some(
        caps.iter()
            .skip(1)
            .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
            .collect(),
    )
}
