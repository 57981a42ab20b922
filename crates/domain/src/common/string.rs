//! String helpers for free-text input and keyword matching.

/// Trims a value and converts a blank result to `None`.
///
/// Free-text fields (custom prompts, question text) arrive straight from an
/// input box, so surrounding whitespace is not meaningful.
///
/// # Examples
///
/// ```
/// use connection_cards_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank("  hello "), Some("hello".to_string()));
/// assert_eq!(none_if_blank(""), None);
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Returns true if `haystack` contains any of `needles`, ignoring ASCII and
/// Unicode case.
///
/// # Examples
///
/// ```
/// use connection_cards_domain::common::contains_any_ignore_case;
///
/// assert!(contains_any_ignore_case("What's your BIGGEST fear?", &["fear"]));
/// assert!(!contains_any_ignore_case("Describe a perfect day.", &["fear", "secret"]));
/// ```
pub fn contains_any_ignore_case(haystack: &str, needles: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// Extension trait for strings providing `into_trimmed_option` as a method.
///
/// # Examples
///
/// ```
/// use connection_cards_domain::common::StringExt;
///
/// assert_eq!(" hi ".to_string().into_trimmed_option(), Some("hi".to_string()));
/// assert_eq!(String::new().into_trimmed_option(), None);
/// ```
pub trait StringExt {
    /// Converts this string to `None` if blank, otherwise `Some(trimmed)`.
    fn into_trimmed_option(self) -> Option<String>;
}

impl StringExt for String {
    fn into_trimmed_option(self) -> Option<String> {
        none_if_blank(&self)
    }
}

impl StringExt for Option<String> {
    fn into_trimmed_option(self) -> Option<String> {
        self.and_then(|value| none_if_blank(&value))
    }
}
