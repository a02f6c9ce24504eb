//! Cell text normalization.

use regex::Regex;
use std::sync::LazyLock;

/// Footnote annotation appended by the wiki, e.g. `[note 2]`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FOOTNOTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[note \d+\]").expect("valid regex"));

/// Start of any bracketed annotation left after footnote removal.
const ANNOTATION_START: char = '[';

/// Strip footnote markers and surrounding whitespace from cell text.
///
/// Each `[note N]` marker becomes a single space. Any other bracketed
/// annotation (e.g. `[JE only]`) truncates the text at its opening bracket.
/// Internal whitespace is otherwise left untouched.
///
/// # Examples
/// ```
/// use villager_trades_catalogue::normalize::normalize;
///
/// assert_eq!(normalize("oak log[note 2]"), "oak log");
/// assert_eq!(normalize("  16 "), "16");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let text = FOOTNOTE_PATTERN.replace_all(raw, " ");
    let text = text.trim();

    match text.find(ANNOTATION_START) {
        Some(cut) => text[..cut].trim().to_string(),
        None => text.to_string(),
    }
}
