//! Turning scraped titles and button labels into single path components.

/// Placeholder for a component that would otherwise be empty or a dot entry.
const PLACEHOLDER: &str = "_";

/// Makes `name` safe to use as exactly one path component.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Trims surrounding whitespace
/// - Maps "", "." and ".." to `_`
///
/// Spaces and punctuation inside the name are kept as-is.
pub fn sanitize_component(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}
