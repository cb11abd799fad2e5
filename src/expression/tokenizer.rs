/// Split a license expression into tokens.
///
/// Parentheses always become tokens of their own, even when glued to an identifier or
/// keyword, and any run of whitespace separates tokens.
#[must_use]
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
