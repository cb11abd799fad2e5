//! Reserved words of the license expression language

pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const WITH: &str = "WITH";

/// Returns `true` if any word of `text` is a conjunction or preposition.
///
/// Words are split the way expressions are tokenized: on whitespace and on either side of
/// every parenthesis, so `OR(` and `)AND` both count.
#[must_use]
pub fn contains_keyword(text: &str) -> bool {
    text.replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .any(|word| matches!(word, AND | OR | WITH))
}
