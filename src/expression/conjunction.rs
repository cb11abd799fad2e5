use crate::policy::keywords;
use strum::Display;

/// The operator joining the two operands of a compound expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Conjunction {
    #[strum(serialize = "AND")]
    And,

    #[strum(serialize = "OR")]
    Or,

    /// No operator was seen, as for a lone operand
    #[default]
    #[strum(serialize = "")]
    None,
}

impl Conjunction {
    /// Recognizes a conjunction token. Keywords are case-sensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            keywords::AND => Some(Self::And),
            keywords::OR => Some(Self::Or),
            _ => None,
        }
    }
}
