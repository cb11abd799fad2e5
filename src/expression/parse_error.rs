use core::fmt::{Display, Formatter, Result as FmtResult};

/// Why a license expression could not be given a verdict.
///
/// Errors are scoped to the expression being parsed; they never affect the policy database
/// or other expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A node was finalized without ever seeing `AND` or `OR`, as for a bare identifier
    MissingConjunction,

    /// A `)` appeared with no matching `(`
    UnbalancedParenthesis { position: usize },

    /// `WITH` was not followed by an exception identifier
    MissingException { position: usize },

    /// Parentheses are nested deeper than the parser allows
    NestingTooDeep { limit: usize },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::MissingConjunction => write!(f, "invalid license expression: missing conjunction"),
            Self::UnbalancedParenthesis { position } => {
                write!(f, "invalid license expression: unbalanced ')' at token {position}")
            }
            Self::MissingException { position } => {
                write!(f, "invalid license expression: 'WITH' at token {position} is not followed by an exception")
            }
            Self::NestingTooDeep { limit } => {
                write!(f, "invalid license expression: parentheses nested deeper than {limit} levels")
            }
        }
    }
}

impl core::error::Error for ParseError {}
