use super::Conjunction;
use crate::policy::{PolicyDatabase, PolicyRecord, UsagePolicy};
use core::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

/// A node of a parsed license expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionNode {
    Simple(SimpleExpression),
    Compound(CompoundExpression),
}

impl ExpressionNode {
    /// The usage policy this node resolved to
    #[must_use]
    pub const fn resolved(&self) -> UsagePolicy {
        match self {
            Self::Simple(simple) => simple.resolved,
            Self::Compound(compound) => compound.resolved,
        }
    }

    #[must_use]
    pub const fn as_simple(&self) -> Option<&SimpleExpression> {
        match self {
            Self::Simple(simple) => Some(simple),
            Self::Compound(_) => None,
        }
    }

    #[must_use]
    pub const fn as_compound(&self) -> Option<&CompoundExpression> {
        match self {
            Self::Simple(_) => None,
            Self::Compound(compound) => Some(compound),
        }
    }
}

impl Display for ExpressionNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Simple(simple) => write!(f, "{simple}"),
            Self::Compound(compound) => write!(f, "({compound})"),
        }
    }
}

/// A single license identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleExpression {
    token: String,
    has_plus_suffix: bool,
    resolved: UsagePolicy,
    matched_record: Option<Arc<PolicyRecord>>,
}

impl SimpleExpression {
    /// Resolve `token` against the database.
    ///
    /// The token is looked up exactly as written: a trailing `+` is noted but kept, so
    /// `Apache-2.0+` only matches a record that lists `Apache-2.0+` itself.
    #[must_use]
    pub fn resolve(db: &PolicyDatabase, token: &str) -> Self {
        let (resolved, matched_record) = db.find_by_id(token);

        Self {
            token: token.to_string(),
            has_plus_suffix: token.ends_with('+'),
            resolved,
            matched_record,
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub const fn has_plus_suffix(&self) -> bool {
        self.has_plus_suffix
    }

    #[must_use]
    pub const fn resolved(&self) -> UsagePolicy {
        self.resolved
    }

    #[must_use]
    pub fn matched_record(&self) -> Option<&PolicyRecord> {
        self.matched_record.as_deref()
    }
}

impl Display for SimpleExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.token)
    }
}

/// Two operands joined by a conjunction.
///
/// Either side may be missing when the expression was malformed. The resolved policy is
/// computed once, after both sides are complete, and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundExpression {
    pub(super) left: Option<Box<ExpressionNode>>,
    pub(super) right: Option<Box<ExpressionNode>>,
    pub(super) conjunction: Conjunction,
    pub(super) left_exception: Option<String>,
    pub(super) right_exception: Option<String>,
    pub(super) resolved: UsagePolicy,
}

impl CompoundExpression {
    #[must_use]
    pub fn left(&self) -> Option<&ExpressionNode> {
        self.left.as_deref()
    }

    #[must_use]
    pub fn right(&self) -> Option<&ExpressionNode> {
        self.right.as_deref()
    }

    #[must_use]
    pub const fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    /// The `WITH` exception attached to the left operand
    #[must_use]
    pub fn left_exception(&self) -> Option<&str> {
        self.left_exception.as_deref()
    }

    /// The `WITH` exception attached to the right operand
    #[must_use]
    pub fn right_exception(&self) -> Option<&str> {
        self.right_exception.as_deref()
    }

    #[must_use]
    pub const fn resolved(&self) -> UsagePolicy {
        self.resolved
    }
}

impl Display for CompoundExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_operand(f, self.left.as_deref(), self.left_exception.as_deref())?;

        if self.conjunction != Conjunction::None {
            write!(f, " {}", self.conjunction)?;
        }

        if self.right.is_some() || self.right_exception.is_some() {
            f.write_str(" ")?;
            write_operand(f, self.right.as_deref(), self.right_exception.as_deref())?;
        }

        Ok(())
    }
}

fn write_operand(f: &mut Formatter<'_>, operand: Option<&ExpressionNode>, exception: Option<&str>) -> FmtResult {
    match (operand, exception) {
        (Some(operand), Some(exception)) => write!(f, "{operand} WITH {exception}"),
        (Some(operand), None) => write!(f, "{operand}"),
        (None, Some(exception)) => write!(f, "WITH {exception}"),
        (None, None) => Ok(()),
    }
}
