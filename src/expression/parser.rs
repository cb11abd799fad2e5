//! Recursive-descent parser that resolves license expressions while building them
//!
//! The parser walks the token sequence with an explicit cursor. Every parenthesized group
//! is parsed by a recursive call that returns the finished subtree together with the index
//! just past its closing `)`, so no parser state is shared between nesting levels.
//!
//! Each nesting level tracks a single conjunction. A second `AND`/`OR` at the same level
//! replaces the first, and an operand arriving on an already occupied side replaces the
//! previous operand: `A OR B AND C` parses as `A AND C`.

use super::{CompoundExpression, Conjunction, ExpressionNode, ParseError, SimpleExpression, combine, tokenize};
use crate::policy::{PolicyDatabase, UsagePolicy, keywords};
use core::fmt::{Display, Formatter, Result as FmtResult};

/// Maximum depth of nested parentheses
pub const MAX_NESTING_DEPTH: usize = 64;

const LOG_TARGET: &str = "expression";

const LEFT_PAREN: &str = "(";
const RIGHT_PAREN: &str = ")";

/// A parsed license expression and its overall verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExpression {
    root: CompoundExpression,
    error: Option<ParseError>,
}

impl ParsedExpression {
    #[must_use]
    pub const fn root(&self) -> &CompoundExpression {
        &self.root
    }

    /// The usage policy for the expression as a whole
    #[must_use]
    pub const fn verdict(&self) -> UsagePolicy {
        self.root.resolved()
    }

    #[must_use]
    pub const fn error(&self) -> Option<ParseError> {
        self.error
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl Display for ParsedExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.root)
    }
}

/// Parse a license expression and resolve it against `db`
///
/// Errors are reported alongside the tree rather than instead of it; whenever an error is
/// present the verdict is [`UsagePolicy::Undefined`].
#[must_use]
pub fn parse_expression(db: &PolicyDatabase, raw: &str) -> ParsedExpression {
    let tokens = tokenize(raw);
    let (root, _, result) = parse(db, &tokens, 0);

    match result {
        Ok(()) => {
            log::debug!(target: LOG_TARGET, "Expression '{raw}' resolved to {}", root.resolved());
            ParsedExpression { root, error: None }
        }
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Expression '{raw}' could not be resolved: {e}");
            ParsedExpression { root, error: Some(e) }
        }
    }
}

/// Parse `tokens` starting at `index` as a top-level expression
///
/// The whole input is treated as one implicit group, so the root is always a compound node,
/// even for a lone identifier, and simple nodes only appear as its operands. Returns the
/// finished root, the index at which parsing stopped, and the outcome.
#[must_use]
pub fn parse(db: &PolicyDatabase, tokens: &[String], index: usize) -> (CompoundExpression, usize, Result<(), ParseError>) {
    parse_group(db, tokens, index, 0)
}

fn parse_group(
    db: &PolicyDatabase,
    tokens: &[String],
    mut index: usize,
    depth: usize,
) -> (CompoundExpression, usize, Result<(), ParseError>) {
    let mut node = CompoundExpression::default();

    while let Some(token) = tokens.get(index) {
        match token.as_str() {
            LEFT_PAREN => {
                if depth >= MAX_NESTING_DEPTH {
                    return (node, index, Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH }));
                }

                let (child, next, result) = parse_group(db, tokens, index + 1, depth + 1);
                place_operand(&mut node, ExpressionNode::Compound(child));
                if result.is_err() {
                    return (node, next, result);
                }

                index = next;
            }

            RIGHT_PAREN => {
                if depth == 0 {
                    return (node, index, Err(ParseError::UnbalancedParenthesis { position: index }));
                }

                let result = finalize(&mut node);
                return (node, index + 1, result);
            }

            keywords::WITH => {
                let Some(exception) = tokens.get(index + 1).filter(|next| !is_structural(next)) else {
                    return (node, index, Err(ParseError::MissingException { position: index }));
                };

                if node.conjunction == Conjunction::None {
                    node.left_exception = Some(exception.clone());
                } else {
                    node.right_exception = Some(exception.clone());
                }

                index += 2;
            }

            other => {
                if let Some(conjunction) = Conjunction::from_token(other) {
                    if node.conjunction != Conjunction::None {
                        log::debug!(target: LOG_TARGET, "'{other}' replaces '{}' at token {index}", node.conjunction);
                    }

                    node.conjunction = conjunction;
                } else {
                    place_operand(&mut node, ExpressionNode::Simple(SimpleExpression::resolve(db, other)));
                }

                index += 1;
            }
        }
    }

    let result = finalize(&mut node);
    (node, index, result)
}

/// Operands go left until a conjunction has been seen, right afterwards.
fn place_operand(node: &mut CompoundExpression, operand: ExpressionNode) {
    let slot = if node.conjunction == Conjunction::None {
        &mut node.left
    } else {
        &mut node.right
    };

    if let Some(previous) = slot.replace(Box::new(operand)) {
        log::debug!(target: LOG_TARGET, "Operand '{previous}' was replaced");
    }
}

/// Resolve a node from its finished children. Called exactly once per node.
fn finalize(node: &mut CompoundExpression) -> Result<(), ParseError> {
    let left = node.left.as_deref().map_or(UsagePolicy::Undefined, ExpressionNode::resolved);
    let right = node.right.as_deref().map_or(UsagePolicy::Undefined, ExpressionNode::resolved);

    node.resolved = combine(left, right, node.conjunction);
    log::trace!(target: LOG_TARGET, "{left} {} {right} => {}", node.conjunction, node.resolved);

    if node.conjunction == Conjunction::None {
        return Err(ParseError::MissingConjunction);
    }

    Ok(())
}

fn is_structural(token: &str) -> bool {
    matches!(token, LEFT_PAREN | RIGHT_PAREN | keywords::WITH) || Conjunction::from_token(token).is_some()
}
