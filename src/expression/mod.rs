//! License expression parsing and policy resolution
//!
//! A license expression such as `(MIT OR Apache-2.0) AND BSD-3-Clause` is split into tokens,
//! parsed into a tree of [`CompoundExpression`] and [`SimpleExpression`] nodes, and resolved
//! into a single [`UsagePolicy`](crate::policy::UsagePolicy) against a
//! [`PolicyDatabase`](crate::policy::PolicyDatabase).
//!
//! # Implementation Model
//!
//! Resolution happens while the tree is built. Leaves are looked up in the database as
//! soon as they are read, and each compound node combines its two children with
//! [`combine`] once both are complete:
//!
//! - `AND` requires both licenses to be honored, so the stricter side wins.
//! - `OR` lets the consumer pick, so the more permissive side wins.
//! - An unknown license on either side makes the whole node undefined.
//!
//! `WITH` exceptions are recorded on the tree but never change a verdict.

mod conjunction;
mod expression_node;
mod parse_error;
mod parser;
mod resolution;
mod tokenizer;

pub use conjunction::Conjunction;
pub use expression_node::{CompoundExpression, ExpressionNode, SimpleExpression};
pub use parse_error::ParseError;
pub use parser::{MAX_NESTING_DEPTH, ParsedExpression, parse, parse_expression};
pub use resolution::combine;
pub use tokenizer::tokenize;
