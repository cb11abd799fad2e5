//! The algebra that folds two resolved usage policies into one

use super::Conjunction;
use crate::policy::UsagePolicy;

/// Combine the policies of two operands joined by `conjunction`.
///
/// An undefined operand makes the whole result undefined. `AND` takes the most restrictive
/// operand (deny, then needs-review, then allow) and `OR` takes the most permissive one
/// (allow, then needs-review, then deny). Without a conjunction there is nothing to combine
/// and the result is undefined.
#[must_use]
pub const fn combine(left: UsagePolicy, right: UsagePolicy, conjunction: Conjunction) -> UsagePolicy {
    use UsagePolicy::{Allow, Deny, NeedsReview, Undefined};

    if matches!(left, Undefined) || matches!(right, Undefined) {
        return Undefined;
    }

    match conjunction {
        Conjunction::And => {
            if matches!(left, Deny) || matches!(right, Deny) {
                Deny
            } else if matches!(left, NeedsReview) || matches!(right, NeedsReview) {
                NeedsReview
            } else {
                Allow
            }
        }
        Conjunction::Or => {
            if matches!(left, Allow) || matches!(right, Allow) {
                Allow
            } else if matches!(left, NeedsReview) || matches!(right, NeedsReview) {
                NeedsReview
            } else {
                Deny
            }
        }
        Conjunction::None => Undefined,
    }
}
