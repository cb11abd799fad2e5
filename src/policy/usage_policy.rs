use strum::{Display, EnumIter};

/// The organizational verdict for a license.
///
/// `Undefined` is never stored in a policy record. It only ever appears as a resolution
/// outcome, meaning no matching record was found or the verdict could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Display)]
pub enum UsagePolicy {
    #[strum(serialize = "allow")]
    Allow,

    #[strum(serialize = "deny")]
    Deny,

    #[strum(serialize = "needs-review")]
    NeedsReview,

    #[default]
    #[strum(serialize = "undefined")]
    Undefined,
}

impl UsagePolicy {
    /// Parses a usage policy as written in a policy file.
    ///
    /// Only the three storable values are recognized, so `"undefined"` yields `None`.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "allow" => Some(Self::Allow),
            "deny" => Some(Self::Deny),
            "needs-review" => Some(Self::NeedsReview),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_defined(self) -> bool {
        !matches!(self, Self::Undefined)
    }
}
