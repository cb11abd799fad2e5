use super::UsagePolicy;
use core::fmt::{Display, Formatter, Result as FmtResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// SPDX identifiers are alphanumerics, `.` and `-`, optionally carrying the "or later" `+` suffix.
static SPDX_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.\-]+\+?$").expect("invalid regex"));

static FAMILY_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.\-]+$").expect("invalid regex"));

/// Substrings that may never appear in a family key, compared case-insensitively.
const RESERVED_FAMILY_WORDS: [&str; 2] = ["conflict", "unknown"];

/// One policy entry exactly as it appears in a policy file.
///
/// Entries are deserialized leniently: every field defaults, and the usage policy is kept as
/// a raw string so a single bad entry can be skipped instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyEntry {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub reference: String,

    #[serde(default)]
    pub osi: bool,

    #[serde(default)]
    pub fsf: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub family: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub usage_policy: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub children: Vec<String>,

    #[serde(default)]
    pub notes: Vec<String>,

    #[serde(default)]
    pub urls: Vec<String>,

    #[serde(default)]
    pub annotation_refs: Vec<String>,
}

/// Why a policy entry was rejected during ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRecord {
    /// The identifier is neither empty nor a well-formed SPDX identifier.
    MalformedId(String),

    /// The family key is empty or contains characters outside the SPDX identifier class.
    MalformedFamily(String),

    /// The family key contains a reserved word.
    ReservedFamily(String),

    /// The usage policy is not one of `allow`, `deny` or `needs-review`.
    UnknownUsagePolicy(String),
}

impl Display for InvalidRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::MalformedId(id) => write!(f, "invalid SPDX identifier '{id}'"),
            Self::MalformedFamily(family) => write!(f, "invalid family key '{family}'"),
            Self::ReservedFamily(family) => write!(f, "family key '{family}' contains a reserved word"),
            Self::UnknownUsagePolicy(value) => write!(f, "unknown usage policy '{value}'"),
        }
    }
}

impl core::error::Error for InvalidRecord {}

/// Checks a policy entry and returns its parsed usage policy.
///
/// # Errors
///
/// Returns the first reason the entry cannot be ingested.
pub fn validate(entry: &PolicyEntry) -> Result<UsagePolicy, InvalidRecord> {
    if !entry.id.is_empty() && !is_spdx_id(&entry.id) {
        return Err(InvalidRecord::MalformedId(entry.id.clone()));
    }

    if !FAMILY_KEY_REGEX.is_match(&entry.family) {
        return Err(InvalidRecord::MalformedFamily(entry.family.clone()));
    }

    let lowered = entry.family.to_ascii_lowercase();
    if RESERVED_FAMILY_WORDS.iter().any(|word| lowered.contains(word)) {
        return Err(InvalidRecord::ReservedFamily(entry.family.clone()));
    }

    UsagePolicy::from_stored(&entry.usage_policy).ok_or_else(|| InvalidRecord::UnknownUsagePolicy(entry.usage_policy.clone()))
}

#[must_use]
pub fn is_valid(entry: &PolicyEntry) -> bool {
    validate(entry).is_ok()
}

#[must_use]
pub fn is_spdx_id(id: &str) -> bool {
    SPDX_ID_REGEX.is_match(id)
}

/// A validated policy record.
///
/// Records can only be created from a [`PolicyEntry`] that passes [`validate`], so the usage
/// policy is always one of the three storable values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRecord {
    id: String,
    name: String,
    family: String,
    usage_policy: UsagePolicy,
    reference: String,
    osi_approved: bool,
    fsf_libre: bool,
    deprecated: bool,
    aliases: Vec<String>,
    children: Vec<String>,
    notes: Vec<String>,
    urls: Vec<String>,
    annotation_refs: Vec<String>,
}

impl PolicyRecord {
    /// Derives the record for one of this family's children.
    ///
    /// The child shares everything except the identifier, and carries no children, notes or
    /// urls of its own so it is never expanded again.
    #[must_use]
    pub fn child(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: self.name.clone(),
            family: self.family.clone(),
            usage_policy: self.usage_policy,
            reference: self.reference.clone(),
            osi_approved: self.osi_approved,
            fsf_libre: self.fsf_libre,
            deprecated: self.deprecated,
            aliases: self.aliases.clone(),
            children: Vec::new(),
            notes: Vec::new(),
            urls: Vec::new(),
            annotation_refs: self.annotation_refs.clone(),
        }
    }

    /// The SPDX identifier, empty for a family-only record.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    #[must_use]
    pub const fn usage_policy(&self) -> UsagePolicy {
        self.usage_policy
    }

    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    #[must_use]
    pub const fn osi_approved(&self) -> bool {
        self.osi_approved
    }

    #[must_use]
    pub const fn fsf_libre(&self) -> bool {
        self.fsf_libre
    }

    #[must_use]
    pub const fn deprecated(&self) -> bool {
        self.deprecated
    }

    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    #[must_use]
    pub fn children(&self) -> &[String] {
        &self.children
    }

    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    #[must_use]
    pub fn annotation_refs(&self) -> &[String] {
        &self.annotation_refs
    }
}

impl TryFrom<&PolicyEntry> for PolicyRecord {
    type Error = InvalidRecord;

    fn try_from(entry: &PolicyEntry) -> Result<Self, InvalidRecord> {
        let usage_policy = validate(entry)?;

        Ok(Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            family: entry.family.clone(),
            usage_policy,
            reference: entry.reference.clone(),
            osi_approved: entry.osi,
            fsf_libre: entry.fsf,
            deprecated: entry.deprecated,
            aliases: entry.aliases.clone(),
            children: entry.children.clone(),
            notes: entry.notes.clone(),
            urls: entry.urls.clone(),
            annotation_refs: entry.annotation_refs.clone(),
        })
    }
}
