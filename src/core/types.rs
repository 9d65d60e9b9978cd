//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`PasteId`] - Positive integer paste identifier
//! - [`Timestamp`] - Seconds since the Unix epoch
//! - [`TimeFormat`] - Validated strftime pattern for display
//! - [`NewPaste`] - Validated create request
//! - [`PasteMetadata`] - Metadata row (body omitted)
//! - [`Paste`] - Metadata plus body
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so the stores and the lineage resolver never
//! have to re-check them.
//!
//! # Examples
//!
//! ```
//! use pasteline::core::types::{NewPaste, PasteId};
//!
//! let id: PasteId = "42".parse().unwrap();
//! assert_eq!(id.get(), 42);
//!
//! assert!("0".parse::<PasteId>().is_err());
//! assert!("abc".parse::<PasteId>().is_err());
//! assert!(NewPaste::new("", "alice", "body", None).is_err());
//! ```

use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid paste id: {0}")]
    InvalidPasteId(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// A paste identifier.
///
/// Ids are allocated by the metadata store, are always positive, and are
/// never reused.
///
/// # Example
///
/// ```
/// use pasteline::core::types::PasteId;
///
/// let id = PasteId::new(7).unwrap();
/// assert_eq!(id.to_string(), "7");
/// assert!(PasteId::new(0).is_err());
/// assert!(PasteId::new(-3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PasteId(i64);

impl PasteId {
    /// Create a validated paste id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidPasteId` if `raw` is not positive.
    pub fn new(raw: i64) -> Result<Self, TypeError> {
        if raw <= 0 {
            return Err(TypeError::InvalidPasteId(format!(
                "{raw} is not a positive integer"
            )));
        }
        Ok(Self(raw))
    }

    /// Get the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for PasteId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let raw: i64 = trimmed
            .parse()
            .map_err(|_| TypeError::InvalidPasteId(format!("'{trimmed}' is not an integer")))?;
        Self::new(raw)
    }
}

impl TryFrom<i64> for PasteId {
    type Error = TypeError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PasteId> for i64 {
    fn from(id: PasteId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PasteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strftime pattern that chrono can render.
///
/// # Example
///
/// ```
/// use pasteline::core::types::TimeFormat;
///
/// assert!(TimeFormat::new("%Y-%m-%d").is_ok());
/// assert!(TimeFormat::new("%Q").is_err());
/// assert_eq!(TimeFormat::default().as_str(), "%x %X");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat(String);

impl TimeFormat {
    /// The default pattern: locale date and time.
    pub const DEFAULT: &'static str = "%x %X";

    /// Create a validated time format.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTimeFormat` if the pattern is empty or
    /// contains a specifier chrono does not understand.
    pub fn new(pattern: impl Into<String>) -> Result<Self, TypeError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(TypeError::InvalidTimeFormat("pattern is empty".into()));
        }
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(TypeError::InvalidTimeFormat(pattern));
        }
        Ok(Self(pattern))
    }

    /// Get the pattern as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Creation time of a paste, in whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The current moment, truncated to seconds.
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }

    /// Wrap a raw epoch-seconds value.
    pub fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Get the raw epoch-seconds value.
    pub fn as_secs(self) -> i64 {
        self.0
    }

    /// Render in local time using `format`.
    ///
    /// Values chrono cannot place on the calendar render as the raw
    /// integer.
    pub fn format(self, format: &TimeFormat) -> String {
        match chrono::Local.timestamp_opt(self.0, 0).single() {
            Some(dt) => dt.format(format.as_str()).to_string(),
            None => self.0.to_string(),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated request to create a paste.
///
/// Title and author must contain something other than whitespace. They
/// are stored exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaste {
    title: String,
    author: String,
    body: String,
    edited_from: Option<PasteId>,
}

impl NewPaste {
    /// Create a validated request.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::EmptyField` if the title or author is blank.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        body: impl Into<String>,
        edited_from: Option<PasteId>,
    ) -> Result<Self, TypeError> {
        let title = title.into();
        let author = author.into();
        if title.trim().is_empty() {
            return Err(TypeError::EmptyField("title"));
        }
        if author.trim().is_empty() {
            return Err(TypeError::EmptyField("author"));
        }
        Ok(Self {
            title,
            author,
            body: body.into(),
            edited_from,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn edited_from(&self) -> Option<PasteId> {
        self.edited_from
    }
}

/// One metadata row: everything about a paste except its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteMetadata {
    pub id: PasteId,
    pub title: String,
    pub author: String,
    pub created_at: Timestamp,
    /// The paste this one was derived from, if any. May dangle.
    pub edited_from: Option<PasteId>,
}

/// A paste with its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    #[serde(flatten)]
    pub metadata: PasteMetadata,
    pub body: String,
}

impl Paste {
    pub fn id(&self) -> PasteId {
        self.metadata.id
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn author(&self) -> &str {
        &self.metadata.author
    }
}
