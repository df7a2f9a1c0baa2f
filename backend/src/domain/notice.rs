//! User-facing notices attached to mutation outcomes.
//!
//! Mutations report what happened in words as well as data; clients surface
//! the text as a toast. Notices never replace the typed error channel: a
//! failed request still gets an error body, with the notice alongside it
//! when one helps.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// The operation completed.
    Success,
    /// The operation failed in a way worth telling the user about.
    Error,
}

/// A short human-readable message describing a mutation's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Display text.
    pub text: String,
}

impl Notice {
    /// A success notice.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    /// An error notice.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn notices_serialise_with_snake_case_levels() {
        let json = serde_json::to_value(Notice::success("Listing saved")).expect("serialise");
        assert_eq!(json["level"], "success");
        assert_eq!(json["text"], "Listing saved");
    }
}
