//! Comment hide types.
//!
//! Classification tags explaining why a comment's content is replaced by a
//! placeholder for a given viewer. The numeric codes match the `hide_type`
//! column of the comments table.

use serde::{Deserialize, Serialize};

/// Why (if at all) a comment is hidden from the current viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HideType {
    #[default]
    Visible,
    /// The viewer has banned the comment's author.
    HiddenAuthorBanned,
    /// The comment's author has banned the viewer.
    HiddenViewerBanned,
}

impl HideType {
    /// Database column code.
    pub fn code(&self) -> i16 {
        match self {
            Self::Visible => 0,
            Self::HiddenAuthorBanned => 3,
            Self::HiddenViewerBanned => 4,
        }
    }

    /// Convert from database column code. Unknown codes collapse to
    /// `Visible` rather than failing the whole row.
    pub fn from_code(code: i16) -> Self {
        match code {
            3 => Self::HiddenAuthorBanned,
            4 => Self::HiddenViewerBanned,
            _ => Self::Visible,
        }
    }

    /// Placeholder body shown in place of a hidden comment's text.
    pub fn hidden_body(&self) -> Option<&'static str> {
        match self {
            Self::Visible => None,
            Self::HiddenAuthorBanned | Self::HiddenViewerBanned => Some("Hidden comment"),
        }
    }

    /// Reason-specific message for strict-visibility access denials.
    pub fn forbidden_message(&self) -> Option<&'static str> {
        match self {
            Self::Visible => None,
            Self::HiddenAuthorBanned => Some("You have banned the author of this comment"),
            Self::HiddenViewerBanned => Some("The author of this comment has banned you"),
        }
    }

    pub fn is_hidden(&self) -> bool {
        *self != Self::Visible
    }
}
