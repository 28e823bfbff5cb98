// Autoreg - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
// These types are the shared vocabulary across all layers.

use serde::Serialize;

// =============================================================================
// Classified record (output of classification)
// =============================================================================

/// One account entry after every line has been assigned to a field.
///
/// Single-valued fields hold the last matching line; they are empty when no
/// line matched. `description` is the newline-joined sequence of every line
/// not claimed by the profile-name or cookie rules, in original order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedRecord {
    pub profile_name: String,
    pub cookie: String,
    pub user_agent: String,
    pub description: String,
}

// =============================================================================
// Field
// =============================================================================

/// A single-valued field a line can be assigned to by a pattern rule.
///
/// Lines that match no rule go to the description only, so the description
/// is not a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProfileName,
    Cookie,
    UserAgent,
}

impl Field {
    /// Rules are evaluated in this order; the first match claims the line.
    pub fn priority_order() -> &'static [Field] {
        &[Field::ProfileName, Field::Cookie, Field::UserAgent]
    }

    /// Settings key holding this field's pattern.
    pub fn settings_key(&self) -> &'static str {
        match self {
            Self::ProfileName => "parser.profile_name_regex",
            Self::Cookie => "parser.cookie_regex",
            Self::UserAgent => "parser.user_agent_regex",
        }
    }

    /// Whether a line assigned to this field is also kept in the description.
    ///
    /// User-agent lines are: the description reproduces the note block
    /// including the user agent.
    pub fn echoes_to_description(&self) -> bool {
        matches!(self, Self::UserAgent)
    }
}

// =============================================================================
// Boundary placement
// =============================================================================

/// Where a record break is placed relative to the retained boundary text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPlacement {
    /// The boundary text opens a record. The line break directly in front of
    /// it separates records, so it is not kept inside either one.
    #[default]
    Before,
    /// The boundary text closes a record; nothing is trimmed.
    After,
}

impl BoundaryPlacement {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}
