// Autoreg - core/patterns.rs
//
// Compilation of the four configured patterns into an immutable PatternSet.
// Core layer: accepts pattern strings, never touches the filesystem.

use crate::core::model::{BoundaryPlacement, Field};
use crate::util::constants;
use crate::util::error::PatternError;
use regex::Regex;

/// Raw pattern strings as read from the settings file.
#[derive(Debug, Clone, Default)]
pub struct PatternSources {
    pub split: String,
    pub profile_name: String,
    pub cookie: String,
    pub user_agent: String,
    pub placement: BoundaryPlacement,
}

/// The compiled patterns for one run.
///
/// Built once at startup; every pattern has compiled successfully before any
/// record is processed. Never recompiled per record.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub boundary: Regex,
    pub placement: BoundaryPlacement,
    pub profile_name: Regex,
    pub cookie: Regex,
    pub user_agent: Regex,
}

impl PatternSet {
    /// Validate and compile all four patterns.
    ///
    /// The first failing pattern aborts construction.
    pub fn compile(sources: &PatternSources) -> Result<Self, PatternError> {
        let boundary = compile_regex("parser.split_regex", &sources.split)?;

        if can_match_empty(&sources.split) {
            return Err(PatternError::BoundaryMatchesEmpty {
                pattern: sources.split.clone(),
            });
        }

        if boundary.captures_len() < 2 {
            tracing::warn!(
                pattern = %sources.split,
                "Split pattern has no capture group; the whole match will be kept"
            );
        } else if boundary.captures_len() > 2 {
            tracing::debug!(
                pattern = %sources.split,
                groups = boundary.captures_len() - 1,
                "Split pattern has several capture groups; only the first is kept"
            );
        }

        let set = Self {
            boundary,
            placement: sources.placement,
            profile_name: compile_regex(Field::ProfileName.settings_key(), &sources.profile_name)?,
            cookie: compile_regex(Field::Cookie.settings_key(), &sources.cookie)?,
            user_agent: compile_regex(Field::UserAgent.settings_key(), &sources.user_agent)?,
        };

        tracing::debug!(placement = set.placement.label(), "Patterns compiled");
        Ok(set)
    }

    /// The compiled pattern for a field.
    pub fn field(&self, field: Field) -> &Regex {
        match field {
            Field::ProfileName => &self.profile_name,
            Field::Cookie => &self.cookie,
            Field::UserAgent => &self.user_agent,
        }
    }
}

/// Whether `pattern` has a zero-length match anywhere, e.g. `x*` or `\b`.
///
/// Decided from the parsed pattern's minimum match length, so it holds for
/// every haystack. Only called on patterns that already compiled.
fn can_match_empty(pattern: &str) -> bool {
    match regex_syntax::Parser::new().parse(pattern) {
        Ok(hir) => hir.properties().minimum_len() == Some(0),
        Err(e) => {
            tracing::debug!(error = %e, "Pattern could not be re-parsed for length analysis");
            false
        }
    }
}

/// Compile a regex pattern with emptiness and length validation.
fn compile_regex(field: &'static str, pattern: &str) -> Result<Regex, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty { field });
    }
    if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
        return Err(PatternError::TooLong {
            field,
            length: pattern.len(),
            max_length: constants::MAX_REGEX_PATTERN_LENGTH,
        });
    }

    Regex::new(pattern).map_err(|e| PatternError::Invalid {
        field,
        pattern: pattern.to_string(),
        source: e,
    })
}
