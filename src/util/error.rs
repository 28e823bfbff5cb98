// Autoreg - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every variant here is fatal: data-shape problems inside a dump are never
// errors, they surface as empty fields in the output instead.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for a run.
/// Errors are categorised by the stage that produced them.
#[derive(Debug)]
pub enum AutoregError {
    /// Settings file could not be read, parsed, or validated.
    Config(ConfigError),

    /// One of the configured patterns failed to compile.
    Pattern(PatternError),

    /// The raw dump could not be read.
    Input(InputError),

    /// An artifact could not be produced.
    Output(OutputError),
}

impl fmt::Display for AutoregError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Pattern(e) => write!(f, "Pattern error: {e}"),
            Self::Input(e) => write!(f, "Input error: {e}"),
            Self::Output(e) => write!(f, "Output error: {e}"),
        }
    }
}

impl std::error::Error for AutoregError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Pattern(e) => Some(e),
            Self::Input(e) => Some(e),
            Self::Output(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors raised while loading the settings file.
#[derive(Debug)]
pub enum ConfigError {
    /// Settings file missing or unreadable.
    Read { path: PathBuf, source: io::Error },

    /// Settings file is not valid TOML or has the wrong shape.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A required key is absent or empty.
    MissingField { field: &'static str },

    /// A key is present but its value is unusable.
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "Cannot read settings file '{}': {source}", path.display())
            }
            Self::TomlParse { path, source } => {
                write!(
                    f,
                    "Failed to parse settings file '{}': {source}",
                    path.display()
                )
            }
            Self::MissingField { field } => {
                write!(f, "Missing required setting '{field}'")
            }
            Self::InvalidValue {
                field,
                value,
                reason,
            } => write!(f, "Invalid value '{value}' for setting '{field}': {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::TomlParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for AutoregError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Pattern errors
// ---------------------------------------------------------------------------

/// Errors raised while compiling the configured patterns.
#[derive(Debug)]
pub enum PatternError {
    /// The pattern string is empty.
    Empty { field: &'static str },

    /// The pattern exceeds the maximum allowed length.
    TooLong {
        field: &'static str,
        length: usize,
        max_length: usize,
    },

    /// The pattern is not a valid regular expression.
    Invalid {
        field: &'static str,
        pattern: String,
        source: regex::Error,
    },

    /// The boundary pattern matches the empty string, which would place a
    /// record boundary between every character of the dump.
    BoundaryMatchesEmpty { pattern: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "'{field}' is empty"),
            Self::TooLong {
                field,
                length,
                max_length,
            } => write!(
                f,
                "'{field}' is {length} chars, exceeds maximum of {max_length}"
            ),
            Self::Invalid {
                field,
                pattern,
                source,
            } => write!(f, "invalid regex in '{field}' ('{pattern}'): {source}"),
            Self::BoundaryMatchesEmpty { pattern } => write!(
                f,
                "split pattern '{pattern}' matches the empty string; \
                 it must consume at least one character"
            ),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PatternError> for AutoregError {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors raised while reading the raw dump.
#[derive(Debug)]
pub enum InputError {
    Read { path: PathBuf, source: io::Error },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "Cannot read dump '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
        }
    }
}

impl From<InputError> for AutoregError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Output errors
// ---------------------------------------------------------------------------

/// Errors raised while producing the two artifacts.
#[derive(Debug)]
pub enum OutputError {
    /// Output directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },

    /// Output path exists but is not a directory.
    NotADirectory { path: PathBuf },

    /// Template path does not name a regular file.
    TemplateNotAFile { path: PathBuf },

    /// Template could not be copied to the spreadsheet artifact.
    CopyTemplate {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// Split text artifact could not be written.
    WriteText { path: PathBuf, source: io::Error },

    /// Copied template could not be opened as a spreadsheet.
    OpenSpreadsheet { path: PathBuf, reason: String },

    /// The configured worksheet is not present in the template.
    MissingSheet { path: PathBuf, sheet: String },

    /// Spreadsheet could not be saved.
    SaveSpreadsheet { path: PathBuf, reason: String },

    /// No free artifact prefix could be found for this run.
    PrefixExhausted { dir: PathBuf, attempts: u32 },

    /// The records do not fit below the start row of the worksheet.
    RowLimitExceeded {
        records: usize,
        start_row: u32,
        max_row: u32,
    },
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "Directory creation failed for '{}': {source}",
                path.display()
            ),
            Self::NotADirectory { path } => {
                write!(f, "'{}' exists but is not a directory", path.display())
            }
            Self::TemplateNotAFile { path } => {
                write!(f, "Template '{}' is not a regular file", path.display())
            }
            Self::CopyTemplate { from, to, source } => write!(
                f,
                "Copy template file '{}' to '{}' failed: {source}",
                from.display(),
                to.display()
            ),
            Self::WriteText { path, source } => write!(
                f,
                "Failed to write split file '{}': {source}",
                path.display()
            ),
            Self::OpenSpreadsheet { path, reason } => {
                write!(f, "Open spreadsheet '{}' failed: {reason}", path.display())
            }
            Self::MissingSheet { path, sheet } => write!(
                f,
                "Spreadsheet '{}' has no worksheet named '{sheet}'",
                path.display()
            ),
            Self::SaveSpreadsheet { path, reason } => {
                write!(f, "Save spreadsheet '{}' failed: {reason}", path.display())
            }
            Self::PrefixExhausted { dir, attempts } => write!(
                f,
                "No free artifact name in '{}' after {attempts} attempts",
                dir.display()
            ),
            Self::RowLimitExceeded {
                records,
                start_row,
                max_row,
            } => write!(
                f,
                "{records} record(s) starting at row {start_row} exceed the \
                 worksheet limit of {max_row} rows"
            ),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::CopyTemplate { source, .. } => Some(source),
            Self::WriteText { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<OutputError> for AutoregError {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_missing_field() {
        let e = AutoregError::from(ConfigError::MissingField {
            field: "parser.split_regex",
        });
        assert_eq!(
            e.to_string(),
            "Configuration error: Missing required setting 'parser.split_regex'"
        );
    }

    #[test]
    fn test_invalid_regex_preserves_source_chain() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let e = AutoregError::from(PatternError::Invalid {
            field: "parser.cookie_regex",
            pattern: "(unclosed".to_string(),
            source,
        });
        let pattern_err = e.source().expect("pattern error");
        assert!(pattern_err.source().is_some(), "regex error should chain");
        assert!(e.to_string().contains("parser.cookie_regex"));
    }

    #[test]
    fn test_io_error_chain() {
        let e = OutputError::WriteText {
            path: PathBuf::from("out/x.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("out/x.txt"));
    }
}
