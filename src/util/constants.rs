// Autoreg - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "Autoreg";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default logging level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings file read from the working directory when --settings is omitted.
pub const DEFAULT_SETTINGS_FILE_NAME: &str = "settings.toml";

// =============================================================================
// Artifacts
// =============================================================================

/// Suffix of the plain-text split artifact.
pub const SPLIT_TEXT_FILE_SUFFIX: &str = "splitted.txt";

/// Suffix of the mass-import spreadsheet artifact.
pub const SPREADSHEET_FILE_SUFFIX: &str = "dolphin.xlsx";

/// chrono format string for the per-run artifact prefix.
pub const RUN_PREFIX_FORMAT: &str = "%Y_%m_%d-%H_%M_%S";

/// Separates the run prefix from the artifact suffix.
pub const RUN_PREFIX_SEPARATOR: &str = "__";

/// Upper bound on the collision counter appended to the run prefix.
/// Reaching it means the output directory is full of same-second artifacts.
pub const MAX_RUN_PREFIX_ATTEMPTS: u32 = 1_000;

// =============================================================================
// Spreadsheet layout defaults
// =============================================================================

/// Worksheet that receives the data rows.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// First data row. Rows above it belong to the template header.
pub const DEFAULT_START_ROW: u32 = 3;

pub const DEFAULT_PROFILE_NAME_COLUMN: &str = "A";
pub const DEFAULT_COOKIE_COLUMN: &str = "B";
pub const DEFAULT_USER_AGENT_COLUMN: &str = "E";
pub const DEFAULT_DESCRIPTION_COLUMN: &str = "F";

/// Last row an xlsx worksheet can hold.
pub const MAX_XLSX_ROW: u32 = 1_048_576;

/// Last column an xlsx worksheet can hold (XFD).
pub const MAX_XLSX_COLUMN: u32 = 16_384;

// =============================================================================
// Pattern limits
// =============================================================================

/// Maximum regex pattern length to prevent ReDoS.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4_096;
