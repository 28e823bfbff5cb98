// Autoreg - platform/config.rs
//
// settings.toml loading and startup validation.
//
// Missing required keys and unusable values are fatal: nothing is processed
// until the whole file has validated. Only the logging level degrades to a
// warning, since a bad level must not stop a run.

use crate::core::export::{self, SpreadsheetLayout};
use crate::core::model::BoundaryPlacement;
use crate::core::patterns::PatternSources;
use crate::util::constants;
use crate::util::error::ConfigError;
use std::path::{Path, PathBuf};

/// Raw deserialisable shape of settings.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawSettings {
    /// `[main]` section.
    pub main: MainSection,
    /// `[parser]` section.
    pub parser: ParserSection,
    /// `[spreadsheet]` section.
    pub spreadsheet: SpreadsheetSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[main]` section: input, output, and template paths.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct MainSection {
    pub autoregs_file_name: Option<String>,
    pub output_directory_path: Option<String>,
    pub template_file_path: Option<String>,
}

/// `[parser]` section: the four patterns and boundary placement.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ParserSection {
    pub split_regex: Option<String>,
    pub profile_name_regex: Option<String>,
    pub cookie_regex: Option<String>,
    pub user_agent_regex: Option<String>,
    pub split_position: Option<String>,
}

/// `[spreadsheet]` section: optional layout overrides.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SpreadsheetSection {
    pub sheet_name: Option<String>,
    pub start_row: Option<i64>,
    pub profile_name_column: Option<String>,
    pub cookie_column: Option<String>,
    pub user_agent_column: Option<String>,
    pub description_column: Option<String>,
}

/// `[logging]` section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub autoregs_file: PathBuf,
    pub output_dir: PathBuf,
    pub template_file: PathBuf,
    pub patterns: PatternSources,
    pub layout: SpreadsheetLayout,
    pub log_level: Option<String>,
}

/// Read and validate a settings file.
///
/// Returns the settings and any non-fatal warnings.
pub fn load_settings(path: &Path) -> Result<(Settings, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let raw: RawSettings = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(raw)
}

/// Validate a parsed settings file.
pub fn validate(raw: RawSettings) -> Result<(Settings, Vec<String>), ConfigError> {
    let mut warnings = Vec::new();

    let autoregs_file = required(raw.main.autoregs_file_name, "main.autoregs_file_name")?;
    let output_dir = required(raw.main.output_directory_path, "main.output_directory_path")?;
    let template_file = required(raw.main.template_file_path, "main.template_file_path")?;

    let placement = match raw.parser.split_position.as_deref() {
        None => BoundaryPlacement::default(),
        Some(value) => match value.to_lowercase().as_str() {
            "before" => BoundaryPlacement::Before,
            "after" => BoundaryPlacement::After,
            _ => {
                return Err(ConfigError::InvalidValue {
                    field: "parser.split_position",
                    value: value.to_string(),
                    reason: "expected \"before\" or \"after\"".to_string(),
                })
            }
        },
    };

    let patterns = PatternSources {
        split: required(raw.parser.split_regex, "parser.split_regex")?,
        profile_name: required(raw.parser.profile_name_regex, "parser.profile_name_regex")?,
        cookie: required(raw.parser.cookie_regex, "parser.cookie_regex")?,
        user_agent: required(raw.parser.user_agent_regex, "parser.user_agent_regex")?,
        placement,
    };

    let layout = validate_layout(raw.spreadsheet)?;

    let log_level = match raw.logging.level {
        Some(level) => {
            let valid = ["error", "warn", "info", "debug", "trace"];
            if valid.contains(&level.to_lowercase().as_str()) {
                Some(level.to_lowercase())
            } else {
                warnings.push(format!(
                    "[logging] level = \"{level}\" is not recognised. \
                     Valid values: error, warn, info, debug, trace. Using default (info).",
                ));
                None
            }
        }
        None => None,
    };

    Ok((
        Settings {
            autoregs_file: PathBuf::from(autoregs_file),
            output_dir: PathBuf::from(output_dir),
            template_file: PathBuf::from(template_file),
            patterns,
            layout,
            log_level,
        },
        warnings,
    ))
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField { field }),
    }
}

fn validate_layout(raw: SpreadsheetSection) -> Result<SpreadsheetLayout, ConfigError> {
    let mut layout = SpreadsheetLayout::default();

    if let Some(name) = raw.sheet_name {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "spreadsheet.sheet_name",
                value: name,
                reason: "must not be empty".to_string(),
            });
        }
        layout.sheet_name = name;
    }

    if let Some(row) = raw.start_row {
        layout.start_row = u32::try_from(row)
            .ok()
            .filter(|r| (1..=constants::MAX_XLSX_ROW).contains(r))
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "spreadsheet.start_row",
                value: row.to_string(),
                reason: format!("must be a row number from 1 to {}", constants::MAX_XLSX_ROW),
            })?;
    }

    let columns: [(&'static str, Option<String>, &mut String); 4] = [
        (
            "spreadsheet.profile_name_column",
            raw.profile_name_column,
            &mut layout.profile_name_column,
        ),
        (
            "spreadsheet.cookie_column",
            raw.cookie_column,
            &mut layout.cookie_column,
        ),
        (
            "spreadsheet.user_agent_column",
            raw.user_agent_column,
            &mut layout.user_agent_column,
        ),
        (
            "spreadsheet.description_column",
            raw.description_column,
            &mut layout.description_column,
        ),
    ];
    for (field, value, slot) in columns {
        if let Some(col) = value {
            *slot = validate_column(field, &col)?;
        }
    }

    let mut seen: Vec<&str> = Vec::with_capacity(4);
    for (_, col) in layout.cells(&Default::default()) {
        if seen.contains(&col) {
            return Err(ConfigError::InvalidValue {
                field: "spreadsheet",
                value: col.to_string(),
                reason: "the four data columns must be distinct".to_string(),
            });
        }
        seen.push(col);
    }

    Ok(layout)
}

fn validate_column(field: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    match export::column_index(trimmed) {
        Some(index) if index <= constants::MAX_XLSX_COLUMN => Ok(trimmed.to_ascii_uppercase()),
        Some(_) => Err(ConfigError::InvalidValue {
            field,
            value: value.to_string(),
            reason: "column is past XFD, the last worksheet column".to_string(),
        }),
        None => Err(ConfigError::InvalidValue {
            field,
            value: value.to_string(),
            reason: "expected a column letter such as \"A\" or \"AB\"".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[main]
autoregs_file_name = "autoregs.txt"
output_directory_path = "output"
template_file_path = "template.xlsx"

[parser]
split_regex = '(Profile: \w+)'
profile_name_regex = '^Profile:.*'
cookie_regex = '^Cookie:.*'
user_agent_regex = '^UA:.*'
"#;

    fn parse(toml_str: &str) -> Result<(Settings, Vec<String>), ConfigError> {
        validate(toml::from_str(toml_str).unwrap())
    }

    #[test]
    fn test_valid_settings_use_default_layout() {
        let (settings, warnings) = parse(VALID).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(settings.autoregs_file, PathBuf::from("autoregs.txt"));
        assert_eq!(settings.patterns.split, r"(Profile: \w+)");
        assert_eq!(settings.patterns.placement, BoundaryPlacement::Before);
        assert_eq!(settings.layout, SpreadsheetLayout::default());
        assert_eq!(settings.log_level, None);
    }

    #[test]
    fn test_missing_pattern_is_fatal() {
        let toml_str = VALID.replace("cookie_regex = '^Cookie:.*'\n", "");
        match parse(&toml_str).unwrap_err() {
            ConfigError::MissingField { field } => assert_eq!(field, "parser.cookie_regex"),
            other => panic!("Expected MissingField, got: {other:?}"),
        }
    }

    #[test]
    fn test_empty_path_is_fatal() {
        let toml_str = VALID.replace("\"output\"", "\"\"");
        assert!(matches!(
            parse(&toml_str).unwrap_err(),
            ConfigError::MissingField {
                field: "main.output_directory_path"
            }
        ));
    }

    #[test]
    fn test_split_position_after() {
        let toml_str = format!("{VALID}split_position = \"After\"\n");
        let (settings, _) = parse(&toml_str).unwrap();
        assert_eq!(settings.patterns.placement, BoundaryPlacement::After);
    }

    #[test]
    fn test_split_position_invalid() {
        let toml_str = format!("{VALID}split_position = \"middle\"\n");
        assert!(matches!(
            parse(&toml_str).unwrap_err(),
            ConfigError::InvalidValue {
                field: "parser.split_position",
                ..
            }
        ));
    }

    #[test]
    fn test_layout_overrides() {
        let toml_str = format!(
            "{VALID}\n[spreadsheet]\nstart_row = 5\ndescription_column = \"g\"\nsheet_name = \"Import\"\n"
        );
        let (settings, _) = parse(&toml_str).unwrap();
        assert_eq!(settings.layout.start_row, 5);
        assert_eq!(settings.layout.description_column, "G");
        assert_eq!(settings.layout.sheet_name, "Import");
        assert_eq!(settings.layout.profile_name_column, "A");
    }

    #[test]
    fn test_layout_rejects_zero_row_and_bad_column() {
        let toml_str = format!("{VALID}\n[spreadsheet]\nstart_row = 0\n");
        assert!(parse(&toml_str).is_err());

        let toml_str = format!("{VALID}\n[spreadsheet]\ncookie_column = \"B2\"\n");
        assert!(matches!(
            parse(&toml_str).unwrap_err(),
            ConfigError::InvalidValue {
                field: "spreadsheet.cookie_column",
                ..
            }
        ));
    }

    #[test]
    fn test_layout_stays_inside_sheet_limits() {
        let toml_str = format!("{VALID}\n[spreadsheet]\nstart_row = 1048577\n");
        assert!(matches!(
            parse(&toml_str).unwrap_err(),
            ConfigError::InvalidValue {
                field: "spreadsheet.start_row",
                ..
            }
        ));

        for column in ["XFE", "ZZZZZZZ"] {
            let toml_str = format!("{VALID}\n[spreadsheet]\ndescription_column = \"{column}\"\n");
            assert!(
                matches!(
                    parse(&toml_str).unwrap_err(),
                    ConfigError::InvalidValue {
                        field: "spreadsheet.description_column",
                        ..
                    }
                ),
                "{column} should be rejected"
            );
        }

        let toml_str = format!(
            "{VALID}\n[spreadsheet]\nstart_row = 1048576\ndescription_column = \"xfd\"\n"
        );
        let (settings, _) = parse(&toml_str).unwrap();
        assert_eq!(settings.layout.start_row, 1_048_576);
        assert_eq!(settings.layout.description_column, "XFD");
    }

    #[test]
    fn test_layout_rejects_duplicate_columns() {
        let toml_str = format!("{VALID}\n[spreadsheet]\ncookie_column = \"a\"\n");
        assert!(parse(&toml_str).is_err());
    }

    #[test]
    fn test_bad_log_level_is_a_warning() {
        let toml_str = format!("{VALID}\n[logging]\nlevel = \"loud\"\n");
        let (settings, warnings) = parse(&toml_str).unwrap();
        assert_eq!(settings.log_level, None);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_load_settings_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_settings_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[main\nbroken").unwrap();
        assert!(matches!(
            load_settings(&path).unwrap_err(),
            ConfigError::TomlParse { .. }
        ));
    }
}
