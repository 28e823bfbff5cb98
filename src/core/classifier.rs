// Autoreg - core/classifier.rs
//
// Line classification within a single record.
// Core layer: pure functions over in-memory strings.
//
// Classification is an ordered rule list evaluated top-to-bottom per line:
// profile name, then cookie, then user agent. The first matching rule claims
// the line. Lines no rule claims go to the description. Repeat matches for a
// field overwrite earlier ones (last match wins). Classification is total:
// any input, including an empty record, yields a record.

use crate::core::model::{ClassifiedRecord, Field};
use crate::core::patterns::PatternSet;
use regex::Regex;

/// A single classification rule: lines matching `pattern` are assigned to `field`.
#[derive(Debug, Clone, Copy)]
pub struct Rule<'p> {
    pub field: Field,
    pub pattern: &'p Regex,
}

/// Ordered rule list borrowed from a compiled pattern set.
#[derive(Debug, Clone)]
pub struct Classifier<'p> {
    rules: Vec<Rule<'p>>,
}

impl<'p> Classifier<'p> {
    /// Build the rule list in field priority order.
    pub fn new(patterns: &'p PatternSet) -> Self {
        let rules = Field::priority_order()
            .iter()
            .map(|&field| Rule {
                field,
                pattern: patterns.field(field),
            })
            .collect();
        Self { rules }
    }

    /// Build a classifier from explicit field patterns.
    pub fn from_patterns(profile_name: &'p Regex, cookie: &'p Regex, user_agent: &'p Regex) -> Self {
        Self {
            rules: vec![
                Rule {
                    field: Field::ProfileName,
                    pattern: profile_name,
                },
                Rule {
                    field: Field::Cookie,
                    pattern: cookie,
                },
                Rule {
                    field: Field::UserAgent,
                    pattern: user_agent,
                },
            ],
        }
    }

    /// The rule that claims `line`, if any.
    ///
    /// Empty lines are never matched against the rules.
    pub fn matching_field(&self, line: &str) -> Option<Field> {
        if line.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(line))
            .map(|rule| rule.field)
    }

    /// Classify every line of `record`.
    ///
    /// Lines end at `\n`; a trailing `\r` is not part of the line, so CRLF
    /// dumps classify and store the same values as LF ones.
    pub fn classify(&self, record: &str) -> ClassifiedRecord {
        let mut out = ClassifiedRecord::default();
        let mut description: Vec<&str> = Vec::new();

        for line in record.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            match self.matching_field(line) {
                Some(field) => {
                    let slot = match field {
                        Field::ProfileName => &mut out.profile_name,
                        Field::Cookie => &mut out.cookie,
                        Field::UserAgent => &mut out.user_agent,
                    };
                    if !slot.is_empty() {
                        tracing::trace!(?field, "Repeated match; later line wins");
                    }
                    *slot = line.to_string();
                    if field.echoes_to_description() {
                        description.push(line);
                    }
                }
                None => description.push(line),
            }
        }

        out.description = description.join("\n");
        out
    }

    /// Classify a sequence of records, preserving order.
    pub fn classify_all<S: AsRef<str>>(&self, records: &[S]) -> Vec<ClassifiedRecord> {
        records.iter().map(|r| self.classify(r.as_ref())).collect()
    }
}

/// Classify one record against the three field patterns.
pub fn classify(
    record: &str,
    profile_name: &Regex,
    cookie: &Regex,
    user_agent: &Regex,
) -> ClassifiedRecord {
    Classifier::from_patterns(profile_name, cookie, user_agent).classify(record)
}
