// Autoreg - core/splitter.rs
//
// Partitioning of a raw dump into ordered records using the boundary pattern.
// Core layer: pure functions over in-memory strings.
//
// Each boundary match is replaced by its first capture group (or the whole
// match when the pattern has no group) plus a record break. Breaks are
// tracked as piece offsets rather than an in-band marker, so no byte sequence
// in the dump can be mistaken for one.

use crate::core::model::BoundaryPlacement;
use regex::Regex;
use std::borrow::Cow;

/// Replace every tab with a newline.
///
/// Some sources emit tab-delimited sub-records; they are treated as line
/// breaks before any splitting happens.
pub fn normalize(raw: &str) -> Cow<'_, str> {
    if raw.contains('\t') {
        Cow::Owned(raw.replace('\t', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Split a raw dump into its records, in input order.
///
/// Tabs are normalised first. Zero-length records are discarded. A pattern
/// that never matches yields the whole normalised dump as a single record.
///
/// With [`BoundaryPlacement::Before`] the single line break in front of each
/// record boundary is dropped from the preceding record, since it separates
/// records rather than lines.
pub fn split(raw: &str, boundary: &Regex, placement: BoundaryPlacement) -> Vec<String> {
    let normalized = normalize(raw);
    let pieces = split_pieces(&normalized, boundary, placement);
    let total = pieces.len();

    let records: Vec<String> = pieces
        .into_iter()
        .map(|piece| match placement {
            BoundaryPlacement::Before => strip_one_line_break(piece),
            BoundaryPlacement::After => piece,
        })
        .filter(|piece| !piece.is_empty())
        .collect();

    tracing::debug!(
        pieces = total,
        records = records.len(),
        discarded = total - records.len(),
        "Dump split into records"
    );

    records
}

/// Render the split dump as text, one record block per break.
///
/// This is the same substitution as [`split`] with a newline as the break,
/// and no record is discarded or trimmed.
pub fn render_split_text(raw: &str, boundary: &Regex, placement: BoundaryPlacement) -> String {
    let normalized = normalize(raw);
    let mut pieces = split_pieces(&normalized, boundary, placement);

    // A boundary at offset 0 would otherwise open the file with a blank line.
    if placement == BoundaryPlacement::Before && pieces.first().is_some_and(|p| p.is_empty()) {
        pieces.remove(0);
    }

    pieces.join("\n")
}

/// Cut `text` at every boundary match, keeping the retained capture text on
/// the side chosen by `placement`. Returns every piece, empty ones included.
fn split_pieces(text: &str, boundary: &Regex, placement: BoundaryPlacement) -> Vec<String> {
    let has_group = boundary.captures_len() > 1;
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut last_end = 0;

    for caps in boundary.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        // A declared group that did not participate retains nothing.
        let kept = if has_group {
            caps.get(1).map_or("", |m| m.as_str())
        } else {
            whole.as_str()
        };

        current.push_str(&text[last_end..whole.start()]);
        match placement {
            BoundaryPlacement::Before => {
                pieces.push(std::mem::take(&mut current));
                current.push_str(kept);
            }
            BoundaryPlacement::After => {
                current.push_str(kept);
                pieces.push(std::mem::take(&mut current));
            }
        }
        last_end = whole.end();
    }

    current.push_str(&text[last_end..]);
    pieces.push(current);
    pieces
}

fn strip_one_line_break(mut piece: String) -> String {
    if piece.ends_with('\n') {
        piece.pop();
        if piece.ends_with('\r') {
            piece.pop();
        }
    }
    piece
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_boundary() -> Regex {
        Regex::new(r"(Profile: \w+)").unwrap()
    }

    #[test]
    fn test_split_records_in_order() {
        let raw = "Profile: a\nx\nProfile: b\ny\nProfile: c";
        let records = split(raw, &profile_boundary(), BoundaryPlacement::Before);
        assert_eq!(records, vec!["Profile: a\nx", "Profile: b\ny", "Profile: c"]);
    }

    #[test]
    fn test_tabs_behave_as_newlines() {
        let tabbed = "Profile: a\tCookie: 1\tnote\nProfile: b\tCookie: 2";
        let newlined = tabbed.replace('\t', "\n");
        let boundary = profile_boundary();
        for placement in [BoundaryPlacement::Before, BoundaryPlacement::After] {
            assert_eq!(
                split(tabbed, &boundary, placement),
                split(&newlined, &boundary, placement)
            );
            assert_eq!(
                render_split_text(tabbed, &boundary, placement),
                render_split_text(&newlined, &boundary, placement)
            );
        }
    }

    #[test]
    fn test_no_match_yields_whole_dump() {
        let raw = "just\tsome text";
        let boundary = Regex::new("(NEVER)").unwrap();
        assert_eq!(
            split(raw, &boundary, BoundaryPlacement::After),
            vec!["just\nsome text"]
        );
    }

    #[test]
    fn test_empty_dump_yields_no_records() {
        let records = split("", &profile_boundary(), BoundaryPlacement::Before);
        assert!(records.is_empty());
    }

    #[test]
    fn test_after_placement_appends_break_after_match() {
        let raw = "a\nEND1\nb\nEND2";
        let boundary = Regex::new(r"(END\d)").unwrap();
        let records = split(raw, &boundary, BoundaryPlacement::After);
        assert_eq!(records, vec!["a\nEND1", "\nb\nEND2"]);
    }

    #[test]
    fn test_only_first_group_is_retained() {
        let raw = "x--SEP--y";
        let boundary = Regex::new(r"--(SEP)--").unwrap();
        assert_eq!(
            split(raw, &boundary, BoundaryPlacement::After),
            vec!["xSEP", "y"]
        );
    }

    #[test]
    fn test_pattern_without_group_keeps_whole_match() {
        let raw = "Profile: a\nx\nProfile: b";
        let boundary = Regex::new(r"Profile: \w+").unwrap();
        assert_eq!(
            split(raw, &boundary, BoundaryPlacement::Before),
            vec!["Profile: a\nx", "Profile: b"]
        );
    }

    #[test]
    fn test_before_strips_only_one_line_break() {
        let raw = "Profile: a\nx\n\n\r\nProfile: b";
        let records = split(raw, &profile_boundary(), BoundaryPlacement::Before);
        assert_eq!(records, vec!["Profile: a\nx\n\n", "Profile: b"]);
    }

    #[test]
    fn test_preamble_before_first_boundary_is_a_record() {
        let raw = "header\nProfile: a";
        let records = split(raw, &profile_boundary(), BoundaryPlacement::Before);
        assert_eq!(records, vec!["header", "Profile: a"]);
    }

    #[test]
    fn test_render_after_matches_substitution() {
        let raw = "a\tEND1b END2";
        let boundary = Regex::new(r"(END\d)").unwrap();
        let expected = boundary.replace_all(&raw.replace('\t', "\n"), "${1}\n").into_owned();
        assert_eq!(
            render_split_text(raw, &boundary, BoundaryPlacement::After),
            expected
        );
    }

    #[test]
    fn test_render_before_has_no_leading_blank_line() {
        let raw = "Profile: a\nx\nProfile: b";
        let text = render_split_text(raw, &profile_boundary(), BoundaryPlacement::Before);
        assert_eq!(text, "Profile: a\nx\n\nProfile: b");
    }
}
