//! Content file parsing.
//!
//! Two layouts are accepted:
//! - one JSON array of descriptors (pretty-printed or not), a single snapshot
//! - JSON lines, each line an array of descriptors, one snapshot per line
//!
//! Blank lines between JSON lines are skipped.

use super::{SourceError, StoryDescriptor};
use std::path::Path;

/// Read and parse a content file.
///
/// # Errors
///
/// Returns `SourceError::FileNotFound` if the file does not exist,
/// `SourceError::Io` for read failures and `SourceError::Parse` for
/// malformed snapshots.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Vec<StoryDescriptor>>, SourceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SourceError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    parse_snapshots(&text)
}

/// Parse content file text into snapshots.
///
/// # Errors
///
/// Returns `SourceError::Parse` with the 1-based line of the first failure.
pub fn parse_snapshots(text: &str) -> Result<Vec<Vec<StoryDescriptor>>, SourceError> {
    let whole = serde_json::from_str::<Vec<StoryDescriptor>>(text);
    let whole_error = match whole {
        Ok(snapshot) => return Ok(vec![snapshot]),
        Err(error) => error,
    };

    // A lone "[" line means a pretty-printed array; its own error is the useful one.
    let pretty = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| line.trim() == "[");
    if pretty {
        return Err(SourceError::Parse {
            line: whole_error.line(),
            reason: whole_error.to_string(),
        });
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<Vec<StoryDescriptor>>(line).map_err(|error| SourceError::Parse {
                line: index + 1,
                reason: error.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StoryId;
    use std::fs;

    #[test]
    fn single_array_is_one_snapshot() {
        let snapshots =
            parse_snapshots(r#"[{"id": 1, "name": "Ann"}, {"id": 2, "name": "Bob"}]"#)
                .expect("valid array");
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].len(), 2);
    }

    #[test]
    fn pretty_printed_array_is_one_snapshot() {
        let text = "[\n  {\"id\": 1, \"name\": \"Ann\"},\n  {\"id\": 2, \"name\": \"Bob\"}\n]\n";
        let snapshots = parse_snapshots(text).expect("valid array");
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0][1].id, StoryId::new(2));
    }

    #[test]
    fn json_lines_are_separate_snapshots() {
        let text = concat!(
            "[{\"id\": 1, \"name\": \"Ann\"}]\n",
            "\n",
            "[{\"id\": 1, \"name\": \"Ann\"}, {\"id\": 2, \"name\": \"Bob\"}]\n",
        );
        let snapshots = parse_snapshots(text).expect("valid lines");
        assert_eq!(snapshots.iter().map(Vec::len).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn empty_array_is_an_empty_snapshot() {
        let snapshots = parse_snapshots("[]").expect("valid");
        assert_eq!(snapshots, vec![Vec::new()]);
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let text = "[{\"id\": 1, \"name\": \"Ann\"}]\n[{\"id\": \"x\"}]\n";
        match parse_snapshots(text) {
            Err(SourceError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_pretty_array_reports_document_line() {
        let text = "[\n  {\"id\": 1, \"name\": \"Ann\"},\n  {\"name\": \"NoId\"}\n]\n";
        match parse_snapshots(text) {
            Err(SourceError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn load_file_reads_from_disk() {
        let path = std::env::temp_dir().join("storystrip_load_file_test.jsonl");
        fs::write(&path, "[{\"id\": 5, \"name\": \"Eve\"}]\n").expect("write content");

        let snapshots = load_file(&path);
        fs::remove_file(&path).ok();

        let snapshots = snapshots.expect("valid file");
        assert_eq!(snapshots[0][0].name, "Eve");
    }
}
