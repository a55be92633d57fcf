use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::models::Record;

/// Parse one `name, phone` line. A line is accepted only when it holds exactly
/// one comma and both sides trim to non-empty text.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let mut parts = line.split(',');
    let (name, phone) = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(phone), None) => (name.trim(), phone.trim()),
        _ => return None,
    };

    if name.is_empty() || phone.is_empty() {
        return None;
    }

    Some((name.to_string(), phone.to_string()))
}

/// Render a record as a file line, without the trailing newline.
pub fn format_line(record: &Record) -> String {
    format!("{}, {}", record.name, record.phone_number)
}

/// Read every well-formed `(name, phone)` pair from `path`, in file order.
/// Malformed lines are skipped; blank lines are ignored quietly. Bytes that
/// are not valid UTF-8 are replaced with U+FFFD instead of failing the load.
pub fn read_records(path: &Path) -> Result<Vec<(String, String)>> {
    let read_error = |source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let reader = BufReader::new(file);

    let mut entries = Vec::new();
    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw.map_err(read_error)?;
        let line = String::from_utf8_lossy(&raw);
        match parse_line(&line) {
            Some(entry) => entries.push(entry),
            None if line.trim().is_empty() => {}
            None => warn!(line = idx + 1, path = %path.display(), "skipping malformed line"),
        }
    }

    debug!(count = entries.len(), path = %path.display(), "read directory file");
    Ok(entries)
}

/// Overwrite `path` with one line per record, in iteration order.
pub fn write_records<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Record>,
{
    let write_error = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        writeln!(writer, "{}", format_line(record)).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::models::RecordId;

    fn record(id: u64, name: &str, phone: &str) -> Record {
        Record {
            id: RecordId(id),
            name: name.to_string(),
            phone_number: phone.to_string(),
        }
    }

    #[test]
    fn parse_accepts_trimmed_pair() {
        assert_eq!(
            parse_line("  Alice ,   5551234  "),
            Some(("Alice".to_string(), "5551234".to_string()))
        );
        assert_eq!(
            parse_line("Bob,5555678"),
            Some(("Bob".to_string(), "5555678".to_string()))
        );
    }

    #[test]
    fn parse_rejects_malformed_lines() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("no comma here"), None);
        assert_eq!(parse_line("Smith, John, 5551234"), None);
        assert_eq!(parse_line(" , 5551234"), None);
        assert_eq!(parse_line("Alice,   "), None);
        assert_eq!(parse_line("Alice, 555,"), None);
    }

    #[test]
    fn format_matches_file_layout() {
        assert_eq!(format_line(&record(0, "Carol", "5559999")), "Carol, 5559999");
    }

    #[test]
    fn read_scenario_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phone_directory.txt");
        fs::write(&path, "Alice, 5551234\nBob, 5555678\n").unwrap();

        let entries = read_records(&path).unwrap();
        assert_eq!(
            entries,
            vec![
                ("Alice".to_string(), "5551234".to_string()),
                ("Bob".to_string(), "5555678".to_string()),
            ]
        );
    }

    #[test]
    fn read_skips_malformed_lines_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        fs::write(
            &path,
            "Alice, 5551234\n\ngarbage\nA, B, C\n , 1\nBob, 5555678\r\n",
        )
        .unwrap();

        let entries = read_records(&path).unwrap();
        let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(entries[1].1, "5555678");
    }

    #[test]
    fn read_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"Alice, 5551234\nBob, 5555678\nCaf\xE9, 111\n").unwrap();

        let entries = read_records(&path).unwrap();
        let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Caf\u{FFFD}"]);
        assert_eq!(entries[2].1, "111");
    }

    #[test]
    fn read_directory_path_is_not_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = read_records(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert!(!err.is_missing_file());
    }

    #[test]
    fn read_empty_file_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        assert!(read_records(&path).unwrap().is_empty());
    }

    #[test]
    fn read_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let err = read_records(&path).unwrap_err();
        assert!(err.is_missing_file());
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn write_overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "stale, 000\nold, 111\nolder, 222\n").unwrap();

        let records = [record(0, "Ann", "1"), record(1, "ann", "2")];
        write_records(&path, &records).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Ann, 1\nann, 2\n");
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.txt");

        let err = write_records(&path, &[record(0, "Ann", "1")]).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }
}
