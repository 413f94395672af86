//! Reading CSV input and opening the input/output streams.
//!
//! Input is parsed with the `csv` crate in its standard dialect: comma
//! separated, double-quote quoting, no header row and flexible record lengths.
//! Every field is kept as plain text.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Csv2RstError;
use crate::table::{Row, Table};
use crate::Result;

/// Read every CSV record from `reader` into a [`Table`].
///
/// A blank line in the input becomes an empty row.
pub fn read_table<R: Read>(mut reader: R) -> Result<Table> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut table = Table::new();
    let mut record = csv::StringRecord::new();
    loop {
        // the csv reader skips blank lines silently, so count them first
        let at = csv_reader.position().byte() as usize;
        for _ in 0..blank_lines_at(&data, at) {
            table.push_row(Row::new());
        }
        if !csv_reader.read_record(&mut record)? {
            break;
        }
        table.push_row(record.iter().map(str::to_string).collect());
    }

    debug!(
        rows = table.len(),
        columns = table.column_count(),
        "read CSV table"
    );
    Ok(table)
}

/// Number of empty lines starting at byte `at`, which is just past a record
/// terminator (or the start of input). `\n`, `\r` and `\r\n` each end a line.
fn blank_lines_at(data: &[u8], mut at: usize) -> usize {
    // the `\n` of a `\r\n` terminator may not have been consumed yet
    if at > 0 && data.get(at - 1) == Some(&b'\r') && data.get(at) == Some(&b'\n') {
        at += 1;
    }
    let mut blank = 0;
    loop {
        match data.get(at) {
            Some(b'\r') if data.get(at + 1) == Some(&b'\n') => at += 2,
            Some(b'\r') | Some(b'\n') => at += 1,
            _ => return blank,
        }
        blank += 1;
    }
}

/// Read a CSV file into a [`Table`].
pub fn read_table_from_path(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Csv2RstError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(file)
}

/// Open the input file, or standard input when no path is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "reading input file");
            let file = File::open(path).map_err(|source| Csv2RstError::InputUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(file))
        }
        None => {
            debug!("reading standard input");
            Ok(Box::new(io::stdin().lock()))
        }
    }
}

/// Create (or truncate) the output file, or use standard output when no path
/// is given. The returned writer is buffered.
pub fn create_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "writing output file");
            let file = File::create(path).map_err(|source| Csv2RstError::OutputUnwritable {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_simple_table() {
        let table = read_table("a,b\nccc,d\n".as_bytes()).unwrap();
        assert_eq!(table, Table::from_rows([vec!["a", "b"], vec!["ccc", "d"]]));
    }

    #[test]
    fn test_read_quoted_fields() {
        let input = "\"x, y\",\"say \"\"hi\"\"\"\n\"multi\nline\",z\n";
        let table = read_table(input.as_bytes()).unwrap();
        assert_eq!(table.rows[0], vec!["x, y", "say \"hi\""]);
        assert_eq!(table.rows[1], vec!["multi\nline", "z"]);
    }

    #[test]
    fn test_read_ragged_rows() {
        let table = read_table("a,b,c\nd\ne,f\n".as_bytes()).unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.rows[1].len(), 1);
        assert_eq!(table.rows[2].len(), 2);
    }

    #[test]
    fn test_first_row_is_data() {
        let table = read_table("h1,h2\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0], vec!["h1", "h2"]);
    }

    #[test]
    fn test_read_empty_input() {
        let table = read_table("".as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_malformed_input() {
        let bytes: &[u8] = b"ok,\xff\xfe\n";
        let err = read_table(bytes).unwrap_err();
        assert!(matches!(err, Csv2RstError::MalformedInput(_)));
    }

    #[test]
    fn test_missing_input_file() {
        let err = read_table_from_path("/nonexistent/csv2rst/input.csv").unwrap_err();
        assert!(matches!(err, Csv2RstError::InputUnavailable { .. }));
        assert!(err.to_string().contains("/nonexistent/csv2rst/input.csv"));
    }

    #[test]
    fn test_open_missing_input() {
        let err = open_input(Some(Path::new("/nonexistent/csv2rst/input.csv")))
            .err()
            .unwrap();
        assert!(matches!(err, Csv2RstError::InputUnavailable { .. }));
    }

    #[test]
    fn test_create_output_in_missing_dir() {
        let err = create_output(Some(Path::new("/nonexistent/csv2rst/out.rst")))
            .err()
            .unwrap();
        assert!(matches!(err, Csv2RstError::OutputUnwritable { .. }));
    }

    #[test]
    fn test_blank_lines_become_empty_rows() {
        let table = read_table("a,b\n\nc,d\n".as_bytes()).unwrap();
        assert_eq!(
            table.rows,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec![],
                vec!["c".to_string(), "d".to_string()],
            ]
        );
    }

    #[test]
    fn test_blank_lines_with_crlf() {
        let table = read_table("a,b\r\n\r\n\r\nc,d\r\n".as_bytes()).unwrap();
        let lengths: Vec<usize> = table.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![2, 0, 0, 2]);
    }

    #[test]
    fn test_leading_and_trailing_blank_lines() {
        let table = read_table("\nx\n\n".as_bytes()).unwrap();
        let lengths: Vec<usize> = table.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![0, 1, 0]);
    }

    #[test]
    fn test_blank_line_inside_quotes_is_data() {
        let table = read_table("\"a\n\nb\",c\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][0], "a\n\nb");
    }

    #[test]
    fn test_blank_lines_at() {
        assert_eq!(blank_lines_at(b"", 0), 0);
        assert_eq!(blank_lines_at(b"a\n\n\nb", 2), 2);
        assert_eq!(blank_lines_at(b"a\r\n\r\nb", 2), 1);
        assert_eq!(blank_lines_at(b"a\r\r\nb", 2), 1);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_read_failure_is_io_error() {
        let err = read_table(FailingReader).unwrap_err();
        assert!(matches!(err, Csv2RstError::Io(_)));
        assert!(!err.to_string().contains("malformed"));
    }
}
