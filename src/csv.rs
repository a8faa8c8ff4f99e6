//! Utilities for reading CSV files.

use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Reads comma-separated records, one per line. Fields are trimmed and stripped of enclosing
/// double quotes; blank lines are skipped.
pub struct CsvReader<R> {
    lines: Lines<R>,
    line: usize,
}
impl CsvReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// The 1-based line number of the most recently read record.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn read(&mut self) -> Option<Result<Vec<String>, io::Error>> {
        loop {
            let line = self.lines.next()?;
            self.line += 1;
            match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => return Some(Ok(split(&line))),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<R: BufRead> Iterator for CsvReader<R> {
    type Item = Result<Vec<String>, io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

fn split(line: &str) -> Vec<String> {
    line.split(',').map(unquote).map(ToString::to_string).collect()
}

fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|field| field.strip_suffix('"'))
        .unwrap_or(field)
}

/// Column names from a header record.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    names: Vec<String>,
}
impl Header {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for Header {
    fn from(names: Vec<String>) -> Self {
        // a UTF-8 byte order mark may precede the first name
        let names = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| match index {
                0 => name.trim_start_matches('\u{feff}').to_string(),
                _ => name,
            })
            .collect();
        Self { names }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_records() {
        let mut csv = CsvReader::new(Cursor::new("a,b,c\n1, 2 ,\"3\"\n\n4,,6\n"));
        assert_eq!(vec!["a", "b", "c"], csv.read().unwrap().unwrap());
        assert_eq!(1, csv.line());
        assert_eq!(vec!["1", "2", "3"], csv.read().unwrap().unwrap());
        assert_eq!(2, csv.line());
        assert_eq!(vec!["4", "", "6"], csv.read().unwrap().unwrap());
        assert_eq!(4, csv.line());
        assert!(csv.read().is_none());
    }

    #[test]
    fn read_crlf() {
        let records: Vec<_> = CsvReader::new(Cursor::new("x,y\r\n1,2\r\n"))
            .map(Result::unwrap)
            .collect();
        assert_eq!(vec![vec!["x", "y"], vec!["1", "2"]], records);
    }

    #[test]
    fn header_position() {
        let header = Header::from(vec![
            "\u{feff}GAME_ID".to_string(),
            "HOME_TEAM_ID".to_string(),
            "PTS_home".to_string(),
        ]);
        assert_eq!(3, header.len());
        assert!(!header.is_empty());
        assert_eq!(Some(0), header.position("GAME_ID"));
        assert_eq!(Some(2), header.position("PTS_home"));
        assert_eq!(None, header.position("PTS_away"));
    }

    #[test]
    fn open_missing_file() {
        assert!(CsvReader::open("/nonexistent/games.csv").is_err());
    }
}
