//! Commit log ingestion.
//!
//! Reads the per-line change log (`loc.csv`) into typed [`LogRow`]s. Columns
//! are located by header name so their order does not matter; unknown columns
//! are ignored.
//!
//! Malformed rows are fatal: the first row with an unparsable required field
//! aborts the whole load with a [`MalformedRowError`] naming the CSV line,
//! the column and the raw value.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;

use crate::error::{LoadError, MalformedRowError};

/// One line of one file as touched by one commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRow {
    pub commit: String,
    pub file: String,
    /// Language / file type tag (e.g. "js", "css")
    pub file_type: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub author: String,
    /// Midnight of the commit's calendar date, local to its timezone
    pub date: DateTime<FixedOffset>,
    pub time: String,
    pub timezone: String,
    /// Authoritative commit timestamp
    pub datetime: DateTime<FixedOffset>,
}

/// Header positions of the required columns.
struct LogColumns {
    commit: usize,
    file: usize,
    file_type: usize,
    line: usize,
    depth: usize,
    length: usize,
    author: usize,
    date: usize,
    time: usize,
    timezone: usize,
    datetime: usize,
}

impl LogColumns {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            commit: find("commit")?,
            file: find("file")?,
            file_type: find("type")?,
            line: find("line")?,
            depth: find("depth")?,
            length: find("length")?,
            author: find("author")?,
            date: find("date")?,
            time: find("time")?,
            timezone: find("timezone")?,
            datetime: find("datetime")?,
        })
    }

    fn parse_row(&self, record: &StringRecord, line: u64) -> Result<LogRow, MalformedRowError> {
        let field = |idx: usize| record.get(idx).unwrap_or("");
        let malformed = |column: &'static str, idx: usize| MalformedRowError {
            line,
            column,
            value: field(idx).to_string(),
        };

        let commit = field(self.commit);
        if commit.is_empty() {
            return Err(malformed("commit", self.commit));
        }

        let number = |column: &'static str, idx: usize| {
            field(idx)
                .parse::<u32>()
                .map_err(|_| malformed(column, idx))
        };

        let timezone = field(self.timezone);
        let offset = parse_offset(timezone).ok_or_else(|| malformed("timezone", self.timezone))?;
        let date = parse_midnight(field(self.date), offset)
            .ok_or_else(|| malformed("date", self.date))?;
        let datetime =
            parse_timestamp(field(self.datetime)).ok_or_else(|| malformed("datetime", self.datetime))?;

        Ok(LogRow {
            commit: commit.to_string(),
            file: field(self.file).to_string(),
            file_type: field(self.file_type).to_string(),
            line: number("line", self.line)?,
            depth: number("depth", self.depth)?,
            length: number("length", self.length)?,
            author: field(self.author).to_string(),
            date,
            time: field(self.time).to_string(),
            timezone: timezone.to_string(),
            datetime,
        })
    }
}

/// Load the commit log from a file on disk.
pub fn load_log<P: AsRef<Path>>(path: P) -> Result<Vec<LogRow>, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_log(std::io::BufReader::new(file))
}

/// Parse a commit log from any CSV source. A source without a header line
/// is an empty log.
pub fn parse_log<R: Read>(source: R) -> Result<Vec<LogRow>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let columns = LogColumns::from_headers(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        rows.push(columns.parse_row(&record, line)?);
    }

    Ok(rows)
}

/// Parse a UTC offset written as `Z`, `+HH:MM`, `+HHMM` or `+HH`.
pub fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }

    let sign = match raw.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let digits: String = raw[1..].chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes): (i32, i32) = match digits.len() {
        2 => (digits.parse().ok()?, 0),
        4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn parse_midnight(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    offset.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).single()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%z"))
        .ok()
}
