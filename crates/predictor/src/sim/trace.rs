//! Text branch trace reader.
//!
//! One branch per line, whitespace separated:
//! - `<pc> <target> <taken> <conditional> <call> <ret> <direct>` with hex
//!   addresses and 0/1 flags;
//! - `<pc> <taken>` for conditional-only traces (direct, no target).
//!
//! Blank lines and lines starting with `#` are skipped. Line numbers in
//! errors are 1-based; a line that is not UTF-8 is a parse error at its line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

use crate::common::branch::BranchRecord;
use crate::common::error::TraceError;

/// Parses a hexadecimal address, with or without a `0x` prefix.
fn parse_hex(field: &str, line: usize) -> Result<u64, TraceError> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u64::from_str_radix(digits, 16).map_err(|e| TraceError::Parse {
        line,
        reason: format!("bad address '{field}': {e}"),
    })
}

/// Parses a `0`/`1` flag.
fn parse_flag(field: &str, name: &str, line: usize) -> Result<bool, TraceError> {
    match field {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(TraceError::Parse {
            line,
            reason: format!("bad {name} flag '{field}' (expected 0 or 1)"),
        }),
    }
}

/// Parses one trace line.
///
/// Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(text: &str, line: usize) -> Result<Option<BranchRecord>, TraceError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = text.split_whitespace().collect();
    let record = match fields.as_slice() {
        [pc, taken] => {
            BranchRecord::conditional(parse_hex(pc, line)?, parse_flag(taken, "taken", line)?)
        }
        [pc, target, taken, cond, call, ret, direct] => BranchRecord {
            pc: parse_hex(pc, line)?,
            target: parse_hex(target, line)?,
            taken: parse_flag(taken, "taken", line)?,
            conditional: parse_flag(cond, "conditional", line)?,
            call: parse_flag(call, "call", line)?,
            ret: parse_flag(ret, "ret", line)?,
            direct: parse_flag(direct, "direct", line)?,
        },
        other => {
            return Err(TraceError::Parse {
                line,
                reason: format!("expected 2 or 7 fields, found {}", other.len()),
            });
        }
    };
    Ok(Some(record))
}

/// Iterator over the branch records of a text trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line(&self) -> usize {
        self.line
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let read = self.lines.next()?;
            self.line += 1;
            let text = match read {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    return Some(Err(TraceError::Parse {
                        line: self.line,
                        reason: e.to_string(),
                    }));
                }
                Err(e) => return Some(Err(e.into())),
            };
            match parse_line(&text, self.line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
