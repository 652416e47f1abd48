use log::{debug, warn};
use regex::Regex;
use crate::util::{lines_with_offsets, parse_hex, Span};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordKind {
    Address,
    Size,
}

/// `_binary..._<name>_start`, defined in section 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressRecord<'input> {
    pub name: &'input str,
    pub address: u64,
    pub span: Span,
}

/// `_binary..._<name>_size`, an absolute symbol whose value is the blob size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRecord<'input> {
    pub name: &'input str,
    pub size: u64,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Record<'input> {
    Address(AddressRecord<'input>),
    Size(SizeRecord<'input>),
}

impl<'input> Record<'input> {
    pub fn name(&self) -> &'input str {
        match self {
            Record::Address(record) => record.name,
            Record::Size(record) => record.name,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Address(_) => RecordKind::Address,
            Record::Size(_) => RecordKind::Size,
        }
    }
}

/// Pulls `_start`/`_size` records of embedded binaries out of a `readelf -s`
/// style listing. Lines matching neither pattern are skipped.
pub struct Scanner<'input> {
    lines: Box<dyn Iterator<Item=(usize, &'input str)> + 'input>,
    patterns: Vec<(Regex, RecordKind)>,
}

use RecordKind::*;

impl<'input> Scanner<'input> {

    // Section index column and symbol suffix for each record kind.
    // The shared columns (index, value, size, type, bind, visibility) are
    // added by `register_pattern`, so don't repeat them here.
    const PATTERNS: [(&'static str, &'static str, RecordKind); 2] = [
        ("1",   "start", Address),
        ("ABS", "size",  Size),
    ];

    // Greedy infix: the name is the last `_`-separated component.
    const DEFAULT_SYMBOL: &'static str = r"_binary\w*_(\w+)";

    pub fn new(src: &'input str) -> Scanner<'input> {
        Self::with_symbol_pattern(src, Self::DEFAULT_SYMBOL)
    }

    /// Everything between `prefix` and the `_start`/`_size` suffix is the
    /// name, so names may contain underscores.
    pub fn with_prefix(src: &'input str, prefix: &str) -> Scanner<'input> {
        let symbol = format!(r"{}(\w+)", regex::escape(prefix));
        Self::with_symbol_pattern(src, symbol.as_str())
    }

    fn with_symbol_pattern(src: &'input str, symbol: &str) -> Scanner<'input> {
        let mut this = Scanner {
            lines: Box::new(lines_with_offsets(src)),
            patterns: Vec::new(),
        };

        for (section, suffix, kind) in Self::PATTERNS.iter() {
            this.register_pattern(section, symbol, suffix, *kind);
        }

        this
    }

    fn register_pattern(&mut self, section: &str, symbol: &str, suffix: &str, kind: RecordKind) {
        let pattern = format!(
            r"^\s*\d+:\s*([0-9A-Fa-f]+)\s+\d+\s+NOTYPE\s+GLOBAL\s+DEFAULT\s+{}\s+({}_{})\s*$",
            section, symbol, suffix
        );
        let regex = Regex::new(pattern.as_str()).expect("Invalid regex");
        self.patterns.push((regex, kind))
    }

    fn scan_line(&self, offset: usize, line: &'input str) -> Option<Record<'input>> {
        for (pattern, kind) in &self.patterns {
            let captures = match pattern.captures(line) {
                Some(captures) => captures,
                None => continue,
            };
            let value_text = captures.get(1)?.as_str();
            let symbol = captures.get(2)?;
            let name = captures.get(3)?.as_str();
            let span = (offset + symbol.start(), offset + symbol.end());

            let value = match parse_hex::<u64>(value_text) {
                Some(value) => value,
                None => {
                    warn!("skipping {}: value {} does not fit in 64 bits", symbol.as_str(), value_text);
                    return None;
                }
            };

            let record = match kind {
                Address => Record::Address(AddressRecord { name, address: value, span }),
                Size => Record::Size(SizeRecord { name, size: value, span }),
            };
            debug!("found {:?} record for {} ({:#x})", kind, name, value);
            return Some(record);
        }
        None
    }
}

impl<'input> Iterator for Scanner<'input> {
    type Item = Record<'input>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((offset, line)) = self.lines.next() {
            if let Some(record) = self.scan_line(offset, line) {
                return Some(record);
            }
        }
        None
    }
}
