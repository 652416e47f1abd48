use std::fmt::{Display, Formatter, Result};
use annotate_snippets::display_list::{DisplayList, FormatOptions};
use annotate_snippets::snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation};
use itertools::Itertools;
use crate::util::Span;

use Mismatch::*;

/// One name that could not be turned into a table entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    MissingSize { name: String, starts: Vec<Span> },
    MissingStart { name: String, sizes: Vec<Span> },
    DuplicateStart { name: String, starts: Vec<Span> },
    DuplicateSize { name: String, sizes: Vec<Span> },
}

impl Mismatch {
    pub fn name(&self) -> &str {
        match self {
            MissingSize { name, .. }
            | MissingStart { name, .. }
            | DuplicateStart { name, .. }
            | DuplicateSize { name, .. } => name,
        }
    }

    pub fn spans(&self) -> &[Span] {
        match self {
            MissingSize { starts, .. } | DuplicateStart { starts, .. } => starts,
            MissingStart { sizes, .. } | DuplicateSize { sizes, .. } => sizes,
        }
    }

    fn message(&self) -> String {
        match self {
            MissingSize { name, .. } => format!("binary `{}` has a _start symbol but no _size symbol", name),
            MissingStart { name, .. } => format!("binary `{}` has a _size symbol but no _start symbol", name),
            DuplicateStart { name, starts } => format!("binary `{}` has {} _start symbols", name, starts.len()),
            DuplicateSize { name, sizes } => format!("binary `{}` has {} _size symbols", name, sizes.len()),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MissingSize { .. } => "no matching _size",
            MissingStart { .. } => "no matching _start",
            DuplicateStart { .. } | DuplicateSize { .. } => "defined here",
        }
    }
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.message())
    }
}

/// The `_start` and `_size` symbols of the input do not describe the same
/// set of binaries. Every offending name is listed.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationError {
    pub mismatches: Vec<Mismatch>,
}

impl CorrelationError {
    /// Renders every mismatch as a diagnostic pointing into `source`, the
    /// text the records were scanned from.
    pub fn render(&self, source: &str, origin: Option<&str>, color: bool) -> String {
        self.mismatches.iter()
            .map(|mismatch| {
                let message = mismatch.message();
                let snippet = Snippet {
                    title: Some(Annotation {
                        label: Some(message.as_str()),
                        id: None,
                        annotation_type: AnnotationType::Error,
                    }),
                    footer: vec![],
                    slices: vec![
                        Slice {
                            source,
                            line_start: 1,
                            origin,
                            fold: true,
                            annotations: mismatch.spans().iter()
                                .map(|span| SourceAnnotation {
                                    range: *span,
                                    label: mismatch.label(),
                                    annotation_type: AnnotationType::Error,
                                })
                                .collect(),
                        }
                    ],
                    opt: FormatOptions { color, ..Default::default() },
                };
                DisplayList::from(snippet).to_string()
            })
            .join("\n")
    }
}

impl Display for CorrelationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "symbol table does not correlate ({} problem(s)): {}",
               self.mismatches.len(),
               self.mismatches.iter().map(Mismatch::to_string).join("; "))
    }
}

impl std::error::Error for CorrelationError {}

/// A byte string that is not a well-formed packed table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    MissingSentinel,
    TruncatedEntry { name: String },
    InvalidName { offset: usize },
    InvalidValue { name: String, field: &'static str, value: String },
    TrailingBytes { offset: usize },
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        use TableError::*;
        match self {
            MissingSentinel => { write!(f, "table ended without the empty terminating record") }
            TruncatedEntry { name } => { write!(f, "entry `{}` is missing fields", name) }
            InvalidName { offset } => { write!(f, "name at byte {} is not valid UTF-8", offset) }
            InvalidValue { name, field, value } => { write!(f, "entry `{}` has a non-hex {} ({:?})", name, field, value) }
            TrailingBytes { offset } => { write!(f, "unexpected bytes after the terminator at byte {}", offset) }
        }
    }
}

impl std::error::Error for TableError {}
