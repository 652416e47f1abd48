//! Helpers the kernel build runs over linker and compiler output.
//!
//! The main one is [`compile`], which turns the symbol table of an object
//! full of embedded binaries into the packed lookup table the loader reads.

use log::debug;

pub mod cli;
pub mod correlate;
pub mod deps;
pub mod error;
pub mod stack;
pub mod symbols;
pub mod table;

mod util;

pub use error::{CorrelationError, Mismatch, TableError};
pub use symbols::{AddressRecord, Record, Scanner, SizeRecord};
pub use table::{BinaryTableEntry, PackedTable};
pub use util::Span;

/// Builds the binary table from a `readelf -s` listing. The name of each
/// binary is the last `_`-separated component before `_start`/`_size`.
pub fn compile(input: &str) -> Result<PackedTable, CorrelationError> {
    build(Scanner::new(input))
}

/// Like [`compile`], but names are everything after `prefix`
/// (e.g. `_binary_obj_progs_`).
pub fn compile_prefixed(input: &str, prefix: &str) -> Result<PackedTable, CorrelationError> {
    build(Scanner::with_prefix(input, prefix))
}

fn build(scanner: Scanner) -> Result<PackedTable, CorrelationError> {
    let entries = correlate::correlate(scanner)?;
    debug!("packing {} binaries", entries.len());
    Ok(PackedTable::new(entries))
}
