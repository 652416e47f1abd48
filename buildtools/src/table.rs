use std::io::{self, Write};
use std::str;
use crate::error::TableError;
use crate::util::parse_hex;

const TERMINATOR: u8 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryTableEntry {
    pub name: String,
    pub address: u64,
    pub size: u64,
}

/// Embedded binaries keyed by name, in the null-delimited layout the loader
/// reads: `name\0address\0size\0` per entry, then one extra `\0`.
///
/// Addresses are written as lowercase hex padded to 8 digits, sizes as
/// lowercase hex without padding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedTable {
    entries: Vec<BinaryTableEntry>,
}

impl PackedTable {
    /// Entries are kept sorted by name.
    pub fn new(mut entries: Vec<BinaryTableEntry>) -> PackedTable {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        PackedTable { entries }
    }

    pub fn entries(&self) -> &[BinaryTableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&BinaryTableEntry> {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.entries[index])
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for BinaryTableEntry { name, address, size } in self.entries.iter() {
            push_field(&mut bytes, name.as_bytes());
            push_field(&mut bytes, format!("{:08x}", address).as_bytes());
            push_field(&mut bytes, format!("{:x}", size).as_bytes());
        }
        bytes.push(TERMINATOR);
        bytes
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.to_bytes())
    }

    /// Reads a table back the way the loader does, stopping at the empty
    /// record. Anything after it is an error.
    pub fn decode(bytes: &[u8]) -> Result<PackedTable, TableError> {
        let mut entries = Vec::new();
        let mut cursor = 0;
        loop {
            let name_offset = cursor;
            let name = next_field(bytes, &mut cursor).ok_or(TableError::MissingSentinel)?;
            if name.is_empty() {
                break;
            }
            let name = str::from_utf8(name)
                .map_err(|_| TableError::InvalidName { offset: name_offset })?
                .to_string();

            let address = next_field(bytes, &mut cursor)
                .ok_or_else(|| TableError::TruncatedEntry { name: name.clone() })?;
            let size = next_field(bytes, &mut cursor)
                .ok_or_else(|| TableError::TruncatedEntry { name: name.clone() })?;

            let address = decode_value(&name, "address", address)?;
            let size = decode_value(&name, "size", size)?;
            entries.push(BinaryTableEntry { name, address, size });
        }

        if cursor != bytes.len() {
            return Err(TableError::TrailingBytes { offset: cursor });
        }
        Ok(PackedTable { entries })
    }
}

fn push_field(bytes: &mut Vec<u8>, field: &[u8]) {
    bytes.extend_from_slice(field);
    bytes.push(TERMINATOR);
}

fn next_field<'a>(bytes: &'a [u8], cursor: &mut usize) -> Option<&'a [u8]> {
    let rest = &bytes[*cursor..];
    let len = rest.iter().position(|b| *b == TERMINATOR)?;
    *cursor += len + 1;
    Some(&rest[..len])
}

fn decode_value(name: &str, field: &'static str, raw: &[u8]) -> Result<u64, TableError> {
    str::from_utf8(raw)
        .ok()
        .and_then(parse_hex)
        .ok_or_else(|| TableError::InvalidValue {
            name: name.to_string(),
            field,
            value: String::from_utf8_lossy(raw).into_owned(),
        })
}
