use std::collections::BTreeMap;
use itertools::Itertools;
use log::debug;
use crate::error::{CorrelationError, Mismatch};
use crate::symbols::{AddressRecord, Record, SizeRecord};
use crate::table::BinaryTableEntry;

type ByName<'input, R> = BTreeMap<&'input str, Vec<R>>;

/// Pairs every `_start` record with the `_size` record of the same name.
///
/// Names come out in ascending byte order. A name that appears on only one
/// side, or more than once on either side, is a mismatch; if there are any,
/// no entries are returned and the error lists all of them.
pub fn correlate<'input>(records: impl IntoIterator<Item=Record<'input>>) -> Result<Vec<BinaryTableEntry>, CorrelationError> {
    let mut starts: ByName<AddressRecord> = BTreeMap::new();
    let mut sizes: ByName<SizeRecord> = BTreeMap::new();
    for record in records {
        match record {
            Record::Address(start) => starts.entry(start.name).or_default().push(start),
            Record::Size(size) => sizes.entry(size.name).or_default().push(size),
        }
    }
    debug!("correlating {} _start and {} _size names", starts.len(), sizes.len());

    let mut entries = Vec::new();
    let mut mismatches = Vec::new();
    for name in itertools::merge(starts.keys(), sizes.keys()).dedup() {
        match (by_name(&starts, name), by_name(&sizes, name)) {
            ([start], [size]) => entries.push(BinaryTableEntry {
                name: name.to_string(),
                address: start.address,
                size: size.size,
            }),
            (found_starts, found_sizes) => {
                let start_spans = found_starts.iter().map(|r| r.span).collect::<Vec<_>>();
                let size_spans = found_sizes.iter().map(|r| r.span).collect::<Vec<_>>();
                if found_starts.len() > 1 {
                    mismatches.push(Mismatch::DuplicateStart { name: name.to_string(), starts: start_spans.clone() });
                }
                if found_sizes.len() > 1 {
                    mismatches.push(Mismatch::DuplicateSize { name: name.to_string(), sizes: size_spans.clone() });
                }
                if found_sizes.is_empty() {
                    mismatches.push(Mismatch::MissingSize { name: name.to_string(), starts: start_spans });
                } else if found_starts.is_empty() {
                    mismatches.push(Mismatch::MissingStart { name: name.to_string(), sizes: size_spans });
                }
            }
        }
    }

    if mismatches.is_empty() {
        Ok(entries)
    } else {
        debug!("{} name(s) failed to correlate", mismatches.len());
        Err(CorrelationError { mismatches })
    }
}

fn by_name<'m, R>(map: &'m ByName<'_, R>, name: &str) -> &'m [R] {
    map.get(name).map(Vec::as_slice).unwrap_or(&[])
}
