use itertools::Itertools;
use log::{debug, warn};
use regex::Regex;
use crate::util::parse_hex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackFrame<'input> {
    /// Address of the `sub` instruction, as printed by the disassembler.
    pub address: &'input str,
    pub size: u64,
}

// `  4010a3:  83 ec 40   sub $0x40,%esp`
const FRAME_PATTERN: &str = r"(?m)^\s*([A-Fa-f0-9]+).*?sub\s*\$0x([A-Fa-f0-9]+)\s*,\s*%[er]sp";

/// Finds stack pointer adjustments larger than `min_size` bytes in
/// `objdump -d` output, smallest first.
pub fn check_stack(disassembly: &str, min_size: u64) -> Vec<StackFrame> {
    let regex = Regex::new(FRAME_PATTERN).expect("Invalid regex");
    let frames = regex.captures_iter(disassembly)
        .filter_map(|captures| {
            let address = captures.get(1)?.as_str();
            let size_text = captures.get(2)?.as_str();
            match parse_hex::<u64>(size_text) {
                Some(size) => Some(StackFrame { address, size }),
                None => {
                    warn!("skipping frame at 0x{}: size 0x{} does not fit in 64 bits", address, size_text);
                    None
                }
            }
        })
        .filter(|frame| frame.size > min_size)
        .sorted_by_key(|frame| frame.size)
        .collect::<Vec<_>>();
    debug!("{} stack frame(s) larger than {} bytes", frames.len(), min_size);
    frames
}

/// The text `checkstack` prints, ending in an empty line.
pub fn report(frames: &[StackFrame]) -> String {
    let mut out = String::new();
    if frames.is_empty() {
        out.push_str("PASSED stack check\n");
    } else {
        for StackFrame { address, size } in frames {
            out.push_str(&format!("WARNING: stack frame of size {:4} at 0x{}\n", size, address));
        }
    }
    out.push('\n');
    out
}
