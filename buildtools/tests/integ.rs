extern crate kernel_buildtools;

use kernel_buildtools::{compile, compile_prefixed, BinaryTableEntry, Mismatch, PackedTable};
use pretty_assertions::assert_eq;

#[test]
fn readelf_dump() {
    test(
        include_str!("inputs/progs.sym"),
        &[
            ("init", 0x1a40, 0x200),
            ("mkdir", 0x1c40, 0x3c0),
            ("shell", 0x1000, 0xa40),
        ],
    );
}

#[test]
fn example_scenario() {
    let input = "   3: 00001000  1 NOTYPE GLOBAL DEFAULT 1 _binary_obj_progs_init_start\n   7: 00000200  1 NOTYPE GLOBAL DEFAULT  ABS _binary_obj_progs_init_size\n";
    assert_eq!(&b"init\000001000\0200\0\0"[..], &compile(input).unwrap().to_bytes()[..]);
}

#[test]
fn many_binaries_round_trip() {
    let expected = (0..40u64)
        .map(|i| (format!("prog{:02}", i), 0x10_0000 + i * 0x1000, 0x100 + i))
        .collect::<Vec<_>>();
    // Sizes first, then starts in reverse, to make sure input order doesn't matter.
    let mut input = String::new();
    for (i, (name, _, size)) in expected.iter().enumerate() {
        input.push_str(&format!("{:6}: {:08x}     1 NOTYPE  GLOBAL DEFAULT  ABS _binary_obj_progs_{}_size\n", i, size, name));
    }
    for (i, (name, address, _)) in expected.iter().enumerate().rev() {
        input.push_str(&format!("{:6}: {:08x}     1 NOTYPE  GLOBAL DEFAULT    1 _binary_obj_progs_{}_start\n", i + 40, address, name));
    }

    let bytes = compile(&input).unwrap().to_bytes();
    let fields = bytes.split(|b| *b == 0).collect::<Vec<_>>();
    // 3 fields per entry, the empty sentinel, and the empty remainder after it.
    assert_eq!(expected.len() * 3 + 2, fields.len());
    assert_eq!(Some(&0u8), bytes.last());

    let decoded = PackedTable::decode(&bytes).unwrap();
    let decoded = decoded.entries().iter()
        .map(|e| (e.name.clone(), e.address, e.size))
        .collect::<Vec<_>>();
    assert_eq!(expected, decoded);
}

#[test]
fn noise_is_ignored() {
    let clean = include_str!("inputs/progs.sym");
    let noisy = clean.lines()
        .flat_map(|line| vec![line, "garbage: NOTYPE GLOBAL DEFAULT 1 _binary_", "   99: zzzz 1 NOTYPE GLOBAL DEFAULT ABS _binary_x_size", ""])
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(compile(clean).unwrap(), compile(&noisy).unwrap());
}

#[test]
fn input_order_does_not_change_output() {
    let input = include_str!("inputs/progs.sym");
    let reversed = input.lines().rev().collect::<Vec<_>>().join("\n");
    let first = compile(input).unwrap().to_bytes();
    let second = compile(&reversed).unwrap().to_bytes();
    assert_eq!(first, second);
    assert_eq!(first, compile(input).unwrap().to_bytes());
}

#[test]
fn unmatched_input_gives_empty_table() {
    assert_eq!(vec![0u8], compile("").unwrap().to_bytes());
    assert_eq!(vec![0u8], compile("Symbol table '.symtab' contains 0 entries:\n").unwrap().to_bytes());
}

#[test]
fn orphans_and_duplicates_fail() {
    let input = include_str!("inputs/orphans.sym");
    let error = compile(input).unwrap_err();
    let names = error.mismatches.iter()
        .map(|m| match m {
            Mismatch::MissingSize { name, .. } => format!("missing size: {}", name),
            Mismatch::MissingStart { name, .. } => format!("missing start: {}", name),
            Mismatch::DuplicateStart { name, .. } => format!("duplicate start: {}", name),
            Mismatch::DuplicateSize { name, .. } => format!("duplicate size: {}", name),
        })
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            "missing size: cat",
            "duplicate start: echo",
            "missing size: echo",
            "missing start: ls",
        ],
        names
    );

    for mismatch in error.mismatches.iter() {
        for &(start, end) in mismatch.spans() {
            assert!(input[start..end].contains(mismatch.name()));
        }
    }

    let rendered = error.render(input, Some("orphans.sym"), false);
    assert!(rendered.contains("_binary_obj_progs_cat_start"), "{}", rendered);
    assert!(rendered.contains("_binary_obj_progs_ls_size"), "{}", rendered);
}

#[test]
fn prefix_allows_underscores_in_names() {
    let input = "\
  1: 00004000 1 NOTYPE GLOBAL DEFAULT 1 _binary_obj_progs_hello_world_start
  2: 00000010 1 NOTYPE GLOBAL DEFAULT ABS _binary_obj_progs_hello_world_size
";
    let table = compile_prefixed(input, "_binary_obj_progs_").unwrap();
    assert_eq!(
        Some(&BinaryTableEntry { name: "hello_world".to_string(), address: 0x4000, size: 0x10 }),
        table.get("hello_world")
    );
    assert_eq!(None, compile(input).unwrap().get("hello_world"));
}

fn test(input: &str, expected: &[(&str, u64, u64)]) {
    let table = compile(input).unwrap();
    let mut bytes = Vec::new();
    for (name, address, size) in expected {
        bytes.extend_from_slice(name.as_bytes());
        bytes.push(0);
        bytes.extend_from_slice(format!("{:08x}", address).as_bytes());
        bytes.push(0);
        bytes.extend_from_slice(format!("{:x}", size).as_bytes());
        bytes.push(0);
    }
    bytes.push(0);
    assert_eq!(bytes, table.to_bytes());
}
