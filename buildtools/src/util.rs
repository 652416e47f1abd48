use num_traits::Num;

/// Byte range `(start, end)` into the scanned input.
pub type Span = (usize, usize);

pub(crate) fn parse_hex<T: Num>(digits: &str) -> Option<T> {
    T::from_str_radix(digits, 16).ok()
}

/// Lines of `src` paired with the offset they start at. Line terminators
/// (`\n` or `\r\n`) are not part of the yielded line.
pub(crate) fn lines_with_offsets<'input>(src: &'input str) -> impl Iterator<Item=(usize, &'input str)> + 'input {
    let mut offset = 0;
    src.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        (start, line)
    })
}
