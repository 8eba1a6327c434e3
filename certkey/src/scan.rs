//! Binary-safe scanning helpers for PEM-style text embedded in arbitrary bytes.

/// Find the first byte-exact occurrence of `tag` in `data[start..]`.
///
/// Returns the absolute offset of the match. No case folding; embedded NUL
/// bytes in `data` are ordinary bytes here.
pub fn find_tag(tag: &str, data: &[u8], start: usize) -> Option<usize> {
    let tag = tag.as_bytes();
    let haystack = data.get(start..)?;
    if tag.is_empty() || haystack.len() < tag.len() {
        return None;
    }
    haystack
        .windows(tag.len())
        .position(|window| window == tag)
        .map(|pos| start + pos)
}

/// Cursor handing out the lines of a byte range.
///
/// A line ends at `\n` (not included) or at the end of the range. An embedded
/// NUL byte ends the whole input, not just the current line: everything after
/// it is ignored.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Extract the next line and advance past its delimiter.
    ///
    /// Returns `None` for an empty line as well as at the end of input; use
    /// [`LineCursor::is_exhausted`] to tell the two apart.
    pub fn extract_line(&mut self) -> Option<&'a [u8]> {
        let rest = self.data.get(self.pos..)?;
        let start = self.pos;

        match rest.iter().position(|&b| b == b'\n' || b == b'\0') {
            Some(offset) if rest[offset] == b'\n' => {
                self.pos = start + offset + 1;
                non_empty(&rest[..offset])
            }
            Some(offset) => {
                // NUL terminates everything
                self.pos = self.data.len();
                non_empty(&rest[..offset])
            }
            None => {
                self.pos = self.data.len();
                non_empty(rest)
            }
        }
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a [u8];

    /// Next non-empty line
    fn next(&mut self) -> Option<&'a [u8]> {
        while !self.is_exhausted() {
            if let Some(line) = self.extract_line() {
                return Some(line);
            }
        }
        None
    }
}

fn non_empty(line: &[u8]) -> Option<&[u8]> {
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Whitespace as understood by the header grammar (includes vertical tab)
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Strip leading and trailing header whitespace
pub(crate) fn trim_space(line: &[u8]) -> &[u8] {
    let start = line.iter().position(|&b| !is_space(b)).unwrap_or(line.len());
    let end = line.iter().rposition(|&b| !is_space(b)).map_or(start, |p| p + 1);
    &line[start..end]
}
