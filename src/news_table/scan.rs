//! Tolerant HTML scanning: just enough structure to pull one table out of a page.
//!
//! Tag and attribute names are matched ASCII case-insensitively against a
//! lowercased copy of the document. `to_ascii_lowercase` keeps byte offsets
//! intact, so ranges found in the copy index the original text directly.

use std::ops::Range;

pub(crate) struct Scanner<'a> {
    src: &'a str,
    lower: String,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            src,
            lower: src.to_ascii_lowercase(),
        }
    }

    /// Inner range of the first element whose `id` attribute equals `id`.
    ///
    /// If the element is never closed, the range runs to the end of the document.
    pub(crate) fn element_by_id(&self, id: &str) -> Option<Range<usize>> {
        if id.is_empty() {
            return None;
        }

        let mut from = 0;
        while let Some(off) = self.src[from..].find(id) {
            let hit = from + off;
            from = hit + id.len();

            let Some(open) = self.src[..hit].rfind('<') else {
                continue;
            };
            let Some(close) = tag_end(self.src, open) else {
                continue;
            };
            if close < hit {
                continue;
            }

            let tag = &self.src[open + 1..close];
            let Some((name, attrs)) = split_tag_name(tag) else {
                continue;
            };
            if attr_value(attrs, "id") != Some(id) {
                continue;
            }

            let inner_start = close + 1;
            if tag.ends_with('/') {
                return Some(inner_start..inner_start);
            }
            let name = name.to_ascii_lowercase();
            let end = self
                .matching_close(&name, inner_start, self.src.len())
                .unwrap_or(self.src.len());
            return Some(inner_start..end);
        }
        None
    }

    /// Inner ranges of every `tag` element inside `within`, without nesting.
    ///
    /// An element ends at its own close tag or at the next open tag of the same
    /// name, whichever comes first, so omitted `</tr>`/`</td>` tags are tolerated.
    pub(crate) fn flat_blocks(&self, within: Range<usize>, tag: &str) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        let mut pos = within.start;

        while let Some(open) = self.find_open(tag, pos, within.end) {
            let Some(gt) = tag_end(self.src, open).filter(|&g| g < within.end) else {
                break;
            };
            let inner_start = gt + 1;
            let next_close = self.find_close(tag, inner_start, within.end);
            let next_open = self.find_open(tag, inner_start, within.end);
            let end = match (next_close, next_open) {
                (Some(c), Some(o)) => c.min(o),
                (Some(c), None) => c,
                (None, Some(o)) => o,
                (None, None) => within.end,
            };
            out.push(inner_start..end);
            pos = end;
        }
        out
    }

    /// Inner range of the first `tag` element inside `within`.
    pub(crate) fn first_block(&self, within: Range<usize>, tag: &str) -> Option<Range<usize>> {
        let open = self.find_open(tag, within.start, within.end)?;
        let single = open..within.end;
        self.flat_blocks(single, tag).into_iter().next()
    }

    /// Visible text of `range`: tags and comments removed, entities decoded.
    /// Whitespace is kept as-is.
    pub(crate) fn text(&self, range: Range<usize>) -> String {
        let raw = &self.src[range];
        let mut out = String::with_capacity(raw.len());
        let mut pos = 0;

        while let Some(off) = raw[pos..].find('<') {
            let lt = pos + off;
            out.push_str(&raw[pos..lt]);

            let rest = &raw[lt + 1..];
            if rest.starts_with("!--") {
                pos = match rest[3..].find("-->") {
                    Some(e) => lt + 1 + 3 + e + 3,
                    None => raw.len(),
                };
                continue;
            }

            let starts_tag = rest
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');
            if !starts_tag {
                out.push('<');
                pos = lt + 1;
                continue;
            }

            pos = match tag_end(raw, lt) {
                Some(gt) => gt + 1,
                None => raw.len(),
            };
        }
        if pos < raw.len() {
            out.push_str(&raw[pos..]);
        }

        decode_entities(&out)
    }

    fn find_open(&self, tag: &str, from: usize, limit: usize) -> Option<usize> {
        let needle = format!("<{tag}");
        let mut pos = from;
        while pos < limit {
            let off = self.lower[pos..limit].find(&needle)?;
            let at = pos + off;
            if is_name_boundary(&self.lower, at + needle.len()) {
                return Some(at);
            }
            pos = at + needle.len();
        }
        None
    }

    fn find_close(&self, tag: &str, from: usize, limit: usize) -> Option<usize> {
        let needle = format!("</{tag}");
        let mut pos = from;
        while pos < limit {
            let off = self.lower[pos..limit].find(&needle)?;
            let at = pos + off;
            if is_name_boundary(&self.lower, at + needle.len()) {
                return Some(at);
            }
            pos = at + needle.len();
        }
        None
    }

    /// Start of the close tag balancing an element of `name` opened before `from`.
    fn matching_close(&self, name: &str, from: usize, limit: usize) -> Option<usize> {
        let mut depth = 1usize;
        let mut pos = from;
        loop {
            let next_open = self.find_open(name, pos, limit);
            let close = self.find_close(name, pos, limit)?;
            match next_open {
                Some(o) if o < close => {
                    depth += 1;
                    pos = o + 1;
                }
                _ => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(close);
                    }
                    pos = close + 1;
                }
            }
        }
    }
}

/// Whether the byte at `at` ends a tag name (whitespace, `>`, `/` or end of input).
fn is_name_boundary(s: &str, at: usize) -> bool {
    match s.as_bytes().get(at) {
        None => true,
        Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
    }
}

/// Index of the `>` closing the tag that starts at `start`, skipping quoted values.
fn tag_end(s: &str, start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in s.as_bytes().iter().enumerate().skip(start + 1) {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

/// Splits the inside of an open tag into its name and attribute text.
fn split_tag_name(tag: &str) -> Option<(&str, &str)> {
    if !tag.chars().next()?.is_ascii_alphabetic() {
        return None;
    }
    let end = tag
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(tag.len());
    Some((&tag[..end], &tag[end..]))
}

/// Value of attribute `name` in `attrs`. Quoted and bare values are accepted;
/// a valueless attribute yields `""`.
fn attr_value<'t>(attrs: &'t str, name: &str) -> Option<&'t str> {
    let b = attrs.as_bytes();
    let mut i = 0;
    loop {
        while i < b.len() && (b[i].is_ascii_whitespace() || b[i] == b'/') {
            i += 1;
        }
        if i >= b.len() {
            return None;
        }

        let key_start = i;
        while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'=' && b[i] != b'/' {
            i += 1;
        }
        let key = &attrs[key_start..i];

        while i < b.len() && b[i].is_ascii_whitespace() {
            i += 1;
        }
        let value = if i < b.len() && b[i] == b'=' {
            i += 1;
            while i < b.len() && b[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < b.len() && (b[i] == b'"' || b[i] == b'\'') {
                let q = char::from(b[i]);
                let value_start = i + 1;
                let value_end = attrs[value_start..]
                    .find(q)
                    .map_or(attrs.len(), |e| value_start + e);
                i = (value_end + 1).min(b.len());
                &attrs[value_start..value_end]
            } else {
                let value_start = i;
                while i < b.len() && !b[i].is_ascii_whitespace() {
                    i += 1;
                }
                &attrs[value_start..i]
            }
        } else {
            ""
        };

        if !key.is_empty() && key.eq_ignore_ascii_case(name) {
            return Some(value);
        }
        if i == key_start {
            i += 1;
        }
    }
}

/// Decodes the named entities that show up in headlines plus numeric references.
/// Unknown entities are left untouched.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi > 0 && semi <= 10)
            .and_then(|semi| entity(&tail[..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        _ => return None,
    })
}
