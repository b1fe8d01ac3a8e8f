//! Locating interpolation holes in literal text.
//!
//! Trees usually know where their holes are, so the tree-sitter adapter reads
//! them off `template_substitution` nodes. This scanner covers hosts that
//! arrive as plain text.

use crate::text::TextRange;

/// How interpolation holes are opened inside a host's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleSyntax {
    /// `${expr}`, as in template literals
    DollarBrace,
    /// `{expr}`, as in templated markup attributes
    Brace,
    /// The content cannot be interpolated
    None,
}

/// Find every interpolation hole in `text`.
///
/// Ranges cover the whole hole including its delimiters. Braces nest, and
/// quoted strings inside a hole are skipped so `${"}"}` is one hole. A
/// backslash escapes the next byte. A hole that is never closed runs to the
/// end of the text.
pub fn scan_interpolations(text: &str, syntax: HoleSyntax) -> Vec<TextRange> {
    let opener_len = match syntax {
        HoleSyntax::DollarBrace => 2,
        HoleSyntax::Brace => 1,
        HoleSyntax::None => return Vec::new(),
    };
    let bytes = text.as_bytes();
    let mut holes = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        let opens = match syntax {
            HoleSyntax::DollarBrace => bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'{'),
            _ => bytes[i] == b'{',
        };
        if !opens {
            i += 1;
            continue;
        }
        let end = find_hole_end(bytes, i + opener_len);
        holes.push(TextRange::new(i, end));
        i = end;
    }

    holes
}

/// Return the offset just past the `}` closing a hole whose body starts at
/// `start`, or `bytes.len()` if it never closes.
fn find_hole_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 1usize;
    let mut j = start;

    while j < bytes.len() {
        match bytes[j] {
            b'\\' => {
                j += 2;
                continue;
            }
            quote @ (b'"' | b'\'' | b'`') => {
                j = skip_quoted(bytes, j + 1, quote);
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return j + 1;
                }
            }
            _ => {}
        }
        j += 1;
    }

    bytes.len()
}

fn skip_quoted(bytes: &[u8], mut j: usize, quote: u8) -> usize {
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b if b == quote => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}
