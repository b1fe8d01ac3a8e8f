/// Compute line start offsets for a text
pub fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut line_starts = vec![0];
    let mut offset = 0;

    for ch in text.chars() {
        offset += ch.len_utf8();
        if ch == '\n' {
            line_starts.push(offset);
        }
    }

    line_starts
}

/// Maps byte offsets of a source file to 1-based line/column pairs for
/// human-readable output.
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            line_starts: compute_line_starts(text),
        }
    }

    /// Convert a byte offset to `(line, column)`, both 1-based.
    ///
    /// Columns count characters, not bytes. Offsets past the end clamp to
    /// the end of the text.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i.saturating_sub(1));
        let line_start = self.line_starts[line];
        let column = self
            .text
            .get(line_start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(offset - line_start);
        (line + 1, column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_line_starts() {
        assert_eq!(compute_line_starts("a\nbc\n"), vec![0, 2, 5]);
        assert_eq!(compute_line_starts(""), vec![0]);
    }

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("const a = 1;\nconst b = css`x`;\n");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(13), (2, 1));
        assert_eq!(index.line_col(23), (2, 11));
    }

    #[test]
    fn test_line_col_counts_characters() {
        let index = LineIndex::new("é = `x`");
        // 'é' is two bytes but one column
        assert_eq!(index.line_col(2), (1, 2));
    }

    #[test]
    fn test_line_col_clamps_past_end() {
        let index = LineIndex::new("ab");
        assert_eq!(index.line_col(10), (1, 3));
    }
}
