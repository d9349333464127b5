//! Greedy splitting of over-width stored lines.

use crate::escape::ESC;
use tracing::trace;

/// Appended to every fragment except the last of a wrapped line.
///
/// A lone ESC never occurs in escaped content, so the marker cannot be
/// confused with text.
pub const WRAP_MARKER: char = ESC;
pub const DEFAULT_WRAP_WIDTH: usize = 90;
/// Smallest width that still guarantees progress: one content char + marker,
/// with room to back off from a doubled ESC.
pub const MIN_WRAP_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWrapper {
    width: usize,
}

impl Default for LineWrapper {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_WIDTH)
    }
}

impl LineWrapper {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(MIN_WRAP_WIDTH),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Split an ESC-escaped line into stored fragments.
    ///
    /// Widths are counted in chars and exclude the dot escape added later.
    /// A cut never separates the two halves of a doubled ESC.
    pub fn wrap(&self, escaped: &str) -> Vec<String> {
        let mut fragments = Vec::new();
        let mut rest = escaped;
        while rest.chars().count() > self.width {
            let cut = cut_point(rest, self.width - 1);
            let byte = rest
                .char_indices()
                .nth(cut)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            let (head, tail) = rest.split_at(byte);
            let mut fragment = String::with_capacity(head.len() + WRAP_MARKER.len_utf8());
            fragment.push_str(head);
            fragment.push(WRAP_MARKER);
            fragments.push(fragment);
            rest = tail;
        }
        fragments.push(rest.to_string());
        if fragments.len() > 1 {
            trace!(target: "codec.wrap", width = self.width, fragments = fragments.len(), "line_wrapped");
        }
        fragments
    }
}

/// Largest char count `<= limit` that does not fall inside an ESC pair.
fn cut_point(s: &str, limit: usize) -> usize {
    let mut chars = s.chars();
    let mut taken = 0;
    while taken < limit {
        match chars.next() {
            Some(ESC) => {
                chars.next();
                taken += 2;
            }
            Some(_) => taken += 1,
            None => break,
        }
    }
    if taken > limit { limit - 1 } else { taken }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::{escape_esc, unescape_esc};

    fn unwrap_fragments(fragments: &[String]) -> String {
        let mut out = String::new();
        for (i, f) in fragments.iter().enumerate() {
            let u = unescape_esc(f);
            assert_eq!(u.continued, i + 1 < fragments.len(), "fragment {i}");
            out.push_str(&u.text);
        }
        out
    }

    #[test]
    fn short_line_is_untouched() {
        let w = LineWrapper::default();
        assert_eq!(w.wrap("hello"), vec!["hello".to_string()]);
        let exact = "y".repeat(90);
        assert_eq!(w.wrap(&exact), vec![exact.clone()]);
    }

    #[test]
    fn long_line_splits_at_width_minus_marker() {
        let w = LineWrapper::default();
        let line = "x".repeat(150);
        let frags = w.wrap(&line);
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].chars().count(), 90);
        assert!(frags[0].ends_with(WRAP_MARKER));
        assert_eq!(frags[1], "x".repeat(61));
        assert_eq!(unwrap_fragments(&frags), line);
    }

    #[test]
    fn very_long_line_splits_repeatedly() {
        let w = LineWrapper::new(10);
        let line: String = ('a'..='z').cycle().take(47).collect();
        let frags = w.wrap(&line);
        assert_eq!(frags.len(), 6);
        assert!(frags.iter().all(|f| f.chars().count() <= 10));
        assert_eq!(unwrap_fragments(&frags), line);
    }

    #[test]
    fn cut_backs_off_from_esc_pair() {
        let w = LineWrapper::new(5);
        // Escaped content: a b c ESC ESC d e; naive cut at 4 would split the pair.
        let escaped = escape_esc("abc\u{1b}de").into_owned();
        let frags = w.wrap(&escaped);
        assert_eq!(frags[0], "abc\u{1b}");
        assert_eq!(unwrap_fragments(&frags), "abc\u{1b}de");
    }

    #[test]
    fn multibyte_chars_split_on_char_boundaries() {
        let w = LineWrapper::new(4);
        let line = "åäöüß€";
        let frags = w.wrap(line);
        assert!(frags.iter().all(|f| f.chars().count() <= 4));
        assert_eq!(unwrap_fragments(&frags), line);
    }

    #[test]
    fn width_is_clamped_to_minimum() {
        assert_eq!(LineWrapper::new(0).width(), MIN_WRAP_WIDTH);
    }
}
