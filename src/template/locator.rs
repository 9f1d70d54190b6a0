//! Span locator: find a placeholder in a paragraph's text and map it back onto `<w:t>` nodes

use std::ops::Range;

use crate::xml::{NodePath, RawXmlElement, W_P, W_T};

/// One `<w:t>` node overlapped by a match
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    /// Path of the `<w:t>` element relative to the paragraph
    pub path: NodePath,
    /// Byte range of the node's own text covered by the match
    pub range: Range<usize>,
}

/// A located placeholder occurrence.
///
/// Offsets refer to the paragraph text at the time of the call and are
/// invalid after any mutation of the paragraph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpanMatch {
    /// Byte offset of the match in the paragraph text
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
    /// Touched nodes in document order; the first holds `start`, the last holds `end`
    pub spans: Vec<TextSpan>,
    /// Character right before the match, if any
    pub before: Option<char>,
    /// Character right after the match, if any
    pub after: Option<char>,
}

impl SpanMatch {
    /// Whether the whole match sits inside one text node
    pub fn is_single_node(&self) -> bool {
        self.spans.len() == 1
    }

    pub fn first(&self) -> &TextSpan {
        &self.spans[0]
    }

    pub fn last(&self) -> &TextSpan {
        &self.spans[self.spans.len() - 1]
    }
}

/// `<w:t>` nodes of a paragraph in document order, with their text.
/// Nested paragraphs (text boxes) are left to be searched on their own.
pub fn text_nodes(paragraph: &RawXmlElement) -> Vec<(NodePath, String)> {
    paragraph
        .collect_paths(|e| e.is(W_T), |e| e.is(W_P))
        .into_iter()
        .filter_map(|path| {
            let text = paragraph.element_at(&path)?.text();
            Some((path, text))
        })
        .collect()
}

/// Concatenated text of all `<w:t>` nodes of the paragraph
pub fn paragraph_text(paragraph: &RawXmlElement) -> String {
    text_nodes(paragraph)
        .into_iter()
        .map(|(_, text)| text)
        .collect()
}

/// Find the first occurrence of `placeholder` at or after byte offset `from`
/// of the paragraph text
pub fn locate(paragraph: &RawXmlElement, placeholder: &str, from: usize) -> Option<SpanMatch> {
    if placeholder.is_empty() {
        return None;
    }

    let nodes = text_nodes(paragraph);
    let full: String = nodes.iter().map(|(_, text)| text.as_str()).collect();

    let start = from + full.get(from..)?.find(placeholder)?;
    let end = start + placeholder.len();

    let mut first = None;
    let mut last = None;
    let mut pos = 0;
    for (i, (_, text)) in nodes.iter().enumerate() {
        let len = text.len();
        if first.is_none() && pos <= start && start < pos + len {
            first = Some((i, start - pos));
        }
        if last.is_none() && pos < end && end <= pos + len {
            last = Some((i, end - pos));
        }
        pos += len;
    }

    let (first_idx, start_offset) = first?;
    let (last_idx, end_offset) = last?;

    let spans = (first_idx..=last_idx)
        .map(|i| {
            let (path, text) = &nodes[i];
            let lo = if i == first_idx { start_offset } else { 0 };
            let hi = if i == last_idx { end_offset } else { text.len() };
            TextSpan {
                path: path.clone(),
                range: lo..hi,
            }
        })
        .collect();

    Some(SpanMatch {
        start,
        end,
        spans,
        before: full[..start].chars().next_back(),
        after: full[end..].chars().next(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{RawXmlElement, W_R};

    fn run(text: &str) -> RawXmlElement {
        RawXmlElement::new(W_R).with_child(RawXmlElement::new(W_T).with_text(text))
    }

    fn para(runs: &[&str]) -> RawXmlElement {
        runs.iter()
            .fold(RawXmlElement::new(W_P), |p, t| p.with_child(run(t)))
    }

    #[test]
    fn test_single_node_match() {
        let p = para(&["Hello {name}!"]);
        let m = locate(&p, "{name}", 0).unwrap();

        assert_eq!((m.start, m.end), (6, 12));
        assert!(m.is_single_node());
        assert_eq!(m.first().path, NodePath::from_indices(vec![0, 0]));
        assert_eq!(m.first().range, 6..12);
        assert_eq!(m.before, Some(' '));
        assert_eq!(m.after, Some('!'));
    }

    #[test]
    fn test_split_match_spans_nodes() {
        let p = para(&["Hello ", "{na", "me}", "!"]);
        let m = locate(&p, "{name}", 0).unwrap();

        assert_eq!(m.spans.len(), 2);
        assert_eq!(m.first().path, NodePath::from_indices(vec![1, 0]));
        assert_eq!(m.first().range, 0..3);
        assert_eq!(m.last().path, NodePath::from_indices(vec![2, 0]));
        assert_eq!(m.last().range, 0..3);
    }

    #[test]
    fn test_match_crossing_middle_nodes() {
        let p = para(&["a{", "x", "", "y", "}b"]);
        let m = locate(&p, "{xy}", 0).unwrap();

        let paths: Vec<usize> = m.spans.iter().map(|s| s.path.indices()[0]).collect();
        assert_eq!(paths, vec![0, 1, 2, 3, 4]);
        assert_eq!(m.first().range, 1..2);
        assert_eq!(m.last().range, 0..1);
    }

    #[test]
    fn test_end_on_node_boundary_belongs_to_that_node() {
        let p = para(&["{a}", "tail"]);
        let m = locate(&p, "{a}", 0).unwrap();
        assert!(m.is_single_node());
        assert_eq!(m.first().range, 0..3);
        assert_eq!(m.after, Some('t'));
    }

    #[test]
    fn test_not_found_leaves_paragraph_untouched() {
        let p = para(&["nothing here"]);
        let before = p.clone();
        assert!(locate(&p, "{name}", 0).is_none());
        assert_eq!(p, before);
    }

    #[test]
    fn test_search_from_offset_finds_next_occurrence() {
        let p = para(&["{x} and {x}"]);
        let first = locate(&p, "{x}", 0).unwrap();
        let second = locate(&p, "{x}", first.end).unwrap();
        assert_eq!(second.start, 8);
        assert!(locate(&p, "{x}", second.end).is_none());
    }

    #[test]
    fn test_offset_out_of_range_is_not_found() {
        let p = para(&["{x}"]);
        assert!(locate(&p, "{x}", 99).is_none());
    }

    #[test]
    fn test_empty_placeholder_never_matches() {
        assert!(locate(&para(&["text"]), "", 0).is_none());
    }

    #[test]
    fn test_multibyte_text() {
        let p = para(&["Дата: {da", "te}"]);
        let m = locate(&p, "{date}", 0).unwrap();
        assert_eq!(m.first().range, "Дата: ".len().."Дата: {da".len());
        assert_eq!(m.before, Some(' '));
        assert_eq!(m.after, None);
    }

    #[test]
    fn test_nested_paragraph_text_excluded() {
        let nested = RawXmlElement::new(W_P).with_child(run("{inner}"));
        let p = para(&["outer "]).with_child(RawXmlElement::new(W_R).with_child(nested));
        assert_eq!(paragraph_text(&p), "outer ");
        assert!(locate(&p, "{inner}", 0).is_none());
    }
}
