//! Span rewriter: tree surgery that swaps a located match for replacement content
//!
//! Structural edits are applied from the last touched node back to the first,
//! so the paths of nodes not yet edited stay valid for the whole rewrite.

use crate::template::{Replacement, SpanMatch};
use crate::xml::{
    needs_preserve, text_element, NodePath, RawXmlElement, RawXmlNode, W_BR, W_P, W_PPR, W_R,
    W_RPR, W_T,
};

/// Piece of inline replacement content
#[derive(Clone, Debug, PartialEq)]
enum Fragment {
    Text(String),
    Break,
}

impl Fragment {
    fn into_node(self, preserve: bool) -> RawXmlNode {
        match self {
            Fragment::Text(text) => text_element(&text, preserve).into(),
            Fragment::Break => RawXmlElement::empty(W_BR).into(),
        }
    }
}

/// Lay out `lines` as text/break fragments, gluing `prefix` to the first line
/// and `suffix` to the last. Empty lines yield only their break.
fn fragments(prefix: &str, lines: &[&str], suffix: &str) -> Vec<Fragment> {
    let last = lines.len().saturating_sub(1);
    let mut out = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push(Fragment::Break);
        }
        let mut text = String::new();
        if i == 0 {
            text.push_str(prefix);
        }
        text.push_str(line);
        if i == last {
            text.push_str(suffix);
        }
        if !text.is_empty() {
            out.push(Fragment::Text(text));
        }
    }

    if lines.is_empty() && !(prefix.is_empty() && suffix.is_empty()) {
        out.push(Fragment::Text(format!("{}{}", prefix, suffix)));
    }

    out
}

/// Replace the matched text with `lines` joined by line breaks.
///
/// Returns the byte length the replacement occupies in the paragraph text,
/// or `None` when a touched node cannot be resolved (nothing is changed then).
pub fn rewrite_inline(
    paragraph: &mut RawXmlElement,
    m: &SpanMatch,
    lines: &[&str],
) -> Option<usize> {
    if m.spans.is_empty()
        || m
            .spans
            .iter()
            .any(|s| paragraph.element_at(&s.path).map_or(true, |e| !e.is(W_T)))
    {
        return None;
    }

    if m.is_single_node() {
        rewrite_single(paragraph, m, lines)?;
    } else {
        rewrite_multi(paragraph, m, lines)?;
    }

    Some(lines.iter().map(|l| l.len()).sum())
}

fn rewrite_single(paragraph: &mut RawXmlElement, m: &SpanMatch, lines: &[&str]) -> Option<()> {
    let span = m.first();
    let node = paragraph.element_at(&span.path)?;
    let text = node.text();
    let preserve = node.preserves_space();

    let prefix = text.get(..span.range.start)?;
    let suffix = text.get(span.range.end..)?;

    let mut nodes: Vec<RawXmlNode> = fragments(prefix, lines, suffix)
        .into_iter()
        .map(|f| f.into_node(preserve))
        .collect();
    if nodes.is_empty() && preserve {
        nodes.push(text_element("", true).into());
    }

    let parent_path = span.path.parent()?;
    let idx = span.path.index()?;
    let parent = paragraph.element_at_mut(&parent_path)?;
    parent.remove_child(idx);
    let emptied = nodes.is_empty();
    parent.insert_children(idx, nodes);

    if emptied {
        prune_empty_run(paragraph, &parent_path);
    }
    Some(())
}

fn rewrite_multi(paragraph: &mut RawXmlElement, m: &SpanMatch, lines: &[&str]) -> Option<()> {
    let first = m.first();
    let last = m.last();

    let start_preserve = paragraph.element_at(&first.path)?.preserves_space();
    let end_preserve = paragraph.element_at(&last.path)?.preserves_space();

    // End node keeps only its suffix
    let end_node = paragraph.element_at_mut(&last.path)?;
    let suffix = end_node.text().get(last.range.end..)?.to_string();
    set_text_keeping_space(end_node, &suffix);
    if suffix.is_empty() && !end_preserve {
        remove_text_node(paragraph, &last.path);
    }

    // Nodes strictly between go, unless their whitespace is marked significant
    for span in m.spans[1..m.spans.len() - 1].iter().rev() {
        if paragraph.element_at(&span.path)?.preserves_space() {
            continue;
        }
        remove_text_node(paragraph, &span.path);
    }

    // Start node keeps its prefix and takes the first line; the rest follows it
    let start_node = paragraph.element_at_mut(&first.path)?;
    let prefix = start_node.text().get(..first.range.start)?.to_string();
    let mut frags = fragments(&prefix, lines, "");

    let head = if matches!(frags.first(), Some(Fragment::Text(_))) {
        Some(frags.remove(0))
    } else {
        None
    };
    let head_text = match head {
        Some(Fragment::Text(text)) => text,
        _ => String::new(),
    };
    set_text_keeping_space(start_node, &head_text);

    let preserve = start_preserve || end_preserve;
    let rest: Vec<RawXmlNode> = frags.into_iter().map(|f| f.into_node(preserve)).collect();
    let rest_empty = rest.is_empty();

    let parent_path = first.path.parent()?;
    let idx = first.path.index()?;
    paragraph
        .element_at_mut(&parent_path)?
        .insert_children(idx + 1, rest);

    if head_text.is_empty() && !start_preserve {
        paragraph.element_at_mut(&parent_path)?.remove_child(idx);
        if rest_empty {
            prune_empty_run(paragraph, &parent_path);
        }
    }
    Some(())
}

/// Replace the match with an ordered list of lines: the first goes in place,
/// every following line becomes a new paragraph after the edited one.
///
/// `para_path` addresses the paragraph inside `container`; `already_inserted`
/// counts paragraphs previously added after it, so repeated matches keep
/// document order. Returns the in-place replacement length and the number of
/// paragraphs added.
pub fn rewrite_lines(
    container: &mut RawXmlElement,
    para_path: &NodePath,
    m: &SpanMatch,
    lines: &[String],
    already_inserted: usize,
) -> Option<(usize, usize)> {
    if lines.is_empty() {
        return None;
    }

    let mut lines = lines.to_vec();
    if m.before == Some(' ') {
        lines[0].insert(0, ' ');
    }
    if m.after == Some(' ') {
        if let Some(last) = lines.last_mut() {
            last.push(' ');
        }
    }

    let paragraph = container.element_at(para_path)?;
    let paragraph_props = paragraph.find_child(W_PPR).cloned();
    let run_props = m
        .first()
        .path
        .parent()
        .and_then(|run_path| paragraph.element_at(&run_path))
        .filter(|run| run.is(W_R))
        .and_then(|run| run.find_child(W_RPR))
        .cloned();

    let paragraph = container.element_at_mut(para_path)?;
    let in_place = rewrite_inline(paragraph, m, &Replacement::split_text(&lines[0]))?;

    let new_paragraphs: Vec<RawXmlNode> = lines[1..]
        .iter()
        .map(|line| build_paragraph(paragraph_props.as_ref(), run_props.as_ref(), line).into())
        .collect();
    let added = new_paragraphs.len();

    let parent_path = para_path.parent()?;
    let idx = para_path.index()?;
    container
        .element_at_mut(&parent_path)?
        .insert_children(idx + 1 + already_inserted, new_paragraphs);

    Some((in_place, added))
}

/// New `<w:p>` holding one run with deep copies of the given properties
fn build_paragraph(
    paragraph_props: Option<&RawXmlElement>,
    run_props: Option<&RawXmlElement>,
    line: &str,
) -> RawXmlElement {
    let mut run = RawXmlElement::new(W_R);
    if let Some(rpr) = run_props {
        run = run.with_child(rpr.clone());
    }
    let lines = Replacement::split_text(line);
    let content = fragments("", &lines, "").into_iter().map(|f| f.into_node(false));
    let end = run.children.len();
    run.insert_children(end, content);

    let mut paragraph = RawXmlElement::new(W_P);
    if let Some(ppr) = paragraph_props {
        paragraph = paragraph.with_child(ppr.clone());
    }
    paragraph.with_child(run)
}

/// Mark every empty `<w:t xml:space="preserve">` in the tree to hold a single space
pub fn normalize_preserved_empty(root: &mut RawXmlElement) -> usize {
    let mut count = 0;
    root.visit_mut(&mut |e| {
        if e.is(W_T) && e.preserves_space() && e.text().is_empty() {
            e.set_text(" ");
            count += 1;
        }
    });
    count
}

fn set_text_keeping_space(node: &mut RawXmlElement, text: &str) {
    node.set_text(text);
    if needs_preserve(text) {
        node.set_preserve_space();
    }
}

fn remove_text_node(paragraph: &mut RawXmlElement, path: &NodePath) {
    let (Some(parent_path), Some(idx)) = (path.parent(), path.index()) else {
        return;
    };
    if let Some(parent) = paragraph.element_at_mut(&parent_path) {
        parent.remove_child(idx);
        prune_empty_run(paragraph, &parent_path);
    }
}

/// Drop a run left with nothing but its properties
fn prune_empty_run(paragraph: &mut RawXmlElement, run_path: &NodePath) {
    let Some(run) = paragraph.element_at(run_path) else {
        return;
    };
    let empty = run.is(W_R)
        && run.children.iter().all(|c| match c {
            RawXmlNode::Element(e) => e.is(W_RPR),
            RawXmlNode::Text(t) => t.trim().is_empty(),
            RawXmlNode::Comment(_) => true,
            RawXmlNode::CData(_) | RawXmlNode::ProcessingInstruction(_) => false,
        });
    if !empty {
        return;
    }
    if let (Some(parent_path), Some(idx)) = (run_path.parent(), run_path.index()) {
        if let Some(parent) = paragraph.element_at_mut(&parent_path) {
            parent.remove_child(idx);
        }
    }
}
