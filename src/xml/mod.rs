//! XML tree model: parse a part into a mutable element tree and write it back

mod document;
mod namespace;
mod path;
mod raw;

pub use document::{Declaration, XmlDocument};
pub use namespace::*;
pub use path::NodePath;
pub use raw::{RawXmlElement, RawXmlNode};

/// Build a `<w:t>` element, marking it `xml:space="preserve"` when asked or
/// when the text carries significant edge whitespace
pub fn text_element(text: &str, preserve: bool) -> RawXmlElement {
    let mut t = RawXmlElement::new(W_T);
    if preserve || needs_preserve(text) {
        t.set_preserve_space();
    }
    t.set_text(text);
    t
}

/// Whether the text would lose whitespace without `xml:space="preserve"`
pub fn needs_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.contains("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element_marks_edge_whitespace() {
        assert!(text_element(" a", false).preserves_space());
        assert!(text_element("a ", false).preserves_space());
        assert!(!text_element("a b", false).preserves_space());
        assert!(text_element("a", true).preserves_space());
    }

    #[test]
    fn test_collect_paths_prunes_subtrees() {
        let tree = RawXmlElement::new("root")
            .with_child(RawXmlElement::new(W_T).with_text("a"))
            .with_child(
                RawXmlElement::new(W_P).with_child(RawXmlElement::new(W_T).with_text("nested")),
            )
            .with_child(RawXmlElement::new(W_R).with_child(RawXmlElement::new(W_T).with_text("b")));

        let all = tree.collect_paths(|e| e.is(W_T), |_| false);
        assert_eq!(all.len(), 3);

        let pruned = tree.collect_paths(|e| e.is(W_T), |e| e.is(W_P));
        assert_eq!(
            pruned,
            vec![NodePath::from_indices(vec![0]), NodePath::from_indices(vec![2, 0])]
        );
    }

    #[test]
    fn test_insert_and_remove_children() {
        let mut run = RawXmlElement::new(W_R).with_child(RawXmlElement::new(W_T).with_text("x"));
        let next = run.insert_children(
            1,
            vec![
                RawXmlElement::empty(W_BR).into(),
                RawXmlElement::new(W_T).with_text("y").into(),
            ],
        );
        assert_eq!(next, 3);
        assert_eq!(run.children.len(), 3);

        let removed = run.remove_child(0).unwrap();
        assert_eq!(removed.as_element().unwrap().text(), "x");
        assert!(run.remove_child(10).is_none());
    }
}
