//! Replacement values

use crate::error::{Error, Result};

/// Content substituted for a placeholder
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Replacement {
    /// Inline text. Each `\n` becomes a line break (`<w:br/>`) inside the run.
    Text(String),
    /// Ordered lines. The first replaces the placeholder in place, each
    /// following line becomes a new paragraph after the original one.
    Lines(Vec<String>),
}

impl Replacement {
    /// Reject values that cannot be substituted
    pub fn validate(&self) -> Result<()> {
        match self {
            Replacement::Text(_) => Ok(()),
            Replacement::Lines(lines) if lines.is_empty() => Err(
                Error::UnsupportedReplacement("line list must contain at least one line".into()),
            ),
            Replacement::Lines(_) => Ok(()),
        }
    }

    /// Lines of an inline text value (`\r\n` and `\n` both split)
    pub(crate) fn split_text(text: &str) -> Vec<&str> {
        text.split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect()
    }
}

impl From<&str> for Replacement {
    fn from(s: &str) -> Self {
        Replacement::Text(s.to_string())
    }
}

impl From<String> for Replacement {
    fn from(s: String) -> Self {
        Replacement::Text(s)
    }
}

impl From<Vec<String>> for Replacement {
    fn from(lines: Vec<String>) -> Self {
        Replacement::Lines(lines)
    }
}

impl From<Vec<&str>> for Replacement {
    fn from(lines: Vec<&str>) -> Self {
        Replacement::Lines(lines.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Replacement {
    fn from(lines: [&str; N]) -> Self {
        Replacement::Lines(lines.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Replacement::from("a"), Replacement::Text("a".into()));
        assert_eq!(
            Replacement::from(["a", "b"]),
            Replacement::Lines(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            Replacement::from(vec!["x"]),
            Replacement::Lines(vec!["x".into()])
        );
    }

    #[test]
    fn test_empty_line_list_rejected() {
        let err = Replacement::Lines(Vec::new()).validate().unwrap_err();
        assert!(matches!(err, Error::UnsupportedReplacement(_)));
        assert!(Replacement::Text(String::new()).validate().is_ok());
    }

    #[test]
    fn test_split_text() {
        assert_eq!(Replacement::split_text("a\r\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(Replacement::split_text("one"), vec!["one"]);
        assert_eq!(Replacement::split_text("a\n"), vec!["a", ""]);
    }
}
