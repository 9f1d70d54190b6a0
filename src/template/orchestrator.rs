//! Placeholder orchestrator: apply replacements to every candidate part of an extracted package

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::package::well_known;
use crate::template::{
    locate, normalize_preserved_empty, rewrite_inline, rewrite_lines, Replacement,
};
use crate::xml::{NodePath, RawXmlElement, XmlDocument, W_P};

/// Apply one placeholder to every paragraph of a parsed part.
///
/// Every occurrence is replaced; the search resumes after the inserted
/// content, so a replacement containing its own placeholder is not revisited.
/// Returns the number of occurrences replaced.
pub fn replace_in_document(
    doc: &mut XmlDocument,
    placeholder: &str,
    value: &Replacement,
) -> Result<usize> {
    if placeholder.is_empty() {
        return Err(Error::UnsupportedReplacement(
            "placeholder must not be empty".into(),
        ));
    }
    value.validate()?;

    let paragraphs = doc.root.collect_paths(|e| e.is(W_P), |_| false);

    // Back to front: paragraphs added after one never shift the ones before it
    let mut count = 0;
    for para_path in paragraphs.iter().rev() {
        count += replace_in_paragraph(&mut doc.root, para_path, placeholder, value);
    }
    Ok(count)
}

fn replace_in_paragraph(
    root: &mut RawXmlElement,
    para_path: &NodePath,
    placeholder: &str,
    value: &Replacement,
) -> usize {
    let mut from = 0;
    let mut inserted = 0;
    let mut count = 0;

    loop {
        let Some(paragraph) = root.element_at(para_path) else {
            break;
        };
        let Some(m) = locate(paragraph, placeholder, from) else {
            break;
        };

        let advanced = match value {
            Replacement::Text(text) => root
                .element_at_mut(para_path)
                .and_then(|p| rewrite_inline(p, &m, &Replacement::split_text(text))),
            Replacement::Lines(lines) => {
                rewrite_lines(root, para_path, &m, lines, inserted).map(|(len, added)| {
                    inserted += added;
                    len
                })
            }
        };

        match advanced {
            Some(len) => {
                log::debug!(
                    "Replaced '{}' at {}..{} in paragraph {}",
                    placeholder,
                    m.start,
                    m.end,
                    para_path
                );
                from = m.start + len;
                count += 1;
            }
            None => {
                log::debug!(
                    "Skipping unresolvable match of '{}' in paragraph {}",
                    placeholder,
                    para_path
                );
                break;
            }
        }
    }

    count
}

/// Apply placeholders to XML text, returning the rewritten XML.
///
/// Placeholders are applied in lexical order whatever order they are given
/// in, so list replacements sharing a paragraph always insert their
/// paragraphs the same way.
pub fn replace_in_xml<'a, I, K>(xml: &str, replacements: I) -> Result<String>
where
    I: IntoIterator<Item = (K, &'a Replacement)>,
    K: AsRef<str>,
{
    let mut replacements: Vec<(K, &Replacement)> = replacements.into_iter().collect();
    replacements.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));

    let mut doc = XmlDocument::parse(xml)?;
    for (placeholder, value) in replacements {
        let placeholder = placeholder.as_ref();
        let count = replace_in_document(&mut doc, placeholder, value)
            .map_err(|e| e.for_placeholder(placeholder))?;
        log::debug!("'{}': {} occurrence(s)", placeholder, count);
    }

    let normalized = normalize_preserved_empty(&mut doc.root);
    if normalized > 0 {
        log::debug!("Normalized {} empty preserved text node(s)", normalized);
    }

    doc.to_xml_string()
}

/// Rewrite one part file in place: parse once, apply every placeholder, write once
pub fn replace_in_part<'a, P, I, K>(path: P, replacements: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (K, &'a Replacement)>,
    K: AsRef<str>,
{
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    let out = replace_in_xml(&xml, replacements)?;
    fs::write(path, out)?;
    Ok(())
}

/// Apply placeholders to every candidate part present under `dir`.
/// Missing parts are skipped.
pub fn replace_in_parts<'a, I, K>(dir: &Path, replacements: I) -> Result<()>
where
    I: IntoIterator<Item = (K, &'a Replacement)>,
    K: AsRef<str>,
{
    let replacements: Vec<(K, &Replacement)> = replacements.into_iter().collect();

    for part in well_known::candidate_parts() {
        let path = part.to_fs_path(dir);
        if !path.is_file() {
            log::debug!("Part {} not present, skipping", part);
            continue;
        }

        log::debug!("Processing part {}", part);
        replace_in_part(&path, replacements.iter().map(|(k, v)| (k.as_ref(), *v)))
            .map_err(|e| e.in_part(part.as_str()))?;
    }
    Ok(())
}

/// Apply a single placeholder to every candidate part under `dir`
pub fn replace_in_all_parts<P: AsRef<Path>>(
    dir: P,
    placeholder: &str,
    value: &Replacement,
) -> Result<()> {
    replace_in_parts(dir.as_ref(), [(placeholder, value)])
}

/// Apply every placeholder of the map to every candidate part under `dir`
pub fn replace_multiple<P: AsRef<Path>>(
    dir: P,
    replacements: &HashMap<String, Replacement>,
) -> Result<()> {
    replace_in_parts(dir.as_ref(), replacements)
}
