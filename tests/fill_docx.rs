//! Integration test: fill placeholders in complete DOCX packages

use docx_template::template::paragraph_text;
use docx_template::xml::{XmlDocument, W, W_P};
use docx_template::{generate_docx, process_docx, Error, Replacement};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

fn part(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
        W, body
    )
}

fn header(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:hdr xmlns:w="{}">{}</w:hdr>"#,
        W, body
    )
}

fn write_package(path: &Path, entries: &[(&str, &str)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn read_entry(path: &Path, name: &str) -> Option<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).ok()?;
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    Some(content)
}

fn entry_names(path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

fn paragraphs(xml: &str) -> Vec<String> {
    let doc = XmlDocument::parse(xml).unwrap();
    doc.root
        .collect_paths(|e| e.is(W_P), |_| false)
        .iter()
        .map(|p| paragraph_text(doc.root.element_at(p).unwrap()))
        .collect()
}

fn template(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("template.docx");
    write_package(
        &path,
        &[
            ("[Content_Types].xml", "<Types/>"),
            ("_rels/.rels", "<Relationships/>"),
            (
                "word/document.xml",
                &part(concat!(
                    r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Dear </w:t></w:r>"#,
                    r#"<w:r><w:t>{na</w:t></w:r><w:r><w:t>me}</w:t></w:r><w:r><w:t>,</w:t></w:r></w:p>"#,
                    r#"<w:p><w:r><w:t>{address}</w:t></w:r></w:p>"#,
                    r#"<w:p><w:pPr><w:pStyle w:val="List"/></w:pPr><w:r><w:t>{items}</w:t></w:r></w:p>"#
                )),
            ),
            (
                "word/header1.xml",
                &header(r#"<w:p><w:r><w:t>Ref {name}</w:t></w:r></w:p>"#),
            ),
            ("word/media/image1.png", "PNGDATA"),
        ],
    );
    path
}

fn values() -> HashMap<String, Replacement> {
    let mut values = HashMap::new();
    values.insert("{name}".to_string(), Replacement::from("Ann"));
    values.insert("{address}".to_string(), Replacement::from("1 Main St\nSpringfield"));
    values.insert("{items}".to_string(), Replacement::from(["Apples", "Pears"]));
    values
}

#[test]
fn test_process_docx_fills_body_and_header() {
    let tmp = tempfile::tempdir().unwrap();
    let src = template(tmp.path());
    let out = tmp.path().join("filled.docx");

    process_docx(&src, &out, &values()).unwrap();

    let document = read_entry(&out, "word/document.xml").unwrap();
    assert_eq!(
        paragraphs(&document),
        vec!["Dear Ann,", "1 Main StSpringfield", "Apples", "Pears"]
    );
    assert!(document.contains("<w:t>1 Main St</w:t><w:br/><w:t>Springfield</w:t>"));
    assert_eq!(document.matches(r#"<w:pStyle w:val="List"/>"#).count(), 2);

    let hdr = read_entry(&out, "word/header1.xml").unwrap();
    assert_eq!(paragraphs(&hdr), vec!["Ref Ann"]);

    // Untouched entries are carried over
    assert_eq!(read_entry(&out, "word/media/image1.png").unwrap(), "PNGDATA");
    assert_eq!(read_entry(&out, "_rels/.rels").unwrap(), "<Relationships/>");
}

#[test]
fn test_missing_optional_parts_leave_no_trace() {
    let tmp = tempfile::tempdir().unwrap();
    let src = template(tmp.path());
    let out = tmp.path().join("filled.docx");

    process_docx(&src, &out, &values()).unwrap();

    let names = entry_names(&out);
    assert!(!names.iter().any(|n| n.contains("footnotes")));
    assert!(!names.iter().any(|n| n.contains("endnotes")));
    assert!(!names.iter().any(|n| n.contains("footer")));
}

#[test]
fn test_empty_map_roundtrip() {
    let tmp = tempfile::tempdir().unwrap();
    let src = template(tmp.path());
    let out = tmp.path().join("same.docx");

    process_docx(&src, &out, &HashMap::new()).unwrap();

    let before = read_entry(&src, "word/document.xml").unwrap();
    let after = read_entry(&out, "word/document.xml").unwrap();
    assert_eq!(after, before);
    assert_eq!(paragraphs(&after), paragraphs(&before));
}

#[test]
fn test_generate_docx_unique_output() {
    let tmp = tempfile::tempdir().unwrap();
    let src = template(tmp.path());

    let out = generate_docx(&src, &values()).unwrap();
    assert!(out.is_absolute());
    let name = out.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("output_") && name.ends_with(".docx"));

    let document = read_entry(&out, "word/document.xml").unwrap();
    assert_eq!(paragraphs(&document)[0], "Dear Ann,");

    std::fs::remove_file(&out).unwrap();
}

#[test]
fn test_malformed_part_aborts_with_context() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("broken.docx");
    write_package(
        &src,
        &[("word/document.xml", &part("<w:p><w:r></w:p>"))],
    );
    let out = tmp.path().join("never.docx");

    let err = process_docx(&src, &out, &values()).unwrap_err();
    assert!(matches!(err, Error::Part { ref part, .. } if part == "word/document.xml"));
    assert!(!out.exists());
}

#[test]
fn test_missing_template_is_archive_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = process_docx(
        tmp.path().join("absent.docx"),
        tmp.path().join("out.docx"),
        &values(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Extract { .. }));
}
