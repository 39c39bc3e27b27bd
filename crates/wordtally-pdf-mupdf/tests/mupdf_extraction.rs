//! Extraction tests against small PDFs written on the fly.
//!
//! `write_pdf` emits an uncompressed PDF 1.4 file with one Helvetica text
//! line per entry, so the expected text is known exactly.

use std::path::Path;

use wordtally_core::{
    DocumentReadError, PdfBackend, TallyError, WordCounter, aggregate_directory,
};
use wordtally_pdf_mupdf::MupdfBackend;

fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Write a PDF with one page per entry of `pages`, each page holding the
/// given text lines top to bottom. An empty page gets an empty content stream.
fn write_pdf(path: &Path, pages: &[&[&str]]) {
    let page_count = pages.len();
    // 1: catalog, 2: page tree, 3: font, then (page, contents) pairs
    let page_id = |i: usize| 4 + 2 * i;
    let contents_id = |i: usize| 5 + 2 * i;

    let mut objects: Vec<String> = Vec::new();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", page_id(i))).collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        page_count
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, lines) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            contents_id(i)
        ));
        let mut content = String::new();
        for (n, line) in lines.iter().enumerate() {
            let y = 720 - 24 * n;
            content.push_str(&format!(
                "BT /F1 12 Tf 72 {} Td ({}) Tj ET\n",
                y,
                escape_pdf_string(line)
            ));
        }
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }
    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    std::fs::write(path, out).unwrap();
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

#[test]
fn extracts_pages_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("family.pdf");
    write_pdf(
        &path,
        &[&["The boy visited his father"], &["Her mother and sister stayed"]],
    );

    let text = MupdfBackend::new().extract_text(&path).unwrap();
    let boy = text.find("boy").expect("page 1 text present");
    let mother = text.find("mother").expect("page 2 text present");
    assert!(boy < mother);
}

#[test]
fn lines_do_not_fuse_across_page_break() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("split.pdf");
    write_pdf(&path, &[&["the last word is he"], &["she starts this page"]]);

    let text = MupdfBackend::new().extract_text(&path).unwrap();
    let counts = WordCounter::new(&["he", "she"]).unwrap().count(&text);
    assert_eq!(counts.get("he"), Some(1));
    assert_eq!(counts.get("she"), Some(1));
}

#[test]
fn blank_page_contributes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.pdf");
    write_pdf(&path, &[&["uncle"], &[], &["aunt"]]);

    let text = MupdfBackend::new().extract_text(&path).unwrap();
    let counts = WordCounter::new(&["uncle", "aunt"]).unwrap().count(&text);
    assert_eq!(counts.get("uncle"), Some(1));
    assert_eq!(counts.get("aunt"), Some(1));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MupdfBackend::new()
        .extract_text(&dir.path().join("nope.pdf"))
        .unwrap_err();
    assert!(matches!(err, DocumentReadError::Io(_)));
}

#[test]
fn garbage_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, b"this is not a pdf at all").unwrap();
    assert!(MupdfBackend::new().extract_text(&path).is_err());
}

#[test]
fn directory_scan_with_real_pdfs() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(&dir.path().join("a.pdf"), &[&["Mr. Smith and his wife"]]);
    write_pdf(&dir.path().join("b.pdf"), &[&["the wife of the man"]]);
    std::fs::write(dir.path().join("notes.txt"), "wife wife wife").unwrap();

    let totals = aggregate_directory(
        dir.path(),
        &words(&["mr", "wife", "man", "he"]),
        &MupdfBackend::new(),
    )
    .unwrap();
    assert_eq!(totals.get("mr"), Some(1));
    assert_eq!(totals.get("wife"), Some(2));
    assert_eq!(totals.get("man"), Some(1));
    assert_eq!(totals.get("he"), Some(0));
}

#[test]
fn directory_scan_aborts_on_corrupt_pdf() {
    let dir = tempfile::tempdir().unwrap();
    write_pdf(&dir.path().join("good.pdf"), &[&["brother"]]);
    std::fs::write(dir.path().join("corrupt.pdf"), b"%PDF-1.4 truncated").unwrap();

    let result = aggregate_directory(dir.path(), &words(&["brother"]), &MupdfBackend::new());
    assert!(matches!(result, Err(TallyError::DocumentRead { .. })));
}

#[cfg(unix)]
#[test]
fn non_utf8_path_is_rejected_explicitly() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(OsStr::from_bytes(b"r\xe9sum\xe9.pdf"));
    write_pdf(&path, &[&["his wife"]]);

    let err = MupdfBackend::new().extract_text(&path).unwrap_err();
    assert!(matches!(err, DocumentReadError::OpenError(_)));
}
