//! Text extraction from uploaded `.txt` and `.pdf` files.

use std::path::Path;

use crate::error::{GeneratorError, Result};

/// File types we can read text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Pdf,
}

impl SourceKind {
    /// Detect the kind from a file name's extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("txt") => Ok(Self::Text),
            Some("pdf") => Ok(Self::Pdf),
            _ => Err(GeneratorError::UnsupportedFile(file_name.to_string())),
        }
    }
}

/// Extract plain text from an uploaded file's bytes.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String> {
    match SourceKind::from_file_name(file_name)? {
        SourceKind::Text => String::from_utf8(bytes.to_vec()).map_err(|_| {
            GeneratorError::InvalidUtf8 {
                file_name: file_name.to_string(),
            }
        }),
        SourceKind::Pdf => extract_pdf_text(file_name, bytes),
    }
}

/// Read a file from disk and extract its text.
pub fn extract_file(path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    // Check the extension before reading a possibly large file.
    SourceKind::from_file_name(&file_name)?;
    let bytes = std::fs::read(path)?;
    extract_text(&file_name, &bytes)
}

/// Pick the text to generate from: pasted text wins when it is not blank.
///
/// # Examples
/// ```
/// use flashcards_generator::extract::choose_input;
///
/// assert_eq!(choose_input("notes", Some("file")), Some("notes".to_string()));
/// assert_eq!(choose_input("  ", Some("file")), Some("file".to_string()));
/// assert_eq!(choose_input("", None), None);
/// ```
pub fn choose_input(pasted: &str, file_text: Option<&str>) -> Option<String> {
    if !pasted.trim().is_empty() {
        return Some(pasted.to_string());
    }
    file_text
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
}

fn extract_pdf_text(file_name: &str, bytes: &[u8]) -> Result<String> {
    // pdf_extract can panic on malformed PDFs
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match result {
        Ok(Ok(text)) => {
            tracing::debug!(file_name, chars = text.len(), "PDF text extracted");
            Ok(text)
        }
        Ok(Err(e)) => Err(GeneratorError::PdfExtract {
            file_name: file_name.to_string(),
            message: e.to_string(),
        }),
        Err(_) => Err(GeneratorError::PdfExtract {
            file_name: file_name.to_string(),
            message: "PDF extraction panicked (malformed PDF)".to_string(),
        }),
    }
}

/// Test utilities for text extraction.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    /// Build a one-page PDF showing `text` in Helvetica.
    ///
    /// Object offsets in the xref table are computed, so the file is valid
    /// for strict readers.
    pub fn minimal_pdf(text: &str) -> Vec<u8> {
        let escaped = text
            .replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)");
        let content = format!("BT /F1 18 Tf 72 720 Td ({escaped}) Tj ET");

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica \
             /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", index + 1).as_bytes());
        }

        let xref_start = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        pdf.extend_from_slice(xref.as_bytes());
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::minimal_pdf;
    use super::*;
    use std::io::Write;

    #[test]
    fn test_source_kind_detection() {
        assert_eq!(SourceKind::from_file_name("notes.txt").ok(), Some(SourceKind::Text));
        assert_eq!(SourceKind::from_file_name("Lecture.PDF").ok(), Some(SourceKind::Pdf));
        assert!(matches!(
            SourceKind::from_file_name("slides.pptx"),
            Err(GeneratorError::UnsupportedFile(_))
        ));
        assert!(SourceKind::from_file_name("README").is_err());
    }

    #[test]
    fn test_extract_plain_text() {
        let text = extract_text("notes.txt", "Photosynthesis → glucose".as_bytes())
            .expect("utf-8 text");
        assert_eq!(text, "Photosynthesis → glucose");
    }

    #[test]
    fn test_extract_invalid_utf8() {
        let err = extract_text("notes.txt", &[0xff, 0xfe, 0x00]).expect_err("invalid utf-8");
        assert!(matches!(err, GeneratorError::InvalidUtf8 { .. }));
    }

    #[test]
    fn test_extract_garbage_pdf_is_an_error() {
        let err = extract_text("broken.pdf", b"definitely not a pdf").expect_err("bad pdf");
        assert!(matches!(err, GeneratorError::PdfExtract { .. }));
    }

    #[test]
    fn test_extract_pdf_text() {
        let bytes = minimal_pdf("Mitochondria produce ATP");
        let text = extract_text("biology.pdf", &bytes).expect("pdf text");
        assert!(text.contains("Mitochondria"), "got {text:?}");
        assert!(text.contains("ATP"), "got {text:?}");
    }

    #[test]
    fn test_extract_pdf_file_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Lecture.PDF");
        std::fs::write(&path, minimal_pdf("Ohm's law (V = IR)")).expect("write");

        let text = extract_file(&path).expect("extract");
        assert!(text.contains("Ohm"), "got {text:?}");
    }

    #[test]
    fn test_extract_file_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chapter1.txt");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(file, "The French Revolution began in 1789.").expect("write");

        let text = extract_file(&path).expect("extract");
        assert_eq!(text, "The French Revolution began in 1789.\n");
    }

    #[test]
    fn test_choose_input_prefers_pasted_text() {
        assert_eq!(
            choose_input("pasted", Some("from file")),
            Some("pasted".to_string())
        );
        assert_eq!(
            choose_input("\n\t ", Some("from file")),
            Some("from file".to_string())
        );
        assert_eq!(choose_input("", Some("   ")), None);
    }
}
