#![allow(dead_code)]

use std::path::PathBuf;

use bytes::Bytes;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Where the attachment bytes live until the pipeline encodes them.
#[derive(Debug, Clone)]
pub enum AttachmentSource {
    /// Already buffered, e.g. a multipart upload.
    Memory(Bytes),
    /// Read from disk at encoding time.
    Path(PathBuf),
}

/// The single file an applicant attaches (their resume).
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub source: AttachmentSource,
}

impl Attachment {
    pub fn from_bytes(filename: impl Into<String>, content_type: Option<&str>, data: Bytes) -> Self {
        let filename = filename.into();
        let content_type = resolve_content_type(&filename, content_type);
        Attachment {
            filename,
            content_type,
            source: AttachmentSource::Memory(data),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        let content_type = resolve_content_type(&filename, None);
        Attachment {
            filename,
            content_type,
            source: AttachmentSource::Path(path),
        }
    }

    /// Size in bytes, when it can be known without reading the file.
    pub fn known_size(&self) -> Option<usize> {
        match &self.source {
            AttachmentSource::Memory(data) => Some(data.len()),
            AttachmentSource::Path(path) => std::fs::metadata(path)
                .ok()
                .and_then(|m| usize::try_from(m.len()).ok()),
        }
    }

    /// Accepted-extension hint shown by the form. Not enforced.
    pub fn looks_like_pdf(&self) -> bool {
        self.filename.to_lowercase().ends_with(".pdf")
    }
}

fn resolve_content_type(filename: &str, declared: Option<&str>) -> String {
    match declared.map(str::trim).filter(|c| !c.is_empty()) {
        Some(declared) if declared != "application/octet-stream" => declared.to_string(),
        _ if filename.to_lowercase().ends_with(".pdf") => PDF_CONTENT_TYPE.to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_content_type_inferred_from_extension() {
        let a = Attachment::from_bytes("CV.PDF", None, Bytes::from_static(b"%PDF"));
        assert_eq!(a.content_type, PDF_CONTENT_TYPE);
        assert!(a.looks_like_pdf());
        assert_eq!(a.known_size(), Some(4));
    }

    #[test]
    fn test_declared_content_type_wins() {
        let a = Attachment::from_bytes("cv.docx", Some("application/msword"), Bytes::new());
        assert_eq!(a.content_type, "application/msword");
        assert!(!a.looks_like_pdf());
    }

    #[test]
    fn test_octet_stream_falls_back_to_extension() {
        let a = Attachment::from_bytes("cv.pdf", Some("application/octet-stream"), Bytes::new());
        assert_eq!(a.content_type, PDF_CONTENT_TYPE);
    }

    #[test]
    fn test_missing_path_has_unknown_size() {
        let a = Attachment::from_path("/definitely/not/here/resume.pdf");
        assert_eq!(a.filename, "resume.pdf");
        assert_eq!(a.known_size(), None);
    }
}
