use crate::error::{SummarizeError, INVALID_FILE, MISSING_FILE, MISSING_QUERY};
use axum::body::Bytes;
use axum::extract::Multipart;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct UploadedFile {
    pub filename: String,
    pub bytes: Bytes,
}

/// The raw `file` and `query` parts of a summarize request.
#[derive(Default)]
pub struct UploadRequest {
    pub file: Option<UploadedFile>,
    pub query: Option<String>,
}

/// An upload that passed validation.
pub struct ValidUpload {
    pub filename: String,
    pub bytes: Bytes,
    pub query: String,
}

impl UploadRequest {
    /// Reads every part of the form. A `file` part only counts if it carries
    /// a filename; unknown parts are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, SummarizeError> {
        let mut request = UploadRequest::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            let filename = field.file_name().map(str::to_string);

            match (name.as_str(), filename) {
                // Repeated parts: the first one wins.
                ("file", Some(filename)) if request.file.is_none() => {
                    let bytes = field.bytes().await?;
                    request.file = Some(UploadedFile { filename, bytes });
                }
                ("query", None) if request.query.is_none() => {
                    request.query = Some(field.text().await?);
                }
                _ => log::debug!("Ignoring multipart field {:?}", name),
            }
        }

        Ok(request)
    }

    pub fn validate(self) -> Result<ValidUpload, SummarizeError> {
        let file = self.file.ok_or(SummarizeError::Validation(MISSING_FILE))?;
        let query = self.query.ok_or(SummarizeError::Validation(MISSING_QUERY))?;

        if !is_pdf_filename(&file.filename) {
            return Err(SummarizeError::Validation(INVALID_FILE));
        }

        Ok(ValidUpload {
            filename: file.filename,
            bytes: file.bytes,
            query,
        })
    }
}

pub fn is_pdf_filename(filename: &str) -> bool {
    !filename.is_empty() && filename.to_lowercase().ends_with(".pdf")
}

/// An uploaded PDF stored under a unique name for the length of one request.
///
/// The file is removed when the guard is dropped, on every exit path of the
/// handler. A failed removal is logged and otherwise ignored.
pub struct TemporaryDocument {
    path: PathBuf,
    file: Option<NamedTempFile>,
}

impl TemporaryDocument {
    pub fn persist(dir: &Path, bytes: &[u8]) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".pdf")
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        Ok(Self {
            path: file.path().to_path_buf(),
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TemporaryDocument {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            match file.close() {
                Ok(()) => log::info!("Temporary file deleted: {}", self.path.display()),
                Err(e) => log::error!(
                    "Failed to delete temporary file {}: {}",
                    self.path.display(),
                    e
                ),
            }
        }
    }
}
