//! Upload payload types

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Field name the backend reads the uploaded file from
pub const FILE_FIELD: &str = "file";

/// A file held in memory, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    pub file_name: String,
    /// MIME type, if known
    pub content_type: Option<String>,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, guessing the content type from its extension
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let content_type = match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => Some("text/csv"),
            Some("json") => Some("application/json"),
            Some("txt") => Some("text/plain"),
            Some("xlsx") => {
                Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            }
            _ => None,
        };

        Ok(Self {
            file_name,
            content_type: content_type.map(str::to_string),
            bytes,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One named part of a multipart body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file: UploadFile,
}

/// Ordered multipart form container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    parts: Vec<FormPart>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file under `name`; repeated names are kept
    pub fn append(&mut self, name: impl Into<String>, file: UploadFile) {
        self.parts.push(FormPart {
            name: name.into(),
            file,
        });
    }

    /// Single-file form under the field the upload endpoint expects
    pub fn with_file(file: UploadFile) -> Self {
        let mut form = Self::new();
        form.append(FILE_FIELD, file);
        form
    }

    pub fn get(&self, name: &str) -> Option<&UploadFile> {
        self.parts.iter().find(|p| p.name == name).map(|p| &p.file)
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Convert into a `reqwest` multipart body
    pub(crate) fn into_multipart(self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for FormPart { name, file } in self.parts {
            let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
            if let Some(ct) = file.content_type {
                part = part.mime_str(&ct)?;
            }
            form = form.part(name, part);
        }
        Ok(form)
    }
}
