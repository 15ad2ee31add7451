//! Contact service: prefilled message links and the CV download.

use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const OWNER_NAME: &str = "Leonardo Nieto";
pub const OWNER_TITLE: &str = "AI Solutions Engineer";
pub const WHATSAPP_NUMBER: &str = "525615410755";
pub const WHATSAPP_DISPLAY: &str = "+52 56 1541 0755";
pub const EMAIL: &str = "leo_nieto_cortes@hotmail.com";
pub const LOCATION: &str = "San Juan del Río, Qro. / Ecatepec, Edo. Méx.";
pub const CV_FILE_NAME: &str = "CV_Leonardo_Nieto_AI_Engineer.pdf";

/// Characters left unescaped: alphanumerics plus `_.-~/`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Archivo CV no encontrado en: {}", .0.display())]
    CvNotFound(PathBuf),
    #[error("no se pudo leer el CV en {}: {source}", path.display())]
    CvRead { path: PathBuf, source: std::io::Error },
}

impl crate::error::ErrorCode for ContactError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CvNotFound(_) => "E_CV_NOT_FOUND",
            Self::CvRead { .. } => "E_CV_READ",
        }
    }
}

/// Quick-message links built from the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLinks {
    pub whatsapp: String,
    pub mailto: String,
}

#[must_use]
pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, QUERY_VALUE).to_string()
}

#[must_use]
pub fn whatsapp_direct_link() -> String {
    format!("https://wa.me/{WHATSAPP_NUMBER}")
}

/// Build the WhatsApp and e-mail links for a visitor's name and message.
#[must_use]
pub fn message_links(name: &str, msg: &str) -> MessageLinks {
    let whatsapp_text = encode(&format!("Hola Leonardo, soy {name}. {msg}"));
    let subject = encode(&format!("Contacto Portafolio: {name}"));
    let body = encode(&format!("Hola Leonardo,\n\nSoy {name}.\n\n{msg}"));
    MessageLinks {
        whatsapp: format!("https://wa.me/{WHATSAPP_NUMBER}?text={whatsapp_text}"),
        mailto: format!("mailto:{EMAIL}?subject={subject}&body={body}"),
    }
}

/// Whether the CV file is present and readable as a regular file.
pub async fn cv_available(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Read the CV bytes.
///
/// # Errors
///
/// Returns [`ContactError::CvNotFound`] when the path does not resolve to a
/// file, or [`ContactError::CvRead`] for any other I/O failure.
pub async fn load_cv(path: &Path) -> Result<Vec<u8>, ContactError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if matches!(e.kind(), std::io::ErrorKind::NotFound | std::io::ErrorKind::IsADirectory) => {
            Err(ContactError::CvNotFound(path.to_path_buf()))
        }
        Err(source) => Err(ContactError::CvRead { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
