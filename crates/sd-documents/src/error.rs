//! Document generation errors

use thiserror::Error;

/// Any of these aborts the whole document; there is no partial output.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("QR code error: {0}")]
    Qr(String),

    #[error("Image error: {0}")]
    Image(String),
}
