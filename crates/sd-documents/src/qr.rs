//! UPI payment QR codes

use image::{DynamicImage, Luma};
use qrcode::QrCode;
use url::form_urlencoded;

use crate::error::DocumentError;

/// UPI deep link for the payment apps to scan.
pub fn upi_uri(payee_id: &str, payee_name: &str, amount: i64) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("pa", payee_id)
        .append_pair("pn", payee_name)
        .append_pair("am", &amount.to_string())
        .append_pair("cu", "INR")
        .finish();

    format!("upi://pay?{}", query)
}

/// Render the deep link as a QR image ready for embedding.
pub fn upi_qr_image(payee_id: &str, payee_name: &str, amount: i64) -> Result<DynamicImage, DocumentError> {
    let uri = upi_uri(payee_id, payee_name, amount);

    let code = QrCode::new(uri.as_bytes()).map_err(|e| DocumentError::Qr(e.to_string()))?;
    let image = code.render::<Luma<u8>>().build();

    Ok(DynamicImage::ImageLuma8(image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upi_uri() {
        let uri = upi_uri("shop@upi", "Sitedesk Interiors", 50_000);
        assert!(uri.starts_with("upi://pay?"));
        assert!(uri.contains("pa=shop%40upi"));
        assert!(uri.contains("am=50000"));
        assert!(uri.contains("cu=INR"));
    }

    #[test]
    fn test_qr_image_builds() {
        let image = upi_qr_image("shop@upi", "Sitedesk", 1_000).unwrap();
        assert!(image.width() > 0);
    }
}
