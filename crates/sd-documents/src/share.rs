//! Outbound WhatsApp share link
//!
//! Carries a URL-encoded text summary only; no attachment.

use url::form_urlencoded;

/// Build a wa.me deep link for a phone number and message.
/// Non-digit characters in the phone number are stripped.
pub fn whatsapp_share_link(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let encoded: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();

    format!("https://wa.me/{}?text={}", digits, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_encodes_message() {
        let link = whatsapp_share_link("+91 98765 43210", "Estimate total: Rs. 1,400");
        assert!(link.starts_with("https://wa.me/919876543210?text="));
        assert!(link.contains("Rs.+1%2C400"));
    }

    #[test]
    fn test_phone_is_stripped_to_digits() {
        let link = whatsapp_share_link("(098) 765-43210", "hi");
        assert!(link.starts_with("https://wa.me/09876543210?"));
    }
}
