//! Client contract

use sd_core::error::ValidationErrors;
use sd_models::Client;

use crate::base::{require, Contract, ValidationResult};

pub struct ClientContract;

impl Contract<Client> for ClientContract {
    fn validate(&self, client: &Client) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        require(&mut errors, "name", !client.name.trim().is_empty(), "is required");
        require(&mut errors, "phone", !client.phone.trim().is_empty(), "is required");
        require(
            &mut errors,
            "phone",
            client.phone.trim().is_empty()
                || client
                    .phone
                    .chars()
                    .all(|c| c.is_ascii_digit() || c == '+' || c == ' '),
            "contains invalid characters",
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_client() {
        let client = Client::new("Asha Varma", "+91 9876543210");
        assert!(ClientContract.validate(&client).is_ok());
    }

    #[test]
    fn test_blank_name() {
        let client = Client::new("", "9876543210");
        let errors = ClientContract.validate(&client).unwrap_err();
        assert!(errors.has_error("name"));
    }

    #[test]
    fn test_phone_with_letters() {
        let client = Client::new("Asha Varma", "98765abcde");
        let errors = ClientContract.validate(&client).unwrap_err();
        assert!(errors.has_error("phone"));
    }
}
