//! EmailAddress value object.

use super::errors::ValidationError;

/// Longest address accepted.
const MAX_EMAIL_LEN: usize = 254;

/// A validated email address.
///
/// Surrounding whitespace is trimmed on construction.
///
/// # Example
///
/// ```
/// use contacts_api::domain::EmailAddress;
///
/// let email = EmailAddress::new(" ada@example.com ").unwrap();
/// assert_eq!(email.as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress.
    ///
    /// # Validation Rules
    ///
    /// - At most 254 characters, no interior whitespace
    /// - Exactly one '@' with a non-empty local part
    /// - A domain made of non-empty labels with at least one '.'
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        let trimmed = email.trim();

        if !Self::is_valid(trimmed) {
            return Err(ValidationError::InvalidEmail(email));
        }

        Ok(Self(trimmed.to_string()))
    }

    fn is_valid(email: &str) -> bool {
        if email.is_empty() || email.len() > MAX_EMAIL_LEN {
            return false;
        }
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        !local.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && domain.split('.').all(|label| !label.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
