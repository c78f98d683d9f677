//! PhoneNumber value object.

use super::errors::ValidationError;

/// A validated phone number.
///
/// Formatting characters are kept as entered; only the digit count and the
/// character set are checked.
///
/// # Example
///
/// ```
/// use contacts_api::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+44 (20) 7946-0958").unwrap();
/// assert_eq!(phone.as_str(), "+44 (20) 7946-0958");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Shortest accepted number, in digits.
    pub const MIN_DIGITS: usize = 3;
    /// Longest accepted number, in digits (E.164 limit).
    pub const MAX_DIGITS: usize = 15;

    /// Create a new PhoneNumber.
    ///
    /// # Validation Rules
    ///
    /// - Between 3 and 15 digits
    /// - Otherwise only spaces, '-', '.', '(', ')' and a single leading '+'
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the number is invalid.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();
        let trimmed = phone.trim();

        if !Self::is_valid(trimmed) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(trimmed.to_string()))
    }

    fn is_valid(phone: &str) -> bool {
        let body = phone.strip_prefix('+').unwrap_or(phone);

        let charset_ok = body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'));
        if !charset_ok {
            return false;
        }

        let digits = body.chars().filter(char::is_ascii_digit).count();
        (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_rules() {
        assert!(PhoneNumber::new("555-0100").is_ok());
        assert!(PhoneNumber::new("+1 (555) 010-0199").is_ok());
        assert!(PhoneNumber::new("555.010.0199").is_ok());
        assert!(PhoneNumber::new("911").is_ok());
        assert!(PhoneNumber::new("").is_err());
        assert!(PhoneNumber::new("12").is_err());
        assert!(PhoneNumber::new("no digits").is_err());
        assert!(PhoneNumber::new("555-0100 ext 2").is_err());
        assert!(PhoneNumber::new("++15550100").is_err());
        assert!(PhoneNumber::new("1234567890123456").is_err());
    }

    #[test]
    fn test_phone_trims() {
        let phone = PhoneNumber::new(" +1 (555) 010-0199 ").unwrap();
        assert_eq!(phone.as_str(), "+1 (555) 010-0199");
        assert_eq!(phone.into_inner(), "+1 (555) 010-0199");
    }
}
