//! Secret material kept out of logs and zeroed on drop.

use std::fmt;

use zeroize::Zeroize;

/// A string secret (API secrets, signing keys, SMTP passwords).
///
/// The `Debug` impl is redacted and the backing memory is zeroed when the
/// value is dropped.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Borrow the secret for use at a call site that genuinely needs it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString(**redacted**)")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let secret = SecretString::from("hunter2");

        assert_eq!(format!("{secret:?}"), "SecretString(**redacted**)");
    }

    #[test]
    fn expose_returns_the_value() {
        let secret = SecretString::from("hunter2");

        assert_eq!(secret.expose(), "hunter2");
    }
}
