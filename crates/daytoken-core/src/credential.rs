//! The short-lived numeric credential shown to the user

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::MASK_SUFFIX_LEN;

/// A fixed-width decimal token together with its issuance time.
///
/// The value is security-sensitive: it is wiped from memory on drop and
/// redacted in `Debug` output except for the mask suffix used by credential
/// lists ("Token ending *1234").
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    value: String,

    /// Unix timestamp of generation
    #[zeroize(skip)]
    issued_at: u64,
}

impl Credential {
    /// Create a credential from an already-validated digit string
    pub fn new(value: String, issued_at: u64) -> Self {
        Self { value, issued_at }
    }

    /// Full digit string, zero-padded to the engine's token width
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Unix timestamp at which this credential was generated
    pub fn issued_at(&self) -> u64 {
        self.issued_at
    }

    /// Trailing digits safe to display next to an enrolled identifier
    pub fn mask_suffix(&self) -> &str {
        let start = self.value.len().saturating_sub(MASK_SUFFIX_LEN);
        &self.value[start..]
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credential")
            .field("value", &format!("***{}", self.mask_suffix()))
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_suffix() {
        let cred = Credential::new("042137".to_string(), 1_700_000_000);
        assert_eq!(cred.mask_suffix(), "2137");
    }

    #[test]
    fn test_mask_suffix_short_value() {
        let cred = Credential::new("42".to_string(), 0);
        assert_eq!(cred.mask_suffix(), "42");
    }

    #[test]
    fn test_debug_redacts_value() {
        let cred = Credential::new("042137".to_string(), 0);
        let rendered = format!("{:?}", cred);
        assert!(rendered.contains("***2137"));
        assert!(!rendered.contains("042137"));
    }
}
