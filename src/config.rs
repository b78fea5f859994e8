pub const DEFAULT_CURRENCY: &str = "PHP";
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.payment.com/checkout";
pub const DEFAULT_ID_ATTEMPTS: u8 = 5;

/// Settings for the payment ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Currency stamped on every new transaction.
    pub currency: String,
    /// Checkout page the payer is redirected to; the token is appended as a
    /// query parameter.
    pub gateway_url: String,
    /// How many identifiers to try before giving up on an insert.
    pub id_attempts: u8,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            id_attempts: DEFAULT_ID_ATTEMPTS,
        }
    }
}

impl LedgerConfig {
    pub fn checkout_url(&self, token: &str) -> String {
        format!("{}?token={}", self.gateway_url, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_url() {
        let config = LedgerConfig::default();
        assert_eq!(
            config.checkout_url("00ff00ff00ff00ff"),
            "https://gateway.payment.com/checkout?token=00ff00ff00ff00ff"
        );
    }
}
