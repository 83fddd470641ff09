use anyhow::{anyhow, Result};
use crm_core::CrmConfigSnapshot;

pub const DEFAULT_FROM_ADDRESS: &str = "admin@test.com";
pub const DEFAULT_OTP_LENGTH: usize = 16;
const MIN_OTP_LENGTH: usize = 8;

/// Typed view of the `notify.*` / `leads.*` configuration keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSettings {
    /// `notify.from`
    pub from_address: String,
    /// `notify.lead_created.recipients`; empty means "the organisor".
    pub lead_created_recipients: Vec<String>,
    /// `leads.bcrypt_cost`
    pub bcrypt_cost: u32,
    /// `leads.otp_length`
    pub otp_length: usize,
}

impl Default for LeadSettings {
    fn default() -> Self {
        Self {
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            lead_created_recipients: Vec::new(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            otp_length: DEFAULT_OTP_LENGTH,
        }
    }
}

impl LeadSettings {
    pub fn from_config(config: &CrmConfigSnapshot) -> Result<Self> {
        let defaults = Self::default();

        let bcrypt_cost = match config.get("leads.bcrypt_cost") {
            None => defaults.bcrypt_cost,
            Some(raw) => config
                .get_u32("leads.bcrypt_cost")
                .filter(|c| (4..=31).contains(c))
                .ok_or_else(|| anyhow!("leads.bcrypt_cost must be between 4 and 31, got '{raw}'"))?,
        };

        let otp_length = match config.get("leads.otp_length") {
            None => defaults.otp_length,
            Some(raw) => config
                .get_usize("leads.otp_length")
                .filter(|n| *n >= MIN_OTP_LENGTH)
                .ok_or_else(|| {
                    anyhow!("leads.otp_length must be at least {MIN_OTP_LENGTH}, got '{raw}'")
                })?,
        };

        Ok(Self {
            from_address: config
                .get_string("notify.from")
                .unwrap_or(defaults.from_address),
            lead_created_recipients: config
                .get_list("notify.lead_created.recipients")
                .unwrap_or_default(),
            bcrypt_cost,
            otp_length,
        })
    }
}
