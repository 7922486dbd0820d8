//! Moderation configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Moderation policy configuration.
///
/// The report threshold and the screening hook are the two deliberate
/// tuning points of the moderation lifecycle: how many distinct reporters
/// flag a pending item, and whether uploads are auto-screened at all.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationConfig {
    /// Distinct reporters required to flag a pending item
    #[serde(default = "default_report_threshold")]
    pub report_threshold: u32,

    /// Screening service endpoint; unset disables automated screening
    pub screening_url: Option<String>,

    /// Bearer key for the screening service
    pub screening_api_key: Option<String>,

    /// Screening call timeout in seconds
    #[serde(default = "default_screening_timeout")]
    pub screening_timeout_secs: u64,
}

impl ModerationConfig {
    /// Validate moderation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.report_threshold == 0 {
            return Err(ValidationError::InvalidReportThreshold);
        }
        if self.screening_url.is_some() && self.screening_api_key.is_none() {
            return Err(ValidationError::ScreeningKeyMissing);
        }
        Ok(())
    }

    /// True when an automated screening backend is configured.
    pub fn screening_enabled(&self) -> bool {
        self.screening_url.is_some() && self.screening_api_key.is_some()
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            report_threshold: default_report_threshold(),
            screening_url: None,
            screening_api_key: None,
            screening_timeout_secs: default_screening_timeout(),
        }
    }
}

fn default_report_threshold() -> u32 {
    1
}

fn default_screening_timeout() -> u64 {
    5
}
