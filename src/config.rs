use std::env;

use crate::models::schedule::{ConflictPolicy, SaturdayPolicy};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub app_base_url: String,
    pub max_body_bytes: usize,
    /// Saturday setup for schedules created without an explicit policy.
    pub default_saturday_policy: SaturdayPolicy,
    /// Conflict rule used when a request does not name one.
    pub conflict_policy: ConflictPolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost".into()),
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| "1048576".into())
                .parse()?,
            default_saturday_policy: env::var("DEFAULT_SATURDAY_POLICY")
                .unwrap_or_else(|_| "half_day".into())
                .parse()?,
            conflict_policy: env::var("CONFLICT_POLICY")
                .unwrap_or_else(|_| "respect_off_days".into())
                .parse()?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            app_base_url: "http://localhost".into(),
            max_body_bytes: 1024 * 1024,
            default_saturday_policy: SaturdayPolicy::default(),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_values() {
        assert_eq!("off".parse::<SaturdayPolicy>().unwrap(), SaturdayPolicy::Off);
        assert_eq!("half_day".parse::<SaturdayPolicy>().unwrap(), SaturdayPolicy::HalfDay);
        assert!("sometimes".parse::<SaturdayPolicy>().is_err());

        assert_eq!(
            "working_flag_only".parse::<ConflictPolicy>().unwrap(),
            ConflictPolicy::WorkingFlagOnly
        );
        assert!("strict".parse::<ConflictPolicy>().is_err());
    }
}
