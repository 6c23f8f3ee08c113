//! Runtime Configuration
//!
//! Settings shared by the binaries. Loaded from environment variables (with
//! `.env` support) or from a TOML file; CLI flags override them.

use clap::ValueEnum;
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::budget::DEFAULT_FLOW_TOLERANCE;
use crate::mechanism::DisconnectPolicy;

/// Main configuration struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What a payment run does when removing a path edge disconnects the target
    pub disconnect_policy: DisconnectPolicy,

    /// Relative tolerance for "max flow equals total budget"
    pub flow_tolerance: f64,

    /// `tracing` filter directive, e.g. `vcg_paths=debug`
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            disconnect_policy: DisconnectPolicy::Fail,
            flow_tolerance: DEFAULT_FLOW_TOLERANCE,
            log_filter: "vcg_paths=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            disconnect_policy: match env::var("DISCONNECT_POLICY") {
                Ok(value) => parse_policy(&value)?,
                Err(_) => defaults.disconnect_policy,
            },

            flow_tolerance: env::var("FLOW_TOLERANCE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.flow_tolerance),

            log_filter: env::var("LOG_FILTER").unwrap_or(defaults.log_filter),
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.flow_tolerance.is_finite() || self.flow_tolerance <= 0.0 {
            return Err(eyre!(
                "FLOW_TOLERANCE must be a positive number (currently {})",
                self.flow_tolerance
            ));
        }

        if self.flow_tolerance >= 1e-3 {
            return Err(eyre!(
                "FLOW_TOLERANCE {} is too loose to tell feasible budgets apart",
                self.flow_tolerance
            ));
        }

        if self.log_filter.trim().is_empty() {
            return Err(eyre!("LOG_FILTER must not be empty"));
        }

        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════╗");
        println!("║                 VCG PATHS - CONFIGURATION                  ║");
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ Disconnect Policy: {:<39} ║", self.disconnect_policy.to_string());
        println!("║ Flow Tolerance:    {:<39e} ║", self.flow_tolerance);
        println!("║ Log Filter:        {:<39} ║", self.log_filter);
        println!("╚════════════════════════════════════════════════════════════╝");
    }
}

/// Parse a `DISCONNECT_POLICY` value, case-insensitively
fn parse_policy(value: &str) -> Result<DisconnectPolicy> {
    DisconnectPolicy::from_str(value.trim(), true)
        .map_err(|_| eyre!("DISCONNECT_POLICY must be `fail` or `infinite` (got {:?})", value))
}
