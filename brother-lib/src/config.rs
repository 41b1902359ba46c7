use std::time::Duration;
use strum_macros::Display;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::Serialize;

pub const DEFAULT_PORT: u16 = 161;
pub const DEFAULT_COMMUNITY: &str = "public";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_RETRIES: u32 = 10;

/// Printer family. Decides which tag maps apply to the maintenance field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum PrinterType {
    #[default]
    Laser,
    Ink,
}

impl PrinterType {
    /// Parse a family name; anything unknown is treated as laser.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "laser" => PrinterType::Laser,
            "ink" => PrinterType::Ink,
            other => {
                warn!("Wrong printer_type argument: {other}, the printer will be treated as laser");
                PrinterType::Laser
            }
        }
    }
}

/// Connection settings for one printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub printer_type: PrinterType,
    pub community: String,
    /// Per-attempt wait for an answer.
    pub timeout: Duration,
    /// Extra attempts after the first one times out.
    pub retries: u32,
    /// Model name known ahead of the first poll, if any.
    pub model: Option<String>,
}

impl Config {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            printer_type: PrinterType::default(),
            community: DEFAULT_COMMUNITY.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            model: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_printer_type(mut self, printer_type: PrinterType) -> Self {
        self.printer_type = printer_type;
        self
    }

    pub fn with_community(mut self, community: impl Into<String>) -> Self {
        self.community = community.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}
