//! Configuration and constants for the CLI.
//!
//! Connection parameters come either from direct CLI flags or from an
//! INI-style connection file with one section per destination:
//!
//! ```ini
//! [PRD]
//! dest   = PRD
//! user   = rfcuser
//! passwd = secret
//! ashost = sap-prd.example.com
//! sysnr  = 00
//! client = 100
//! lang   = EN
//! ```

use crate::utils::error::ConfigError;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default timeout for gateway requests
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(30);

/// SAP gateway port convention: 33<NN> where NN is the system number
pub const GATEWAY_PORT_BASE: u16 = 3300;

/// ABAP function module names are capped at 30 characters
pub const MAX_FUNCTION_NAME_LEN: usize = 30;

/// Parameters needed to open an RFC session
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    pub user: String,
    pub passwd: String,
    pub ashost: String,
    pub client: String,
    pub sysnr: String,
    pub lang: Option<String>,
    pub saprouter: Option<String>,
}

impl ConnectionParams {
    /// Gateway port for this system (33<NN> by SAP convention).
    ///
    /// `sysnr` is validated when the params are resolved; a value that
    /// slipped past that falls back to the base port, loudly.
    pub fn gateway_port(&self) -> u16 {
        match self.sysnr.parse::<u16>() {
            Ok(offset) if offset <= 99 => GATEWAY_PORT_BASE + offset,
            _ => {
                warn!(
                    "System number '{}' is not a number between 00 and 99, using port {}",
                    self.sysnr, GATEWAY_PORT_BASE
                );
                GATEWAY_PORT_BASE
            }
        }
    }
}

/// Check that a system number is a two-digit-range number (00-99)
pub fn validate_sysnr(sysnr: &str) -> Result<(), ConfigError> {
    match sysnr.parse::<u16>() {
        Ok(offset) if offset <= 99 => Ok(()),
        _ => Err(ConfigError::InvalidSysnr(sysnr.to_string())),
    }
}

/// Parsed connection file: ordered sections of key/value pairs
#[derive(Debug, Clone)]
pub struct ConnectionFile {
    sections: Vec<(String, HashMap<String, String>)>,
}

impl ConnectionFile {
    /// Load and parse a connection file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading connection file: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse INI-style contents: `[section]` headers, `key = value` lines,
    /// `#` and `;` comments. `:` is accepted as a separator as well.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut sections: Vec<(String, HashMap<String, String>)> = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header.strip_suffix(']').ok_or_else(|| ConfigError::Syntax {
                    line: index + 1,
                    reason: "unterminated section header".to_string(),
                })?;
                sections.push((name.trim().to_string(), HashMap::new()));
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .or_else(|| line.split_once(':'))
                .ok_or_else(|| ConfigError::Syntax {
                    line: index + 1,
                    reason: "expected 'key = value'".to_string(),
                })?;

            let section = sections.last_mut().ok_or_else(|| ConfigError::Syntax {
                line: index + 1,
                reason: "key/value pair before any [section] header".to_string(),
            })?;
            section
                .1
                .insert(key.trim().to_lowercase(), value.trim().to_string());
        }

        Ok(Self { sections })
    }

    /// Resolve connection parameters for a destination.
    ///
    /// With `dest` given, the section whose `dest` key matches is used;
    /// without it, the first section wins.
    pub fn resolve(&self, dest: Option<&str>) -> Result<ConnectionParams, ConfigError> {
        let (name, values) = match dest {
            Some(wanted) => self
                .sections
                .iter()
                .find(|(_, values)| values.get("dest").map(String::as_str) == Some(wanted))
                .ok_or_else(|| ConfigError::DestinationNotFound(wanted.to_string()))?,
            None => self.sections.first().ok_or(ConfigError::NoSections)?,
        };

        debug!("Using connection section: {}", name);

        let required = |key: &str| -> Result<String, ConfigError> {
            values.get(key).cloned().ok_or_else(|| ConfigError::MissingKey {
                section: name.clone(),
                key: key.to_string(),
            })
        };

        let sysnr = values
            .get("sysnr")
            .cloned()
            .unwrap_or_else(|| "00".to_string());
        validate_sysnr(&sysnr)?;

        Ok(ConnectionParams {
            user: required("user")?,
            passwd: required("passwd")?,
            ashost: required("ashost")?,
            client: required("client")?,
            sysnr,
            lang: values.get("lang").cloned(),
            saprouter: values.get("saprouter").cloned(),
        })
    }
}
