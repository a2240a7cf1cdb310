//! Field configuration.
//!
//! A field is described by its decimal count, locale, rounding mode,
//! behavior and sink kind. Configuration usually comes from a TOML table:
//!
//! ```toml
//! decimals = 3
//! locale = "de-DE"
//! rounding = "truncate"
//! behavior = "live"
//! sink = "bound-control"
//! ```
//!
//! Every key is optional.

use std::sync::Arc;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::behavior::BehaviorKind;
use crate::codec::NumberCodec;
use crate::decimal::RoundingMode;
use crate::locale::{DEFAULT_LOCALE, FormatSpec, LocaleFormatter, supported_locales};
use crate::sink::SinkTarget;

/// More fraction digits than this cannot survive a round trip through `f64`.
pub const MAX_DECIMALS: usize = 15;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown locale {locale:?} (supported: {supported})")]
    UnknownLocale { locale: String, supported: String },

    #[error("decimals must be at most {max}, got {0}", max = MAX_DECIMALS)]
    DecimalsOutOfRange(usize),

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    pub decimals: usize,
    pub locale: String,
    pub rounding: RoundingMode,
    pub behavior: BehaviorKind,
    pub sink: SinkTarget,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            locale: DEFAULT_LOCALE.to_string(),
            rounding: RoundingMode::default(),
            behavior: BehaviorKind::default(),
            sink: SinkTarget::default(),
        }
    }
}

impl FieldConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = toml::from_str(s)?;
        config.validate()?;
        debug!(
            "loaded field config: {} decimals, locale {}",
            config.decimals, config.locale
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::DecimalsOutOfRange(self.decimals));
        }
        self.formatter().map(|_| ())
    }

    pub fn format_spec(&self) -> FormatSpec {
        FormatSpec {
            decimals: self.decimals,
            locale: self.locale.clone(),
        }
    }

    /// Validate and build the codec this configuration describes.
    pub fn codec(&self) -> Result<NumberCodec, ConfigError> {
        self.validate()?;
        let formatter = self.formatter()?;
        Ok(NumberCodec::new(
            Arc::new(formatter),
            self.decimals,
            self.rounding,
        ))
    }

    fn formatter(&self) -> Result<LocaleFormatter, ConfigError> {
        LocaleFormatter::new(&self.locale).ok_or_else(|| ConfigError::UnknownLocale {
            locale: self.locale.clone(),
            supported: supported_locales().collect::<Vec<_>>().join(", "),
        })
    }
}
