use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use config::Config;
use serde::Deserialize;
use serde::de::Error as _;

use crate::error::CoreResult;

/// How the mapping layer interprets local (floating) date-times that carry
/// no `TZID` parameter and no UTC marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeZonePolicy {
    /// Keep the wall-clock value as a floating date-time.
    #[default]
    Floating,
    /// Treat the wall-clock value as UTC.
    AssumeUtc,
    /// Treat the wall-clock value as local to the named IANA zone.
    ///
    /// The zone name is validated where it is resolved; an unknown name
    /// downgrades to a conversion warning, never a hard failure.
    AssumeZone(String),
}

impl FromStr for TimeZonePolicy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" | "floating" => Self::Floating,
            "utc" => Self::AssumeUtc,
            zone => Self::AssumeZone(zone.to_string()),
        })
    }
}

impl fmt::Display for TimeZonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Floating => f.write_str("floating"),
            Self::AssumeUtc => f.write_str("utc"),
            Self::AssumeZone(zone) => f.write_str(zone),
        }
    }
}

impl<'de> Deserialize<'de> for TimeZonePolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_str(&raw).map_err(D::Error::custom)
    }
}

/// Options recognized by the decoding side of the codec.
///
/// The codec never reads process-wide configuration itself; callers build
/// this struct (directly or via [`DecodeOptions::load`]) and pass it in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecodeOptions {
    /// Interpretation of floating date-times during import.
    #[serde(default)]
    pub timezone: TimeZonePolicy,
    /// When `true`, a parameter that is not declared for its property is
    /// dropped (with a warning) instead of being kept verbatim.
    #[serde(default)]
    pub strict_unknown_parameters: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            timezone: TimeZonePolicy::Floating,
            strict_unknown_parameters: false,
        }
    }
}

impl DecodeOptions {
    /// ## Summary
    /// Loads decode options from environment variables (prefix `CALBIND`) and
    /// an optional `calbind.toml` file. Environment variables take precedence
    /// over file values.
    ///
    /// ## Errors
    /// Returns [`crate::CoreError::Configuration`] if building the
    /// configuration or deserializing it fails.
    pub fn load() -> CoreResult<Self> {
        Ok(Config::builder()
            .set_default("timezone", "floating")?
            .set_default("strict_unknown_parameters", false)?
            .add_source(
                config::Environment::with_prefix("CALBIND")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("calbind.toml").required(false))
            .build()?
            .try_deserialize::<Self>()?)
    }
}

/// ## Summary
/// Loads decode options from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the options fails.
pub fn load_options() -> Result<DecodeOptions> {
    dotenvy::dotenv().ok();

    Ok(DecodeOptions::load()?)
}
