//! Serde adapters for [`Duration`] fields.
//!
//! Descriptors serialize durations as whole seconds; configuration accepts
//! human-readable strings such as `"3h"` or `"5m"`.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

pub mod secs {
  use super::*;

  pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_secs())
  }
}

pub mod human {
  use super::*;

  pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&humantime::format_duration(*duration).to_string())
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let duration = humantime::parse_duration(&raw).map_err(serde::de::Error::custom)?;
    if duration.is_zero() {
      return Err(serde::de::Error::custom("duration must be greater than zero"));
    }
    if duration.subsec_nanos() != 0 {
      return Err(serde::de::Error::custom(format!(
        "duration must be a whole number of seconds, got '{}'",
        raw
      )));
    }
    Ok(duration)
  }
}
