use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dimension key to value. Ordered so descriptors compare and serialize the
/// same regardless of the order dimensions were added in.
pub type Dimensions = BTreeMap<String, String>;

/// Aggregation applied to a metric's datapoints within one period.
///
/// Parsing is case-insensitive and accepts the short forms `avg`, `min` and
/// `max`; serialization always uses the canonical name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Statistic {
  #[default]
  Average,
  Sum,
  Minimum,
  Maximum,
  SampleCount,
}

impl Statistic {
  pub fn as_str(self) -> &'static str {
    match self {
      Statistic::Average => "Average",
      Statistic::Sum => "Sum",
      Statistic::Minimum => "Minimum",
      Statistic::Maximum => "Maximum",
      Statistic::SampleCount => "SampleCount",
    }
  }
}

impl fmt::Display for Statistic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown statistic: {0}")]
pub struct UnknownStatistic(pub String);

impl FromStr for Statistic {
  type Err = UnknownStatistic;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "average" | "avg" => Ok(Statistic::Average),
      "sum" => Ok(Statistic::Sum),
      "minimum" | "min" => Ok(Statistic::Minimum),
      "maximum" | "max" => Ok(Statistic::Maximum),
      "samplecount" => Ok(Statistic::SampleCount),
      _ => Err(UnknownStatistic(s.to_string())),
    }
  }
}

impl TryFrom<String> for Statistic {
  type Error = UnknownStatistic;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

/// One named, dimensioned, aggregated time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricDescriptor {
  pub namespace: String,
  pub metric_name: String,
  pub dimensions: Dimensions,
  pub statistic: Statistic,
  /// Statistic window.
  #[serde(rename = "period_secs", with = "crate::util::duration::secs")]
  pub period: Duration,
}

/// One chart: a title, the metrics it plots and its layout hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetDescriptor {
  pub title: String,
  pub metrics: Vec<MetricDescriptor>,
  pub width: u32,
  pub height: u32,
  /// Display window.
  #[serde(rename = "period_secs", with = "crate::util::duration::secs")]
  pub period: Duration,
  pub live_refresh: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn statistic_parses_case_insensitively() {
    assert_eq!("sum".parse::<Statistic>().unwrap(), Statistic::Sum);
    assert_eq!("Maximum".parse::<Statistic>().unwrap(), Statistic::Maximum);
    assert_eq!("AVG".parse::<Statistic>().unwrap(), Statistic::Average);
  }

  #[test]
  fn statistic_rejects_unknown() {
    let err = "p99.9x".parse::<Statistic>().unwrap_err();
    assert_eq!(err.to_string(), "unknown statistic: p99.9x");
  }

  #[test]
  fn default_statistic_is_average() {
    assert_eq!(Statistic::default(), Statistic::Average);
  }

  #[test]
  fn descriptor_serializes_period_as_seconds() {
    let metric = MetricDescriptor {
      namespace: "AWS/SQS".to_string(),
      metric_name: "NumberOfMessagesSent".to_string(),
      dimensions: Dimensions::from([("QueueName".to_string(), "jobs".to_string())]),
      statistic: Statistic::Sum,
      period: Duration::from_secs(300),
    };

    let json = serde_json::to_value(&metric).unwrap();
    assert_eq!(json["period_secs"], 300);
    assert_eq!(json["statistic"], "Sum");
    assert_eq!(json["dimensions"]["QueueName"], "jobs");
  }
}
