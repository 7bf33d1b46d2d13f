//! Rendering to the dashboarding service's body format.
//!
//! Widgets flow left to right across a 24-column grid. A widget that doesn't
//! fit in what remains of the current row starts a new one; each row is as
//! tall as its tallest widget.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::consts::GRID_COLUMNS;
use crate::metrics::{MetricDescriptor, WidgetDescriptor};

use super::Dashboard;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardBody {
  pub start: String,
  pub period_override: &'static str,
  pub widgets: Vec<RenderedWidget>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedWidget {
  #[serde(rename = "type")]
  pub widget_type: &'static str,
  pub x: u32,
  pub y: u32,
  pub width: u32,
  pub height: u32,
  pub properties: WidgetProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetProperties {
  pub title: String,
  pub view: &'static str,
  pub live_data: bool,
  pub period: u64,
  pub metrics: Vec<Vec<Value>>,
}

impl DashboardBody {
  pub fn render(dashboard: &Dashboard) -> Self {
    let mut widgets = Vec::with_capacity(dashboard.widgets.len());
    let (mut x, mut y, mut row_height): (u32, u32, u32) = (0, 0, 0);

    for widget in &dashboard.widgets {
      let width = widget.width.clamp(1, GRID_COLUMNS);
      if x + width > GRID_COLUMNS {
        x = 0;
        y = y.saturating_add(row_height);
        row_height = 0;
      }
      widgets.push(RenderedWidget {
        widget_type: "metric",
        x,
        y,
        width,
        height: widget.height,
        properties: properties(widget),
      });
      x += width;
      row_height = row_height.max(widget.height);
    }

    Self {
      start: relative_start(dashboard.period),
      period_override: "inherit",
      widgets,
    }
  }
}

fn properties(widget: &WidgetDescriptor) -> WidgetProperties {
  WidgetProperties {
    title: widget.title.clone(),
    view: "timeSeries",
    live_data: widget.live_refresh,
    period: widget.period.as_secs(),
    metrics: widget.metrics.iter().map(metric_row).collect(),
  }
}

/// `[namespace, name, dimKey, dimValue, ..., { stat, period }]`
fn metric_row(metric: &MetricDescriptor) -> Vec<Value> {
  let mut row = vec![
    Value::from(metric.namespace.as_str()),
    Value::from(metric.metric_name.as_str()),
  ];
  for (key, value) in &metric.dimensions {
    row.push(Value::from(key.as_str()));
    row.push(Value::from(value.as_str()));
  }
  row.push(serde_json::json!({
    "stat": metric.statistic.as_str(),
    "period": metric.period.as_secs(),
  }));
  row
}

fn relative_start(period: Duration) -> String {
  let secs = period.as_secs();
  if secs >= 3600 && secs % 3600 == 0 {
    format!("-PT{}H", secs / 3600)
  } else if secs >= 60 && secs % 60 == 0 {
    format!("-PT{}M", secs / 60)
  } else {
    format!("-PT{}S", secs)
  }
}
