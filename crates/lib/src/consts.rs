//! Constants shared across the crate.

use std::time::Duration;

/// Dashboard name used when the configuration doesn't provide one.
pub const DEFAULT_DASHBOARD_NAME: &str = "ServiceMetricsDashboard";

/// Statistic window applied to each metric unless overridden.
pub const DEFAULT_METRIC_PERIOD: Duration = Duration::from_secs(5 * 60);

/// Display window applied to each widget unless overridden.
pub const DEFAULT_DASHBOARD_PERIOD: Duration = Duration::from_secs(3 * 60 * 60);

/// Width of the dashboard grid, in columns.
pub const GRID_COLUMNS: u32 = 24;

pub const DEFAULT_WIDGET_WIDTH: u32 = GRID_COLUMNS;
pub const DEFAULT_WIDGET_HEIGHT: u32 = 6;

/// Widget width for kinds that lay out four widgets in one row.
pub const QUARTER_WIDTH: u32 = GRID_COLUMNS / 4;

/// Widget width for kinds that lay out three widgets in one row.
pub const THIRD_WIDTH: u32 = GRID_COLUMNS / 3;

/// Length of the truncated content hash.
pub const OBJ_HASH_PREFIX_LEN: usize = 20;
