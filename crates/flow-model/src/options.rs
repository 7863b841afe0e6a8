//! Tunable constants for sale splitting and list views.

use serde::{Deserialize, Serialize};

/// Freight charged per shipped unit ("flete"), in currency units.
pub const DEFAULT_FREIGHT_RATE_PER_UNIT: f64 = 500.0;

/// Maximum absolute difference at which FL + BM + UT still reconciles with the sale price.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub freight_rate_per_unit: f64,
    pub tolerance: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            freight_rate_per_unit: DEFAULT_FREIGHT_RATE_PER_UNIT,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SplitConfig {
    #[must_use]
    pub fn with_freight_rate(mut self, rate: f64) -> Self {
        self.freight_rate_per_unit = rate;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
