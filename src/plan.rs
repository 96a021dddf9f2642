//! Price plans and the plan book they are configured in.

use std::{fs, path::Path};

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Named cost structure offered by a supplier.
#[must_use]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PricePlan {
    /// Unique plan name, the key of every cost result.
    pub name: String,

    /// Informational only, never enters the cost formula.
    pub supplier: String,

    /// Cost per unit of average hourly consumption. May be zero.
    pub unit_rate: Decimal,

    /// Day-of-week rate multipliers.
    ///
    /// Part of the plan's identity, but not consumed by the cost projection:
    /// the billing formula upstream never applied them, and silently starting
    /// to would change every published estimate. Kept inert on purpose.
    #[serde(default)]
    pub peak_time_multipliers: Vec<PeakTimeMultiplier>,
}

#[must_use]
#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
pub struct PeakTimeMultiplier {
    pub day_of_week: Weekday,

    pub multiplier: Decimal,
}

/// The full set of configured price plans.
#[must_use]
#[derive(Default, Deserialize)]
pub struct PlanBook {
    #[serde(default)]
    pub plans: Vec<PricePlan>,
}

impl PlanBook {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the plan book from `{}`", path.display()))?;
        let book: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse the plan book from `{}`", path.display()))?;
        info!(n_plans = book.plans.len(), "loaded the plan book");
        Ok(book)
    }

    pub fn plan(&self, name: &str) -> Option<&PricePlan> {
        self.plans.iter().find(|plan| plan.name == name)
    }
}
