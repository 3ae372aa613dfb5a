use std::{fs, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{plan::Plan, prelude::*};

/// Plans available for analysis, as stored in a TOML file with a `[[plan]]` table per plan.
#[derive(Default, Deserialize, Serialize)]
#[must_use]
pub struct Catalog {
    #[serde(default, rename = "plan")]
    pub plans: Vec<Plan>,
}

impl Catalog {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let catalog = Self::from_toml(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(n_plans = catalog.plans.len(), "loaded the catalog");
        Ok(catalog)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(contents)?;
        if let Some(plan_id) = catalog.plans.iter().map(|plan| &plan.id).duplicates().next() {
            bail!("duplicate plan ID `{plan_id}`");
        }
        Ok(catalog)
    }

    pub fn find(&self, plan_id: &str) -> Result<&Plan> {
        self.plans
            .iter()
            .find(|plan| plan.id == plan_id)
            .with_context(|| format!("plan `{plan_id}` is not in the catalog"))
    }

    /// Pick the plans in the requested order, or the whole catalog when nothing is requested.
    pub fn select(&self, plan_ids: &[String]) -> Result<Vec<Plan>> {
        if plan_ids.is_empty() {
            return Ok(self.plans.clone());
        }
        plan_ids.iter().map(|plan_id| self.find(plan_id).cloned()).collect()
    }
}
