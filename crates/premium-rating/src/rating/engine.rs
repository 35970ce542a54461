use tracing::debug;

use super::premium::Premium;
use super::profile::DriverProfile;
use super::rates::{MissingRateError, RateTable};
use super::rules::{standard_rules, Rule};

/// Evaluates an ordered rule list against a fixed rate table.
///
/// Both are set at construction and read-only afterwards, so one engine can
/// be shared across threads and rate any number of profiles.
#[derive(Debug)]
pub struct RatingEngine {
    rates: RateTable,
    rules: Vec<Rule>,
}

impl RatingEngine {
    pub fn new() -> Self {
        Self::with_rates(RateTable::standard())
    }

    pub fn with_rates(rates: RateTable) -> Self {
        Self {
            rates,
            rules: standard_rules(),
        }
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::name).collect()
    }

    /// Run every matching rule, in order, over a fresh premium.
    ///
    /// The first failing rule aborts the calculation.
    pub fn calculate_premium(&self, profile: &DriverProfile) -> Result<Premium, MissingRateError> {
        let mut premium = Premium::new();

        for rule in &self.rules {
            if !rule.matches(profile) {
                debug!(rule = rule.name(), "rule skipped");
                continue;
            }

            rule.apply(profile, &self.rates, &mut premium)?;
            debug!(rule = rule.name(), running_total = premium.total(), "rule applied");
        }

        debug!(
            make = profile.vehicle_make(),
            model = profile.vehicle_model(),
            total = premium.total(),
            "premium calculated"
        );
        Ok(premium)
    }
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::new()
    }
}
