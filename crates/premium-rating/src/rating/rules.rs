use std::fmt;

use super::classifier::classify;
use super::premium::Premium;
use super::profile::DriverProfile;
use super::rates::{AccidentTier, AgeBracket, MissingRateError, RateKey, RateTable};

pub const BASE_RATE_RULE: &str = "base rate";
pub const AGE_FACTOR_RULE: &str = "age factor";
pub const ACCIDENT_HISTORY_RULE: &str = "accident history";

pub const AGE_FACTOR_LABEL: &str = "Age factor";
pub const ACCIDENT_HISTORY_LABEL: &str = "Accident history";

type Condition = Box<dyn Fn(&DriverProfile) -> bool + Send + Sync>;
type Action =
    Box<dyn Fn(&DriverProfile, &RateTable, &mut Premium) -> Result<(), MissingRateError> + Send + Sync>;

/// Named condition/action pair evaluated by the rating engine.
///
/// The action only runs after the condition held, and may only touch the
/// premium it is handed.
pub struct Rule {
    name: String,
    condition: Condition,
    action: Action,
}

impl Rule {
    pub fn new<C, A>(name: impl Into<String>, condition: C, action: A) -> Self
    where
        C: Fn(&DriverProfile) -> bool + Send + Sync + 'static,
        A: Fn(&DriverProfile, &RateTable, &mut Premium) -> Result<(), MissingRateError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            condition: Box::new(condition),
            action: Box::new(action),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, profile: &DriverProfile) -> bool {
        (self.condition)(profile)
    }

    pub fn apply(
        &self,
        profile: &DriverProfile,
        rates: &RateTable,
        premium: &mut Premium,
    ) -> Result<(), MissingRateError> {
        (self.action)(profile, rates, premium)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Built-in rules in evaluation order. The base rate comes first because the
/// age factor scales it.
pub fn standard_rules() -> Vec<Rule> {
    vec![base_rate_rule(), age_factor_rule(), accident_history_rule()]
}

pub fn base_rate_rule() -> Rule {
    Rule::new(
        BASE_RATE_RULE,
        |_| true,
        |profile, rates, premium| {
            let category = classify(profile);
            let base_rate = rates.get(RateKey::BaseRate(category))?;
            premium.set_base_rate(base_rate);
            Ok(())
        },
    )
}

/// Skipped for an unknown (zero) age. Adult drivers still get a zero entry.
pub fn age_factor_rule() -> Rule {
    Rule::new(
        AGE_FACTOR_RULE,
        |profile| profile.age() > 0,
        |profile, rates, premium| {
            let bracket = AgeBracket::for_age(profile.age());
            let factor = rates.get(RateKey::AgeFactor(bracket))?;
            let adjustment = premium.base_rate() * (factor - 1.0);
            premium.add_adjustment(AGE_FACTOR_LABEL, adjustment, bracket.explanation());
            Ok(())
        },
    )
}

/// A clean record adds nothing, even when the action is invoked directly.
pub fn accident_history_rule() -> Rule {
    Rule::new(
        ACCIDENT_HISTORY_RULE,
        |profile| profile.accidents_in_last_five_years() > 0,
        |profile, rates, premium| {
            let tier = AccidentTier::for_count(profile.accidents_in_last_five_years());
            let explanation = match tier {
                AccidentTier::Clean => return Ok(()),
                AccidentTier::Single => "Surcharge for 1 accident in past 5 years",
                AccidentTier::Multiple => "Major surcharge for 2+ accidents in past 5 years",
            };
            let surcharge = rates.get(RateKey::AccidentSurcharge(tier))?;
            premium.add_adjustment(ACCIDENT_HISTORY_LABEL, surcharge, explanation);
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::rates::VehicleCategory;

    fn profile(age: u32, accidents: u32) -> DriverProfile {
        DriverProfile::new(age, accidents, "Toyota", "Camry").expect("valid profile")
    }

    #[test]
    fn standard_rules_run_base_rate_first() {
        let names: Vec<_> = standard_rules()
            .iter()
            .map(|rule| rule.name().to_string())
            .collect();
        assert_eq!(names, [BASE_RATE_RULE, AGE_FACTOR_RULE, ACCIDENT_HISTORY_RULE]);
    }

    #[test]
    fn base_rate_rule_always_matches_and_sets_rate() {
        let rule = base_rate_rule();
        let driver = profile(0, 0);
        let mut premium = Premium::new();

        assert!(rule.matches(&driver));
        rule.apply(&driver, &RateTable::standard(), &mut premium)
            .expect("sedan rate present");

        assert_eq!(premium.base_rate(), 1000.0);
        assert!(premium.adjustments().is_empty());
    }

    #[test]
    fn age_rule_skips_unknown_age() {
        let rule = age_factor_rule();
        assert!(!rule.matches(&profile(0, 0)));
        assert!(rule.matches(&profile(17, 0)));
    }

    #[test]
    fn age_rule_scales_existing_base_rate() {
        let rule = age_factor_rule();
        let mut premium = Premium::new();
        premium.set_base_rate(1200.0);

        rule.apply(&profile(22, 0), &RateTable::standard(), &mut premium)
            .expect("age factor present");

        let adjustment = premium.adjustment(AGE_FACTOR_LABEL).expect("age adjustment");
        assert_eq!(adjustment.amount, 600.0);
        assert_eq!(adjustment.explanation, "Drivers 20-24 have moderately higher risk");
    }

    #[test]
    fn accident_rule_uses_tiered_surcharge() {
        let rule = accident_history_rule();
        assert!(!rule.matches(&profile(40, 0)));

        let mut premium = Premium::new();
        rule.apply(&profile(40, 1), &RateTable::standard(), &mut premium)
            .expect("single surcharge present");
        rule.apply(&profile(40, 4), &RateTable::standard(), &mut premium)
            .expect("multiple surcharge present");

        let amounts: Vec<_> = premium.adjustments().iter().map(|a| a.amount).collect();
        assert_eq!(amounts, [300.0, 600.0]);
        assert_eq!(
            premium.adjustments()[1].explanation,
            "Major surcharge for 2+ accidents in past 5 years"
        );
    }

    #[test]
    fn accident_rule_leaves_clean_record_untouched() {
        let rates = RateTable::from_entries([(RateKey::BaseRate(VehicleCategory::Sedan), 1000.0)]);
        let mut premium = Premium::new();

        accident_history_rule()
            .apply(&profile(40, 0), &rates, &mut premium)
            .expect("clean record needs no surcharge entry");

        assert!(premium.adjustments().is_empty());
    }

    #[test]
    fn actions_surface_missing_rates() {
        let rates = RateTable::from_entries([(RateKey::BaseRate(VehicleCategory::Suv), 1200.0)]);
        let mut premium = Premium::new();

        let err = base_rate_rule()
            .apply(&profile(30, 0), &rates, &mut premium)
            .expect_err("sedan rate absent");

        assert_eq!(err.key, RateKey::BaseRate(VehicleCategory::Sedan));
        assert_eq!(premium.base_rate(), 0.0);
    }
}
