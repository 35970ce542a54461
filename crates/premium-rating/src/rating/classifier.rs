use super::profile::DriverProfile;
use super::rates::VehicleCategory;

const LUXURY_MAKES: [&str; 4] = ["bmw", "mercedes", "lexus", "audi"];
const SPORTS_MAKES: [&str; 3] = ["ferrari", "porsche", "corvette"];
const SPORTS_MODELS: [&str; 1] = ["mustang"];
const SUV_MODELS: [&str; 4] = ["suv", "explorer", "tahoe", "highlander"];

/// Map a profile's vehicle to its pricing category.
///
/// Checks run luxury, sports, suv in that order and the first hit wins, so a
/// luxury make is never priced as sports whatever the model.
pub fn classify(profile: &DriverProfile) -> VehicleCategory {
    let make = profile.vehicle_make();
    let model = profile.vehicle_model();

    if matches_any(make, &LUXURY_MAKES) {
        VehicleCategory::Luxury
    } else if matches_any(make, &SPORTS_MAKES) || matches_any(model, &SPORTS_MODELS) {
        VehicleCategory::Sports
    } else if matches_any(model, &SUV_MODELS) {
        VehicleCategory::Suv
    } else {
        VehicleCategory::Sedan
    }
}

fn matches_any(value: &str, candidates: &[&str]) -> bool {
    candidates
        .iter()
        .any(|candidate| value.eq_ignore_ascii_case(candidate))
}
