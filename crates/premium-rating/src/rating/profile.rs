use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidProfileError {
    #[error("vehicle make must not be empty")]
    EmptyVehicleMake,
    #[error("vehicle model must not be empty")]
    EmptyVehicleModel,
}

/// Driver and vehicle attributes read by the rating rules.
///
/// An age of zero means the age is unknown; such profiles skip the age factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DriverProfileInput")]
pub struct DriverProfile {
    age: u32,
    accidents_in_last_five_years: u32,
    vehicle_make: String,
    vehicle_model: String,
}

impl DriverProfile {
    pub fn new(
        age: u32,
        accidents_in_last_five_years: u32,
        vehicle_make: impl Into<String>,
        vehicle_model: impl Into<String>,
    ) -> Result<Self, InvalidProfileError> {
        let vehicle_make = trimmed(vehicle_make.into());
        let vehicle_model = trimmed(vehicle_model.into());

        if vehicle_make.is_empty() {
            return Err(InvalidProfileError::EmptyVehicleMake);
        }
        if vehicle_model.is_empty() {
            return Err(InvalidProfileError::EmptyVehicleModel);
        }

        Ok(Self {
            age,
            accidents_in_last_five_years,
            vehicle_make,
            vehicle_model,
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn accidents_in_last_five_years(&self) -> u32 {
        self.accidents_in_last_five_years
    }

    pub fn vehicle_make(&self) -> &str {
        &self.vehicle_make
    }

    pub fn vehicle_model(&self) -> &str {
        &self.vehicle_model
    }
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

/// Unvalidated profile as read from JSON bodies and CSV rows.
///
/// Short field names are accepted and a missing accident count reads as zero.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriverProfileInput {
    pub age: u32,
    #[serde(default, alias = "accidents")]
    pub accidents_in_last_five_years: u32,
    #[serde(alias = "make")]
    pub vehicle_make: String,
    #[serde(alias = "model")]
    pub vehicle_model: String,
}

impl TryFrom<DriverProfileInput> for DriverProfile {
    type Error = InvalidProfileError;

    fn try_from(input: DriverProfileInput) -> Result<Self, Self::Error> {
        DriverProfile::new(
            input.age,
            input.accidents_in_last_five_years,
            input.vehicle_make,
            input.vehicle_model,
        )
    }
}
