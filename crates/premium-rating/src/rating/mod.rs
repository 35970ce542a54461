//! Rule-based premium rating.
//!
//! A [`RatingEngine`] owns a [`RateTable`] and an ordered list of [`Rule`]s.
//! Each call to [`RatingEngine::calculate_premium`] starts from an empty
//! [`Premium`] and lets every rule whose condition holds record its part of
//! the price, so the result carries its own explanation.

mod classifier;
mod engine;
mod import;
mod premium;
mod profile;
mod rates;
pub mod rules;

pub use classifier::classify;
pub use engine::RatingEngine;
pub use import::{read_profiles, read_profiles_from_path};
pub use premium::{Adjustment, Premium};
pub use profile::{DriverProfile, DriverProfileInput, InvalidProfileError};
pub use rates::{
    AccidentTier, AgeBracket, MissingRateError, RateKey, RateTable, RateTableError,
    UnknownRateKey, VehicleCategory,
};
pub use rules::Rule;
