use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Vehicle categories priced by the base rate namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Sedan,
    Suv,
    Luxury,
    Sports,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 4] = [
        VehicleCategory::Sedan,
        VehicleCategory::Suv,
        VehicleCategory::Luxury,
        VehicleCategory::Sports,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleCategory::Sedan => "sedan",
            VehicleCategory::Suv => "suv",
            VehicleCategory::Luxury => "luxury",
            VehicleCategory::Sports => "sports",
        }
    }

    fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == value)
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Driver age bands carrying their own risk multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    Teen,
    YoungAdult,
    Adult,
    Senior,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 4] = [
        AgeBracket::Teen,
        AgeBracket::YoungAdult,
        AgeBracket::Adult,
        AgeBracket::Senior,
    ];

    /// Ages below 16 still fall in the youngest bracket.
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=19 => AgeBracket::Teen,
            20..=24 => AgeBracket::YoungAdult,
            25..=65 => AgeBracket::Adult,
            _ => AgeBracket::Senior,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AgeBracket::Teen => "16-19",
            AgeBracket::YoungAdult => "20-24",
            AgeBracket::Adult => "25-65",
            AgeBracket::Senior => "66+",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            AgeBracket::Teen => "Drivers under 20 have higher statistical risk",
            AgeBracket::YoungAdult => "Drivers 20-24 have moderately higher risk",
            AgeBracket::Adult => "Standard rate for drivers 25-65",
            AgeBracket::Senior => "Slight increase for senior drivers",
        }
    }

    fn from_key(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bracket| bracket.key() == value)
    }
}

/// Accident history tiers over the five year lookback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccidentTier {
    Clean,
    Single,
    Multiple,
}

impl AccidentTier {
    pub const ALL: [AccidentTier; 3] = [
        AccidentTier::Clean,
        AccidentTier::Single,
        AccidentTier::Multiple,
    ];

    pub fn for_count(accidents: u32) -> Self {
        match accidents {
            0 => AccidentTier::Clean,
            1 => AccidentTier::Single,
            _ => AccidentTier::Multiple,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AccidentTier::Clean => "0",
            AccidentTier::Single => "1",
            AccidentTier::Multiple => "2+",
        }
    }

    fn from_key(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.key() == value)
    }
}

/// Typed address of a rate table entry.
///
/// Renders to and parses from the dot-namespaced form used in rate table
/// files, e.g. `baseRate.sedan`, `ageFactor.20-24` or `accidentSurcharge.2+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RateKey {
    BaseRate(VehicleCategory),
    AgeFactor(AgeBracket),
    AccidentSurcharge(AccidentTier),
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateKey::BaseRate(category) => write!(f, "baseRate.{}", category.label()),
            RateKey::AgeFactor(bracket) => write!(f, "ageFactor.{}", bracket.key()),
            RateKey::AccidentSurcharge(tier) => write!(f, "accidentSurcharge.{}", tier.key()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rate table key '{0}'")]
pub struct UnknownRateKey(pub String);

impl FromStr for RateKey {
    type Err = UnknownRateKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownRateKey(raw.to_string());
        let (namespace, member) = raw.trim().split_once('.').ok_or_else(unknown)?;

        let key = match namespace {
            "baseRate" => VehicleCategory::from_label(member).map(RateKey::BaseRate),
            "ageFactor" => AgeBracket::from_key(member).map(RateKey::AgeFactor),
            "accidentSurcharge" => AccidentTier::from_key(member).map(RateKey::AccidentSurcharge),
            _ => None,
        };

        key.ok_or_else(unknown)
    }
}

/// A rule asked for a rate the table does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("missing rate table entry '{key}'")]
pub struct MissingRateError {
    pub key: RateKey,
}

#[derive(Debug, thiserror::Error)]
pub enum RateTableError {
    #[error("failed to read rate table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rate table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownKey(#[from] UnknownRateKey),
    #[error("rate table entry '{0}' is defined more than once")]
    DuplicateKey(RateKey),
}

/// JSON object entries in file order, duplicates included.
struct RawRateEntries(Vec<(String, f64)>);

impl<'de> Deserialize<'de> for RawRateEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawRateEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping rate keys to numbers")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, f64>()? {
                    entries.push(entry);
                }
                Ok(RawRateEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Immutable lookup of base rates, age multipliers and accident surcharges.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    entries: BTreeMap<RateKey, f64>,
}

impl RateTable {
    /// The published rate card.
    pub fn standard() -> Self {
        Self::from_entries([
            (RateKey::BaseRate(VehicleCategory::Sedan), 1000.0),
            (RateKey::BaseRate(VehicleCategory::Suv), 1200.0),
            (RateKey::BaseRate(VehicleCategory::Luxury), 1500.0),
            (RateKey::BaseRate(VehicleCategory::Sports), 1800.0),
            (RateKey::AgeFactor(AgeBracket::Teen), 2.0),
            (RateKey::AgeFactor(AgeBracket::YoungAdult), 1.5),
            (RateKey::AgeFactor(AgeBracket::Adult), 1.0),
            (RateKey::AgeFactor(AgeBracket::Senior), 1.3),
            (RateKey::AccidentSurcharge(AccidentTier::Clean), 0.0),
            (RateKey::AccidentSurcharge(AccidentTier::Single), 300.0),
            (RateKey::AccidentSurcharge(AccidentTier::Multiple), 600.0),
        ])
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (RateKey, f64)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Load a table from a JSON object mapping dot-namespaced keys to numbers.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RateTableError> {
        let RawRateEntries(raw) = serde_json::from_reader(reader)?;
        let mut entries = BTreeMap::new();
        for (key, value) in raw {
            let key = key.parse::<RateKey>()?;
            if entries.insert(key, value).is_some() {
                return Err(RateTableError::DuplicateKey(key));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RateTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn get(&self, key: RateKey) -> Result<f64, MissingRateError> {
        self.entries
            .get(&key)
            .copied()
            .ok_or(MissingRateError { key })
    }

    pub fn entries(&self) -> impl Iterator<Item = (RateKey, f64)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
