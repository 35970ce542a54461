use std::io::Read;
use std::path::Path;

use super::profile::DriverProfile;

/// Read driver profiles from CSV with an `age,accidents,make,model` header.
///
/// Long-form headers (`accidents_in_last_five_years`, `vehicle_make`,
/// `vehicle_model`) are accepted too, and the accidents column may be left
/// out. Rows are validated like any other profile, so a blank make fails the
/// whole import.
pub fn read_profiles<R: Read>(reader: R) -> Result<Vec<DriverProfile>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<DriverProfile>().collect()
}

pub fn read_profiles_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DriverProfile>, csv::Error> {
    let file = std::fs::File::open(path)?;
    read_profiles(file)
}
