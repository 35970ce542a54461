use crate::infra::{load_engine, quote, QuoteView};
use clap::Args;
use premium_rating::config::AppConfig;
use premium_rating::error::AppError;
use premium_rating::rating::{read_profiles_from_path, DriverProfile};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Driver age in years (0 when unknown)
    #[arg(long)]
    pub(crate) age: u32,
    /// Accidents in the last five years
    #[arg(long, default_value_t = 0)]
    pub(crate) accidents: u32,
    /// Vehicle make, e.g. Toyota
    #[arg(long)]
    pub(crate) make: String,
    /// Vehicle model, e.g. Camry
    #[arg(long)]
    pub(crate) model: String,
    /// Print the quote as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with an age,accidents,make,model header
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the quotes as a JSON array
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        age,
        accidents,
        make,
        model,
        json,
    } = args;

    let config = AppConfig::load()?;
    let engine = load_engine(&config.rating)?;
    let profile = DriverProfile::new(age, accidents, make, model)?;
    let view = quote(&engine, &profile)?;

    if json {
        println!("{}", to_json(&view)?);
    } else {
        print!("{}", render_quote(&view));
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { csv, json } = args;

    let config = AppConfig::load()?;
    let engine = load_engine(&config.rating)?;
    let profiles = read_profiles_from_path(csv)?;

    let views = profiles
        .iter()
        .map(|profile| quote(&engine, profile))
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        println!("{}", to_json(&views)?);
    } else {
        print!("{}", render_batch(&views));
    }

    Ok(())
}

pub(crate) fn run_rates() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let rates = config.rating.rate_table()?;

    println!("Rate table");
    for (key, value) in rates.entries() {
        println!("- {key}: {value:.2}");
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))
}

fn describe_driver(profile: &DriverProfile) -> String {
    let age = match profile.age() {
        0 => "age unknown".to_string(),
        age => format!("age {age}"),
    };
    format!(
        "{age}, {} accident(s) in the last 5 years",
        profile.accidents_in_last_five_years()
    )
}

pub(crate) fn render_quote(view: &QuoteView) -> String {
    let mut out = String::new();
    let profile = &view.profile;

    let _ = writeln!(out, "Premium quote");
    let _ = writeln!(out, "Driver: {}", describe_driver(profile));
    let _ = writeln!(
        out,
        "Vehicle: {} {} ({})",
        profile.vehicle_make(),
        profile.vehicle_model(),
        view.vehicle_category
    );
    let _ = writeln!(out, "Base rate: {:.2}", view.base_rate);

    if view.adjustments.is_empty() {
        let _ = writeln!(out, "Adjustments: none");
    } else {
        let _ = writeln!(out, "Adjustments");
        for adjustment in &view.adjustments {
            let _ = writeln!(
                out,
                "- {}: {:+.2} ({})",
                adjustment.label, adjustment.amount, adjustment.explanation
            );
        }
    }

    let _ = writeln!(out, "Total premium: {:.2}", view.total);
    out
}

pub(crate) fn render_batch(views: &[QuoteView]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Rated {} profile(s)", views.len());

    for (index, view) in views.iter().enumerate() {
        let profile = &view.profile;
        let _ = writeln!(
            out,
            "{}. {} {} | {} | {} | total {:.2}",
            index + 1,
            profile.vehicle_make(),
            profile.vehicle_model(),
            describe_driver(profile),
            view.vehicle_category,
            view.total
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use premium_rating::rating::RatingEngine;

    fn view(age: u32, accidents: u32, make: &str, model: &str) -> QuoteView {
        let profile = DriverProfile::new(age, accidents, make, model).expect("valid profile");
        quote(&RatingEngine::new(), &profile).expect("quote builds")
    }

    #[test]
    fn renders_breakdown_with_signed_amounts() {
        let rendered = render_quote(&view(18, 2, "Toyota", "Camry"));

        assert!(rendered.contains("Vehicle: Toyota Camry (sedan)"));
        assert!(rendered.contains("Base rate: 1000.00"));
        assert!(rendered
            .contains("- Age factor: +1000.00 (Drivers under 20 have higher statistical risk)"));
        assert!(rendered.contains(
            "- Accident history: +600.00 (Major surcharge for 2+ accidents in past 5 years)"
        ));
        assert!(rendered.ends_with("Total premium: 2600.00\n"));
    }

    #[test]
    fn renders_unknown_age_without_adjustments() {
        let rendered = render_quote(&view(0, 0, "Ford", "Explorer"));

        assert!(rendered.contains("Driver: age unknown, 0 accident(s) in the last 5 years"));
        assert!(rendered.contains("Adjustments: none"));
        assert!(rendered.contains("Total premium: 1200.00"));
    }

    #[test]
    fn renders_one_line_per_batch_entry() {
        let rendered = render_batch(&[
            view(18, 2, "Toyota", "Camry"),
            view(30, 0, "Ferrari", "F8"),
        ]);

        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "Rated 2 profile(s)");
        assert_eq!(
            lines[2],
            "2. Ferrari F8 | age 30, 0 accident(s) in the last 5 years | sports | total 1800.00"
        );
    }

    #[test]
    fn json_output_carries_total() {
        let rendered = to_json(&view(30, 1, "BMW", "X5")).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(value["vehicle_category"], "luxury");
        assert_eq!(value["total"], 1800.0);
    }
}
