use metrics_exporter_prometheus::PrometheusHandle;
use premium_rating::config::RatingConfig;
use premium_rating::error::AppError;
use premium_rating::rating::{
    classify, Adjustment, DriverProfile, Premium, RatingEngine, VehicleCategory,
};
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the engine over the configured rate table.
pub(crate) fn load_engine(config: &RatingConfig) -> Result<RatingEngine, AppError> {
    let rates = config.rate_table()?;
    let engine = RatingEngine::with_rates(rates);

    let rate_source = match &config.rate_table_path {
        Some(path) => path.display().to_string(),
        None => "standard".to_string(),
    };
    info!(
        rate_source = %rate_source,
        rate_entries = engine.rates().len(),
        rules = ?engine.rule_names(),
        "rating engine initialised"
    );

    Ok(engine)
}

/// Serializable quote shared by the HTTP and CLI surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct QuoteView {
    pub(crate) profile: DriverProfile,
    pub(crate) vehicle_category: VehicleCategory,
    pub(crate) base_rate: f64,
    pub(crate) adjustments: Vec<Adjustment>,
    pub(crate) total: f64,
}

impl QuoteView {
    pub(crate) fn new(profile: &DriverProfile, premium: &Premium) -> Self {
        Self {
            profile: profile.clone(),
            vehicle_category: classify(profile),
            base_rate: premium.base_rate(),
            adjustments: premium.adjustments().to_vec(),
            total: premium.total(),
        }
    }
}

pub(crate) fn quote(engine: &RatingEngine, profile: &DriverProfile) -> Result<QuoteView, AppError> {
    let premium = engine.calculate_premium(profile)?;
    Ok(QuoteView::new(profile, &premium))
}
