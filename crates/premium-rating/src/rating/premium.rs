use serde::Serialize;

/// Discrete, explained delta applied on top of the base rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub label: String,
    pub amount: f64,
    pub explanation: String,
}

/// Premium breakdown accumulated while the rating rules run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Premium {
    base_rate: f64,
    adjustments: Vec<Adjustment>,
}

impl Premium {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_rate(&self) -> f64 {
        self.base_rate
    }

    pub fn set_base_rate(&mut self, base_rate: f64) {
        self.base_rate = base_rate;
    }

    pub fn add_adjustment(
        &mut self,
        label: impl Into<String>,
        amount: f64,
        explanation: impl Into<String>,
    ) {
        self.adjustments.push(Adjustment {
            label: label.into(),
            amount,
            explanation: explanation.into(),
        });
    }

    /// Adjustments in the order the rules recorded them.
    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    pub fn adjustment(&self, label: &str) -> Option<&Adjustment> {
        self.adjustments
            .iter()
            .find(|adjustment| adjustment.label == label)
    }

    pub fn total(&self) -> f64 {
        self.base_rate
            + self
                .adjustments
                .iter()
                .map(|adjustment| adjustment.amount)
                .sum::<f64>()
    }
}
