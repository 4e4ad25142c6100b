use std::collections::HashMap;

use sizer::{RiskPercent, SizingInputs};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputUpdate {
    pub capital: Option<f64>,
    pub entry_price: Option<f64>,
    pub stop_price: Option<f64>,
    pub risk_percent: Option<RiskPercent>,
    pub margin_per_contract: Option<f64>,
}

impl InputUpdate {
    fn apply(self, inputs: &mut SizingInputs) {
        if let Some(capital) = self.capital {
            inputs.capital = capital;
        }
        if let Some(entry_price) = self.entry_price {
            inputs.entry_price = entry_price;
        }
        if let Some(stop_price) = self.stop_price {
            inputs.stop_price = stop_price;
        }
        if let Some(risk_percent) = self.risk_percent {
            inputs.risk_percent = risk_percent;
        }
        if let Some(margin_per_contract) = self.margin_per_contract {
            inputs.margin_per_contract = margin_per_contract;
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, SizingInputs>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A missing key is seeded with the full default record in one step,
    // never field by field.
    pub fn inputs(&mut self, session_key: &str) -> SizingInputs {
        *self
            .sessions
            .entry(session_key.to_owned())
            .or_insert_with(SizingInputs::default)
    }

    // Last write wins; only the fields named in the update change.
    pub fn update(&mut self, session_key: &str, update: InputUpdate) -> SizingInputs {
        let inputs = self
            .sessions
            .entry(session_key.to_owned())
            .or_insert_with(SizingInputs::default);
        update.apply(inputs);
        *inputs
    }
}
