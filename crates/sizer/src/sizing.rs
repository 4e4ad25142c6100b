use crate::instrument::Instrument;
use crate::risk::RiskPercent;

pub const MIN_CAPITAL: f64 = 1_000.0;
pub const MIN_PRICE: f64 = 0.0;
pub const MIN_MARGIN_PER_CONTRACT: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingInputs {
    pub capital: f64,
    pub entry_price: f64,
    pub stop_price: f64,
    pub risk_percent: RiskPercent,
    pub margin_per_contract: f64,
}

impl Default for SizingInputs {
    fn default() -> Self {
        Self {
            capital: 50_000.0,
            entry_price: 19_000.0,
            stop_price: 18_900.0,
            risk_percent: RiskPercent::Five,
            margin_per_contract: 1_500.0,
        }
    }
}

impl SizingInputs {
    // Floors belong to the input surface; compute never applies them.
    pub fn clamped(self) -> Self {
        Self {
            capital: self.capital.max(MIN_CAPITAL),
            entry_price: self.entry_price.max(MIN_PRICE),
            stop_price: self.stop_price.max(MIN_PRICE),
            risk_percent: self.risk_percent,
            margin_per_contract: self.margin_per_contract.max(MIN_MARGIN_PER_CONTRACT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSize {
    pub point_diff: f64,
    pub stop_percent: f64,
    pub risk_amount: f64,
    pub loss_per_contract: f64,
    pub max_contracts: u64,
    pub position_value: f64,
    pub leverage: f64,
    pub used_margin: f64,
    pub margin_leverage: f64,
}

impl PositionSize {
    pub fn is_viable(&self) -> bool {
        self.max_contracts > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    Degenerate,
    Sized(PositionSize),
}

pub fn compute(inputs: SizingInputs, instrument: Instrument) -> Sizing {
    let point_diff = (inputs.entry_price - inputs.stop_price).abs();
    let stop_percent = if inputs.entry_price > 0.0 {
        point_diff / inputs.entry_price
    } else {
        0.0
    };

    let risk_amount = inputs.capital * inputs.risk_percent.as_fraction();
    let loss_per_contract = point_diff * instrument.point_value;

    if loss_per_contract == 0.0 {
        return Sizing::Degenerate;
    }

    let max_contracts = (risk_amount / loss_per_contract).floor() as u64;
    let position_value = max_contracts as f64 * inputs.entry_price * instrument.point_value;
    let leverage = if inputs.capital > 0.0 {
        position_value / inputs.capital
    } else {
        0.0
    };
    let used_margin = max_contracts as f64 * inputs.margin_per_contract;
    let margin_leverage = if used_margin > 0.0 {
        position_value / used_margin
    } else {
        0.0
    };

    Sizing::Sized(PositionSize {
        point_diff,
        stop_percent,
        risk_amount,
        loss_per_contract,
        max_contracts,
        position_value,
        leverage,
        used_margin,
        margin_leverage,
    })
}
