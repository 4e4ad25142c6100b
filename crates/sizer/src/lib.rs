pub mod instrument;
pub mod risk;
pub mod sizing;

pub use instrument::{Instrument, MICRO_NASDAQ};
pub use risk::RiskPercent;
pub use sizing::{compute, PositionSize, Sizing, SizingInputs};

pub fn module_ready() -> bool {
    true
}
