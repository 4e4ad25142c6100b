#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instrument {
    pub symbol: &'static str,
    pub point_value: f64,
}

pub const MICRO_NASDAQ: Instrument = Instrument {
    symbol: "MNQ",
    point_value: 2.0,
};

impl Default for Instrument {
    fn default() -> Self {
        MICRO_NASDAQ
    }
}
