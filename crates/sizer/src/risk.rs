#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskPercent {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl RiskPercent {
    pub const ALL: [RiskPercent; 5] = [
        RiskPercent::One,
        RiskPercent::Two,
        RiskPercent::Three,
        RiskPercent::Four,
        RiskPercent::Five,
    ];

    pub fn from_whole_percent(percent: u8) -> Option<Self> {
        match percent {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            _ => None,
        }
    }

    pub fn as_whole_percent(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    pub fn as_fraction(self) -> f64 {
        f64::from(self.as_whole_percent()) / 100.0
    }
}
