use serde::{Deserialize, Serialize};

/// Cabin classes offered by the pricing service. Used both as a request
/// parameter and as the filter key for fare-family extraction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CabinClass {
    #[serde(rename = "eco")]
    Economy,
    #[serde(rename = "ecoPremium")]
    EconomyPremium,
    Business,
    First,
}

impl CabinClass {
    pub const ALL: [CabinClass; 4] = [
        CabinClass::Economy,
        CabinClass::EconomyPremium,
        CabinClass::Business,
        CabinClass::First,
    ];

    /// Wire code expected by the pricing service.
    pub fn code(&self) -> &'static str {
        match self {
            CabinClass::Economy => "eco",
            CabinClass::EconomyPremium => "ecoPremium",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }
}

impl std::fmt::Display for CabinClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for CabinClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eco" | "economy" => Ok(CabinClass::Economy),
            "ecoPremium" | "economyPremium" => Ok(CabinClass::EconomyPremium),
            "business" => Ok(CabinClass::Business),
            "first" => Ok(CabinClass::First),
            other => Err(format!("unknown cabin class: {other}")),
        }
    }
}
