use serde::{Deserialize, Serialize};

/// One entry of the static airport catalog. Identity is the IATA `code`;
/// records are never mutated after load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airport {
    pub region: String,
    pub location: String,
    pub name: String,
    pub code: String,
    pub disabled: bool,
}

impl Airport {
    pub fn id(&self) -> &str {
        &self.code
    }
}

/// Static airport catalog, loaded once from a bundled JSON document.
#[derive(Debug, Clone)]
pub struct AirportCatalog {
    airports: Vec<Airport>,
}

impl AirportCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let airports: Vec<Airport> = serde_json::from_str(json)?;
        Ok(Self { airports })
    }

    pub fn load(path: &std::path::Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Look up an airport by IATA code.
    pub fn find(&self, code: &str) -> Option<&Airport> {
        self.airports.iter().find(|a| a.code == code)
    }

    /// Airports selectable by the user (catalog entries can be disabled).
    pub fn enabled(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter().filter(|a| !a.disabled)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read airport catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode airport catalog: {0}")]
    Decode(#[from] serde_json::Error),
}
