use liftbook_domain::{E1RMFormula, ReadError, SetDefaults, UpdateError, WeightUnit};
use serde::{Deserialize, Serialize};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, ReadError>;
    async fn set_settings(&self, settings: Settings) -> Result<(), UpdateError>;
}

/// Storage of the user settings.
///
/// Reading settings which were never written yields the defaults.
#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, ReadError>;
    async fn write_settings(&self, settings: Settings) -> Result<(), UpdateError>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    #[serde(with = "WeightUnitDef")]
    pub weight_unit: WeightUnit,
    #[serde(with = "E1RMFormulaDef")]
    pub e1rm_formula: E1RMFormula,
    /// Seconds, used for machines without a rest period of their own.
    pub default_rest_period: u32,
    pub show_e1rm: bool,
}

impl Settings {
    #[must_use]
    pub fn set_defaults(&self) -> SetDefaults {
        SetDefaults {
            weight_unit: self.weight_unit,
            rest_period: self.default_rest_period,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Kg,
            e1rm_formula: E1RMFormula::Brzycki,
            default_rest_period: 90,
            show_e1rm: true,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "WeightUnit")]
enum WeightUnitDef {
    #[serde(rename = "kg")]
    Kg,
    #[serde(rename = "lbs")]
    Lbs,
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "E1RMFormula")]
enum E1RMFormulaDef {
    #[serde(rename = "brzycki")]
    Brzycki,
    #[serde(rename = "epley")]
    Epley,
}
