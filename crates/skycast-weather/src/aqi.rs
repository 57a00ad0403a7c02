//! Air Quality Index levels and per-pollutant concentration bands.
//!
//! The provider reports a 1..=5 index; the band table below gives the
//! concentration ranges (μg/m³) that define each level per pollutant.

use crate::types::Pollutants;

/// AQI level, 1 (good) to 5 (very poor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

/// Pollutants with defined AQI bands. CO, NO and NH₃ readings exist in the
/// data but NO and NH₃ carry no band definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pollutant {
    So2,
    No2,
    Pm10,
    Pm2_5,
    O3,
    Co,
}

/// Band table: per level, the [lower, upper) concentration range for
/// (so2, no2, pm10, pm2_5, o3, co).
const BANDS: [[(f64, f64); 6]; 5] = [
    [
        (0.0, 20.0),
        (0.0, 40.0),
        (0.0, 20.0),
        (0.0, 10.0),
        (0.0, 60.0),
        (0.0, 4400.0),
    ],
    [
        (20.0, 80.0),
        (40.0, 70.0),
        (20.0, 50.0),
        (10.0, 25.0),
        (60.0, 100.0),
        (4400.0, 9400.0),
    ],
    [
        (80.0, 250.0),
        (70.0, 150.0),
        (50.0, 100.0),
        (25.0, 50.0),
        (100.0, 140.0),
        (9400.0, 12400.0),
    ],
    [
        (250.0, 350.0),
        (150.0, 200.0),
        (100.0, 200.0),
        (50.0, 75.0),
        (140.0, 180.0),
        (12400.0, 15400.0),
    ],
    [
        (350.0, f64::INFINITY),
        (200.0, f64::INFINITY),
        (200.0, f64::INFINITY),
        (75.0, f64::INFINITY),
        (180.0, f64::INFINITY),
        (15400.0, f64::INFINITY),
    ],
];

impl Pollutant {
    fn band_column(self) -> usize {
        match self {
            Pollutant::So2 => 0,
            Pollutant::No2 => 1,
            Pollutant::Pm10 => 2,
            Pollutant::Pm2_5 => 3,
            Pollutant::O3 => 4,
            Pollutant::Co => 5,
        }
    }

    /// Concentration for this pollutant in a components reading.
    pub fn concentration(self, components: &Pollutants) -> f64 {
        match self {
            Pollutant::So2 => components.so2,
            Pollutant::No2 => components.no2,
            Pollutant::Pm10 => components.pm10,
            Pollutant::Pm2_5 => components.pm2_5,
            Pollutant::O3 => components.o3,
            Pollutant::Co => components.co,
        }
    }
}

impl AqiLevel {
    const ALL: [AqiLevel; 5] = [
        AqiLevel::Good,
        AqiLevel::Fair,
        AqiLevel::Moderate,
        AqiLevel::Poor,
        AqiLevel::VeryPoor,
    ];

    /// Level for a provider index; `None` outside 1..=5.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(AqiLevel::Good),
            2 => Some(AqiLevel::Fair),
            3 => Some(AqiLevel::Moderate),
            4 => Some(AqiLevel::Poor),
            5 => Some(AqiLevel::VeryPoor),
            _ => None,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            AqiLevel::Good => 1,
            AqiLevel::Fair => 2,
            AqiLevel::Moderate => 3,
            AqiLevel::Poor => 4,
            AqiLevel::VeryPoor => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Fair => "Fair",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::Poor => "Poor",
            AqiLevel::VeryPoor => "Very Poor",
        }
    }

    /// Concentration range defining this level for a pollutant; the upper
    /// bound of the worst level is unbounded.
    pub fn range(self, pollutant: Pollutant) -> (f64, f64) {
        BANDS[(self.index() - 1) as usize][pollutant.band_column()]
    }

    /// Level whose band contains the given concentration.
    pub fn for_concentration(pollutant: Pollutant, concentration: f64) -> AqiLevel {
        for level in Self::ALL {
            let (_, upper) = level.range(pollutant);
            if concentration < upper {
                return level;
            }
        }
        AqiLevel::VeryPoor
    }
}
