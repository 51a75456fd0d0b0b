mod animation;
mod dataset;
mod price;
mod render;
mod selection;

pub use animation::*;
pub use dataset::*;
pub use price::*;
pub use render::*;
pub use selection::*;

/// One product row of the price file.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl PriceRecord {
    /// Builds a record, swapping the bounds if they arrive reversed.
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        Self {
            name: name.into(),
            min,
            max,
        }
    }
}

/// Chart tuning: geometry, easing speeds and axis scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ChartConfig {
    pub layout: ChartLayout,
    pub animation: AnimationConfig,
    pub scale: ScaleConfig,
}
