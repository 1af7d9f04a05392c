// src/core/biometrics/quantizer.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::minutiae::FingerTemplate;
use crate::utils::error::QuantizationError;

/// One discrete feature triple after grid quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuantizedMinutia {
    pub grid_x: i32,
    pub grid_y: i32,
    pub angle_bin: u32,
}

/// Canonical, deduplicated, sorted feature set for one finger.
///
/// Quantizing the same template twice yields the same value; the output
/// order never depends on the capture order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantizedFeatureSet {
    features: Vec<QuantizedMinutia>,
}

impl QuantizedFeatureSet {
    pub fn features(&self) -> &[QuantizedMinutia] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Normalize a raw capture into its canonical discrete feature set.
///
/// Positions map to `(floor(x/grid_size), floor(y/grid_size))`; angles are
/// folded into `[0, 360)` and binned into `angle_bins` equal sectors. When
/// several minutiae collapse onto one triple, the one whose angle sits
/// closest to the bin center survives (earlier capture wins remaining
/// ties), so sensor noise cannot inflate the feature set.
pub fn quantize(template: &FingerTemplate) -> Result<QuantizedFeatureSet, QuantizationError> {
    if template.grid_size <= 0.0
        || !template.grid_size.is_finite()
        || template.angle_bins == 0
    {
        return Err(QuantizationError::DegenerateGrid {
            grid_size: template.grid_size,
            angle_bins: template.angle_bins,
        });
    }
    if template.minutiae.is_empty() {
        return Err(QuantizationError::Empty);
    }

    let bin_width = 360.0 / f64::from(template.angle_bins);

    // Triple -> distance of the winning angle from the bin center.
    let mut survivors: HashMap<QuantizedMinutia, f64> = HashMap::new();

    for (index, minutia) in template.minutiae.iter().enumerate() {
        if !minutia.is_finite() {
            return Err(QuantizationError::NonFinite { index });
        }

        let grid_x = (minutia.x / template.grid_size).floor() as i32;
        let grid_y = (minutia.y / template.grid_size).floor() as i32;

        let angle = normalize_angle(minutia.angle);
        let mut angle_bin = (angle / bin_width) as u32;
        if angle_bin >= template.angle_bins {
            // Float rounding at the 360-degree seam.
            angle_bin = template.angle_bins - 1;
        }

        let triple = QuantizedMinutia {
            grid_x,
            grid_y,
            angle_bin,
        };

        let center = (f64::from(angle_bin) + 0.5) * bin_width;
        let distance = circular_distance(angle, center);

        match survivors.get(&triple) {
            Some(&best) if distance >= best => {}
            _ => {
                // First occupant, or strictly closer to the bin center.
                // `>=` above keeps the earlier minutia on exact ties.
                survivors.insert(triple, distance);
            }
        }
    }

    let mut features: Vec<QuantizedMinutia> = survivors.into_keys().collect();
    features.sort_unstable();

    Ok(QuantizedFeatureSet { features })
}

fn normalize_angle(angle: f64) -> f64 {
    let folded = angle % 360.0;
    if folded < 0.0 {
        folded + 360.0
    } else {
        folded
    }
}

fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    d.min(360.0 - d)
}
