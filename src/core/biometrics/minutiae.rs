// src/core/biometrics/minutiae.rs
use serde::{Deserialize, Serialize};

/// One detected fingerprint ridge feature: position plus ridge orientation
/// in degrees. Immutable once captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Minutia {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

impl Minutia {
    pub fn new(x: f64, y: f64, angle: f64) -> Self {
        Self { x, y, angle }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.angle.is_finite()
    }
}

impl From<[f64; 3]> for Minutia {
    fn from(raw: [f64; 3]) -> Self {
        Self::new(raw[0], raw[1], raw[2])
    }
}

/// A single finger capture together with the quantization parameters it
/// will be discretized under. Consumed once per generate/reproduce call;
/// re-quantization produces a new value rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerTemplate {
    pub finger_id: String,
    pub minutiae: Vec<Minutia>,
    pub grid_size: f64,
    pub angle_bins: u32,
}

impl FingerTemplate {
    pub fn new(
        finger_id: impl Into<String>,
        minutiae: Vec<Minutia>,
        grid_size: f64,
        angle_bins: u32,
    ) -> Self {
        Self {
            finger_id: finger_id.into(),
            minutiae,
            grid_size,
            angle_bins,
        }
    }
}

/// Wire shape consumed from the external capture layer: one finger object
/// of the enrollment/verification JSON array, minutiae as `[x, y, angle]`
/// triples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerScan {
    pub finger_id: String,
    pub minutiae: Vec<[f64; 3]>,
}

impl FingerScan {
    /// Bind this scan to concrete quantization parameters.
    pub fn into_template(self, grid_size: f64, angle_bins: u32) -> FingerTemplate {
        let minutiae = self.minutiae.into_iter().map(Minutia::from).collect();
        FingerTemplate::new(self.finger_id, minutiae, grid_size, angle_bins)
    }
}
