// Use 3rd party
use serde::{Deserialize, Serialize};

/// Raw audio analysis for a track. Proportions are reported in `0.0..=1.0`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioFeatures {
    pub id: Option<String>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub speechiness: Option<f64>,
    pub acousticness: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub liveness: Option<f64>,
    pub valence: Option<f64>,
    pub tempo: Option<f64>,
    pub loudness: Option<f64>,
    pub key: Option<i8>,
    pub mode: Option<u8>,
    pub time_signature: Option<u8>,
    pub duration_ms: Option<u32>,
}

impl AudioFeatures {
    /// True when the record carries no measurement at all.
    pub fn is_empty(&self) -> bool {
        self.danceability.is_none()
            && self.energy.is_none()
            && self.speechiness.is_none()
            && self.acousticness.is_none()
            && self.instrumentalness.is_none()
            && self.liveness.is_none()
            && self.valence.is_none()
            && self.tempo.is_none()
            && self.loudness.is_none()
            && self.key.is_none()
            && self.mode.is_none()
            && self.time_signature.is_none()
    }
}

#[derive(Default, Debug, Deserialize)]
pub struct AudioFeaturesList {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeatures>>,
}
