//! Display-ready audio characteristics.
//!
//! The catalog reports proportions in `0.0..=1.0`; a [`FeatureSet`] carries
//! them as percentages so that charts can plot all seven on one axis.

// Use 3rd party
use serde::{Deserialize, Serialize};

// Use local
use crate::model::audio_features::AudioFeatures;

pub const DEFAULT_TEMPO: f64 = 120.0;
pub const DEFAULT_LOUDNESS: f64 = -5.0;
pub const DEFAULT_KEY: i8 = 0;
pub const DEFAULT_MODE: u8 = 1;
pub const DEFAULT_TIME_SIGNATURE: u8 = 4;

const PITCH_CLASSES: [&str; 12] = [
    "C", "C♯/D♭", "D", "D♯/E♭", "E", "F", "F♯/G♭", "G", "G♯/A♭", "A", "A♯/B♭", "B",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub danceability: f64,
    pub energy: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    /// Beats per minute.
    pub tempo: f64,
    /// Decibels, typically between -60 and 0.
    pub loudness: f64,
    /// Pitch class, 0 = C.
    pub key: i8,
    /// 0 = minor, 1 = major.
    pub mode: u8,
    pub time_signature: u8,
}

impl FeatureSet {
    /// Used wholesale whenever the catalog has no analysis for a track.
    pub const DEFAULT: FeatureSet = FeatureSet {
        danceability: 50.0,
        energy: 50.0,
        speechiness: 10.0,
        acousticness: 30.0,
        instrumentalness: 20.0,
        liveness: 15.0,
        valence: 50.0,
        tempo: DEFAULT_TEMPO,
        loudness: DEFAULT_LOUDNESS,
        key: DEFAULT_KEY,
        mode: DEFAULT_MODE,
        time_signature: DEFAULT_TIME_SIGNATURE,
    };

    /// Scales the proportions to percentages. Missing proportions count as
    /// zero, missing musical attributes take their individual defaults.
    pub fn from_audio_features(raw: &AudioFeatures) -> Self {
        Self {
            danceability: percentage(raw.danceability),
            energy: percentage(raw.energy),
            speechiness: percentage(raw.speechiness),
            acousticness: percentage(raw.acousticness),
            instrumentalness: percentage(raw.instrumentalness),
            liveness: percentage(raw.liveness),
            valence: percentage(raw.valence),
            tempo: raw.tempo.unwrap_or(DEFAULT_TEMPO),
            loudness: raw.loudness.unwrap_or(DEFAULT_LOUDNESS),
            key: raw.key.unwrap_or(DEFAULT_KEY),
            mode: raw.mode.unwrap_or(DEFAULT_MODE),
            time_signature: raw.time_signature.unwrap_or(DEFAULT_TIME_SIGNATURE),
        }
    }

    /// The seven percentage series in chart order.
    pub fn proportions(&self) -> [(&'static str, f64); 7] {
        [
            ("Danceability", self.danceability),
            ("Energy", self.energy),
            ("Speechiness", self.speechiness),
            ("Acousticness", self.acousticness),
            ("Instrumentalness", self.instrumentalness),
            ("Liveness", self.liveness),
            ("Valence", self.valence),
        ]
    }

    pub fn mode_label(&self) -> &'static str {
        if self.mode == 0 {
            "Minor"
        } else {
            "Major"
        }
    }

    pub fn key_label(&self) -> &'static str {
        usize::try_from(self.key)
            .ok()
            .and_then(|key| PITCH_CLASSES.get(key).copied())
            .unwrap_or("Unknown")
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn percentage(value: Option<f64>) -> f64 {
    (value.unwrap_or(0.0) * 100.0).clamp(0.0, 100.0)
}
