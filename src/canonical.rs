// Use 3rd party
use serde::{Deserialize, Serialize};

// Use local
use crate::features::FeatureSet;
use crate::links::AlternativeLinks;
use crate::model::track::Track;

/// A resolved, display-ready track.
///
/// Only `album_image` and `preview_url` may be absent. Feature data and
/// alternative links are always attached, defaulted if need be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTrack {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub album_image: Option<String>,
    pub preview_url: Option<String>,
    pub popularity: u8,
    pub release_date: String,
    pub duration_ms: u32,
    pub external_url: String,
    pub uri: String,
    pub audio_features: FeatureSet,
    pub alternatives: AlternativeLinks,
}

impl CanonicalTrack {
    pub fn from_candidate(
        track: &Track,
        audio_features: FeatureSet,
        alternatives: AlternativeLinks,
    ) -> Self {
        Self {
            id: track.id.to_owned(),
            name: track.name.to_owned(),
            artist: track.primary_artist().unwrap_or_default().to_owned(),
            album: track.album.name.to_owned(),
            album_image: track.album.cover_url().map(str::to_owned),
            preview_url: track.preview_url.to_owned().filter(|url| !url.is_empty()),
            popularity: track.popularity,
            release_date: track.album.release_date.to_owned(),
            duration_ms: track.duration_ms,
            external_url: track.external_urls.spotify.to_owned().unwrap_or_default(),
            uri: track.uri.to_owned(),
            audio_features,
            alternatives,
        }
    }

    pub fn has_preview(&self) -> bool {
        self.preview_url.is_some()
    }

    /// Duration as `m:ss`.
    pub fn duration_label(&self) -> String {
        let seconds = self.duration_ms / 1000;
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }
}
