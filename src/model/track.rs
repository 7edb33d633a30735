// Use 3rd party
use serde::{Deserialize, Serialize};

// Use local
use crate::model::album::Album;
use crate::model::artist::Artist;
use crate::model::ExternalUrls;

/// A single track entry as returned by catalog search.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<Artist>,
    pub album: Album,
    pub preview_url: Option<String>,
    pub popularity: u8,
    pub duration_ms: u32,
    pub explicit: bool,
    pub external_urls: ExternalUrls,
    pub uri: String,
}

impl Track {
    /// Previews are withheld for some tracks for licensing reasons, and the
    /// catalog reports that as either `null` or an empty string.
    pub fn has_preview(&self) -> bool {
        self.preview_url.as_deref().map_or(false, |url| !url.is_empty())
    }

    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|artist| artist.name.as_str())
    }

    pub fn artist_names(&self) -> impl Iterator<Item = &str> {
        self.artists.iter().map(|artist| artist.name.as_str())
    }
}
