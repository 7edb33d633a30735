// Use 3rd party
use serde::{Deserialize, Serialize};

// Use local
use crate::model::artist::Artist;
use crate::model::ExternalUrls;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub id: Option<String>,
    pub name: String,
    pub album_type: Option<String>,
    pub release_date: String,
    pub release_date_precision: Option<String>,
    pub total_tracks: Option<u16>,
    pub images: Vec<Image>,
    pub artists: Vec<Artist>,
    pub external_urls: ExternalUrls,
    pub uri: Option<String>,
}

impl Album {
    /// The catalog lists images largest first.
    pub fn cover_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }
}
