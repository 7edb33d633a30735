pub mod audio_features;
pub mod search;
pub mod tracks;

use crate::client::Catalog;
use crate::endpoints::audio_features::*;
use crate::endpoints::search::*;
use crate::endpoints::tracks::*;

// Endpoint function namespaces

impl Catalog {
    pub const fn audio_features(&self) -> Features<'_> {
        Features(self)
    }

    pub const fn searches(&self) -> Search<'_> {
        Search(self)
    }

    pub const fn tracks(&self) -> Tracks<'_> {
        Tracks(self)
    }
}
