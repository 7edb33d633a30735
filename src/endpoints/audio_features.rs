//! Endpoint functions related to audio features

use std::collections::HashMap;

use crate::client::*;
use crate::model::audio_features::*;

pub struct Features<'a>(pub &'a Catalog);

impl Features<'_> {
    /// Looks up the audio analysis for one track. `Ok(None)` means the catalog
    /// holds no analysis for that id.
    pub async fn get(&self, id: &str) -> ClientResult<Option<AudioFeatures>> {
        let url = "/audio-features";
        let mut params: HashMap<String, String> = HashMap::new();
        params.insert("ids".to_owned(), id.to_owned());
        let result = self.0.get(url, &params).await?;
        let features = Catalog::convert_result::<AudioFeaturesList>(&result)?
            .audio_features
            .into_iter()
            .next()
            .flatten();
        Ok(features)
    }
}
