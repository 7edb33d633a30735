//! Endpoint functions related to tracks

use crate::client::*;
use crate::model::track::*;
use crate::model::SearchType;

pub struct Tracks<'a>(pub &'a Catalog);

impl Tracks<'_> {
    /// Track search with `null` entries dropped.
    pub async fn search(&self, term: &str, limit: Option<u16>) -> ClientResult<Vec<Track>> {
        let tracks = self
            .0
            .searches()
            .find(term, SearchType::Track, limit)
            .await?
            .tracks
            .items
            .into_iter()
            .flatten()
            .collect();
        Ok(tracks)
    }
}
