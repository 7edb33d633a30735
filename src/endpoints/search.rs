//! Endpoint functions related to search

use serde::Deserialize;
use std::collections::HashMap;

use crate::client::*;
use crate::model::track::Track;
use crate::model::SearchType;

pub const DEFAULT_LIMIT: u16 = 10;

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    pub tracks: Page<Option<Track>>,
}

pub struct Search<'a>(pub &'a Catalog);

impl Search<'_> {
    /// Runs a free-text query. Results keep the catalog's relevance order.
    pub async fn find(
        &self,
        term: &str,
        search_type: SearchType,
        limit: Option<u16>,
    ) -> ClientResult<SearchResults> {
        let url = "/search";
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let mut params: HashMap<String, String> = HashMap::new();
        params.insert("q".to_owned(), term.to_owned());
        params.insert("type".to_owned(), search_type.as_str().to_owned());
        params.insert("limit".to_owned(), limit.to_string());
        params.insert("market".to_owned(), self.0.market().to_owned());
        let result = self.0.get(url, &params).await?;
        Catalog::convert_result::<SearchResults>(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{catalog, mock_request, mock_request_success_from_file};
    use mockito::Matcher;

    #[tokio::test]
    async fn find() {
        let _mock = mock_request_success_from_file(
            "GET",
            "/search",
            vec![
                Matcher::UrlEncoded("q".into(), "yesterday".into()),
                Matcher::UrlEncoded("type".into(), "track".into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
                Matcher::UrlEncoded("market".into(), "US".into()),
            ],
            "tests/files/search_exact.json",
        );

        let result: SearchResults = catalog()
            .searches()
            .find("yesterday", SearchType::Track, None)
            .await
            .unwrap();

        assert_eq!(result.tracks.items.len(), 3);
    }

    #[tokio::test]
    async fn find_without_track_section() {
        let _mock = mock_request(
            "GET",
            "/search",
            vec![Matcher::UrlEncoded("type".into(), "album".into())],
            200,
            r#"{"albums": {"items": [], "total": 0}}"#,
        );

        let result: SearchResults = catalog()
            .searches()
            .find("yesterday", SearchType::Album, Some(5))
            .await
            .unwrap();

        assert!(result.tracks.items.is_empty());
    }
}
