//! Track resolution.
//!
//! A free-text `(title, artist)` pair, usually picked from a spreadsheet of
//! messy real-world data, is mapped onto one catalog track:
//!
//! 1. Three progressively looser queries are tried in order. The first query
//!    that returns anything wins, even if a looser one might find a better
//!    match.
//! 2. Within that result set the candidate is picked by a prioritized chain:
//!    name match with a preview, then any preview, then the first result.
//! 3. The pick is turned into a [`CanonicalTrack`] with feature data and
//!    alternative links attached.
//!
//! Only an unavailable client or empty result sets on every tier stop a
//! resolution. Everything else degrades into defaults plus at most one
//! advisory message.

// Use 3rd party
use log::{error, info, warn};
use serde::Serialize;
use thiserror::Error;

// Use local
use crate::canonical::CanonicalTrack;
use crate::client::{Catalog, ClientError, ClientResult};
use crate::config::CatalogConfig;
use crate::features::FeatureSet;
use crate::links::AlternativeLinks;
use crate::model::track::Track;

pub const SEARCH_LIMIT: u16 = 10;

pub const PREVIEW_UNAVAILABLE: &str =
    "Preview not available. Alternative listening options provided below.";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to initialize catalog client. Please check your credentials. ({0})")]
    ClientUnavailable(#[source] ClientError),
    #[error("Track '{title}' by '{artist}' not found in the catalog.")]
    NotFound { title: String, artist: String },
    #[error("An error occurred: {0}")]
    Client(#[from] ClientError),
}

/// One of the search strategies, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTier {
    /// Constrains both the track and the artist field.
    FieldFiltered,
    TitleAndArtist,
    TitleOnly,
}

impl SearchTier {
    pub const ORDER: [SearchTier; 3] = [
        SearchTier::FieldFiltered,
        SearchTier::TitleAndArtist,
        SearchTier::TitleOnly,
    ];

    pub fn query(&self, title: &str, artist: &str) -> String {
        match self {
            Self::FieldFiltered => format!(r#"track:"{}" artist:"{}""#, title, artist),
            Self::TitleAndArtist => format!("{} {}", title, artist),
            Self::TitleOnly => title.to_owned(),
        }
    }
}

/// Which selection pass picked the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchQuality {
    /// Title and artist matched and a preview exists.
    Exact,
    /// Weaker name match, but a preview exists.
    PreviewOnly,
    /// First result of the set, nothing else qualified.
    FirstResult,
}

impl MatchQuality {
    pub fn is_degraded(&self) -> bool {
        *self != Self::Exact
    }
}

type Predicate = fn(&Track, &str, &str) -> bool;

const SELECTION_PASSES: [(MatchQuality, Predicate); 3] = [
    (MatchQuality::Exact, is_exact_match),
    (MatchQuality::PreviewOnly, has_preview),
    (MatchQuality::FirstResult, any_track),
];

fn is_exact_match(track: &Track, title: &str, artist: &str) -> bool {
    let title = title.to_lowercase();
    let artist = artist.to_lowercase();
    let artist_match = track
        .artist_names()
        .any(|name| name.to_lowercase().contains(&artist));
    let title_match = track.name.to_lowercase().contains(&title);
    artist_match && title_match && track.has_preview()
}

fn has_preview(track: &Track, _title: &str, _artist: &str) -> bool {
    track.has_preview()
}

fn any_track(_track: &Track, _title: &str, _artist: &str) -> bool {
    true
}

/// Picks one candidate from a result set, scanning in the catalog's order
/// once per pass. Returns `None` only for an empty set.
pub fn select_candidate<'a>(
    candidates: &'a [Track],
    title: &str,
    artist: &str,
) -> Option<(&'a Track, MatchQuality)> {
    SELECTION_PASSES.iter().find_map(|(quality, predicate)| {
        candidates
            .iter()
            .find(|track| predicate(*track, title, artist))
            .map(|track| (track, *quality))
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub track: CanonicalTrack,
    pub advisory: Option<String>,
    pub tier: SearchTier,
    pub quality: MatchQuality,
}

impl Resolution {
    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }
}

/// Flattens a resolution outcome into `(record, message)`, where the message
/// is the advisory on success and the failure reason otherwise.
pub fn into_outcome(
    result: Result<Resolution, ResolveError>,
) -> (Option<CanonicalTrack>, Option<String>) {
    match result {
        Ok(resolution) => (Some(resolution.track), resolution.advisory),
        Err(err) => (None, Some(err.to_string())),
    }
}

pub struct Resolver {
    config: CatalogConfig,
}

impl Resolver {
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Resolves one pair on a fresh catalog session. The session is dropped
    /// when the call returns.
    pub async fn resolve(&self, title: &str, artist: &str) -> Result<Resolution, ResolveError> {
        let catalog = Catalog::connect(&self.config).await.map_err(|err| {
            error!("Error initializing catalog client: {}", err);
            ResolveError::ClientUnavailable(err)
        })?;
        info!("Catalog client initialized successfully");
        resolve_with(&catalog, title, artist).await
    }
}

/// Resolves one pair on an existing session.
pub async fn resolve_with(
    catalog: &Catalog,
    title: &str,
    artist: &str,
) -> Result<Resolution, ResolveError> {
    let (candidate, tier, quality) = search_tiers(catalog, title, artist)
        .await
        .map_err(|err| {
            error!("Error searching for '{}' by '{}': {}", title, artist, err);
            ResolveError::from(err)
        })?
        .ok_or_else(|| ResolveError::NotFound {
            title: title.to_owned(),
            artist: artist.to_owned(),
        })?;

    let audio_features = fetch_feature_set(catalog, &candidate.id).await;
    let alternatives = AlternativeLinks::new(title, artist);
    let track = CanonicalTrack::from_candidate(&candidate, audio_features, alternatives);
    info!("Complete track data retrieved for {}", track.id);

    let advisory = if track.has_preview() {
        None
    } else {
        Some(PREVIEW_UNAVAILABLE.to_owned())
    };

    Ok(Resolution {
        track,
        advisory,
        tier,
        quality,
    })
}

async fn search_tiers(
    catalog: &Catalog,
    title: &str,
    artist: &str,
) -> ClientResult<Option<(Track, SearchTier, MatchQuality)>> {
    for tier in SearchTier::ORDER.iter() {
        let query = tier.query(title, artist);
        info!("Searching with query: {}", query);
        let candidates = catalog.tracks().search(&query, Some(SEARCH_LIMIT)).await?;

        if let Some((candidate, quality)) = select_candidate(&candidates, title, artist) {
            match quality {
                MatchQuality::Exact => info!("Found exact match with preview: {}", candidate.name),
                MatchQuality::PreviewOnly => info!("Found track with preview: {}", candidate.name),
                MatchQuality::FirstResult => {
                    warn!("No preview available, returning: {}", candidate.name)
                }
            }
            return Ok(Some((candidate.to_owned(), *tier, quality)));
        }
    }
    Ok(None)
}

async fn fetch_feature_set(catalog: &Catalog, id: &str) -> FeatureSet {
    info!("Fetching audio features for track ID: {}", id);
    match catalog.audio_features().get(id).await {
        Ok(Some(raw)) if !raw.is_empty() => {
            info!("Audio features retrieved successfully");
            FeatureSet::from_audio_features(&raw)
        }
        Ok(_) => {
            warn!("No audio features found, using defaults");
            FeatureSet::DEFAULT
        }
        Err(err) => {
            error!("Error getting audio features: {}", err);
            FeatureSet::DEFAULT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{catalog, config, mock_request, mock_request_success_from_file};
    use crate::model::artist::Artist;
    use mockito::{mock, Matcher};

    const TITLE: &str = "Yesterday";
    const ARTIST: &str = "The Beatles";

    fn candidate(id: &str, name: &str, artist: &str, preview: Option<&str>) -> Track {
        Track {
            id: id.to_owned(),
            name: name.to_owned(),
            artists: vec![Artist {
                name: artist.to_owned(),
                ..Default::default()
            }],
            preview_url: preview.map(str::to_owned),
            ..Default::default()
        }
    }

    fn search_query(query: &str) -> Vec<Matcher> {
        vec![
            Matcher::UrlEncoded("q".into(), query.into()),
            Matcher::UrlEncoded("type".into(), "track".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("market".into(), "US".into()),
        ]
    }

    fn mock_search(query: &str, file_path: &str) -> mockito::Mock {
        mock_request_success_from_file("GET", "/search", search_query(query), file_path)
    }

    fn mock_features(id: &str, file_path: &str) -> mockito::Mock {
        mock_request_success_from_file(
            "GET",
            "/audio-features",
            vec![Matcher::UrlEncoded("ids".into(), id.into())],
            file_path,
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn tier_queries() {
        assert_eq!(
            SearchTier::FieldFiltered.query(TITLE, ARTIST),
            r#"track:"Yesterday" artist:"The Beatles""#
        );
        assert_eq!(SearchTier::TitleAndArtist.query(TITLE, ARTIST), "Yesterday The Beatles");
        assert_eq!(SearchTier::TitleOnly.query(TITLE, ARTIST), "Yesterday");
    }

    #[test]
    fn select_exact_match_ignores_case() {
        let candidates = vec![
            candidate("a", "Yesterday", "Boyz II Men", Some("https://p/a")),
            candidate("b", "YESTERDAY - Remastered", "the beatles", Some("https://p/b")),
        ];

        let (track, quality) = select_candidate(&candidates, TITLE, ARTIST).unwrap();
        assert_eq!(track.id, "b");
        assert_eq!(quality, MatchQuality::Exact);
        assert!(!quality.is_degraded());
    }

    #[test]
    fn select_matches_any_contributing_artist() {
        let mut duet = candidate("a", "Yesterday", "Someone", Some("https://p/a"));
        duet.artists.push(Artist {
            name: "The Beatles".to_owned(),
            ..Default::default()
        });
        let candidates = vec![duet];

        let (track, quality) = select_candidate(&candidates, TITLE, ARTIST).unwrap();
        assert_eq!(track.id, "a");
        assert_eq!(quality, MatchQuality::Exact);
    }

    #[test]
    fn select_prefers_any_preview_over_exact_without_preview() {
        let candidates = vec![
            candidate("a", "Yesterday", "The Beatles", None),
            candidate("b", "Something Else", "Another Band", Some("https://p/b")),
            candidate("c", "Yesterday Once More", "Carpenters", Some("https://p/c")),
        ];

        let (track, quality) = select_candidate(&candidates, TITLE, ARTIST).unwrap();
        assert_eq!(track.id, "b");
        assert_eq!(quality, MatchQuality::PreviewOnly);
        assert!(quality.is_degraded());
    }

    #[test]
    fn select_falls_back_to_first_result() {
        let candidates = vec![
            candidate("a", "Unrelated", "Nobody", None),
            candidate("b", "Yesterday", "The Beatles", Some("")),
        ];

        let (track, quality) = select_candidate(&candidates, TITLE, ARTIST).unwrap();
        assert_eq!(track.id, "a");
        assert_eq!(quality, MatchQuality::FirstResult);
    }

    #[test]
    fn select_from_empty_set() {
        assert!(select_candidate(&[], TITLE, ARTIST).is_none());
    }

    #[test]
    fn outcome_of_failure_names_the_track() {
        let result = Err(ResolveError::NotFound {
            title: TITLE.to_owned(),
            artist: ARTIST.to_owned(),
        });
        let (record, message) = into_outcome(result);
        assert!(record.is_none());
        assert_eq!(
            message.unwrap(),
            "Track 'Yesterday' by 'The Beatles' not found in the catalog."
        );
    }

    #[tokio::test]
    async fn resolve_exact_match_on_first_tier() {
        let _search = mock_search(r#"track:"Yesterday" artist:"The Beatles""#, "tests/files/search_exact.json");
        let _features = mock_features("3BQHpFgAp4l80e1XslIjNI", "tests/files/audio_features.json");

        let resolution = resolve_with(&catalog(), TITLE, ARTIST).await.unwrap();

        assert_eq!(resolution.track.id, "3BQHpFgAp4l80e1XslIjNI");
        assert_eq!(resolution.track.name, "Yesterday - Remastered 2009");
        assert_eq!(resolution.track.artist, "The Beatles");
        assert_eq!(resolution.track.album_image.as_deref(), Some("https://i.scdn.co/image/help-640"));
        assert_eq!(resolution.tier, SearchTier::FieldFiltered);
        assert_eq!(resolution.quality, MatchQuality::Exact);
        assert_eq!(resolution.advisory(), None);

        let features = resolution.track.audio_features;
        assert_close(features.danceability, 33.2);
        assert_close(features.acousticness, 87.9);
        assert_close(features.tempo, 96.529);
        assert_eq!(features.key, 5);
        assert_eq!(features.time_signature, 3);
        assert_eq!(resolution.track.alternatives, AlternativeLinks::new(TITLE, ARTIST));
    }

    #[tokio::test]
    async fn resolve_prefers_preview_in_same_result_set() {
        let _search = mock_search(r#"track:"Yesterday" artist:"The Beatles""#, "tests/files/search_preview_fallback.json");
        let _features = mock_features("7tribute00000000000001", "tests/files/audio_features_partial.json");

        let resolution = resolve_with(&catalog(), TITLE, ARTIST).await.unwrap();

        assert_eq!(resolution.track.id, "7tribute00000000000001");
        assert_eq!(resolution.quality, MatchQuality::PreviewOnly);
        assert_eq!(resolution.track.album_image, None);
        assert_eq!(resolution.advisory(), None);

        let features = resolution.track.audio_features;
        assert_close(features.energy, 80.0);
        assert_close(features.loudness, -7.5);
        assert_close(features.tempo, 120.0);
        assert_eq!(features.key, 0);
        assert_eq!(features.mode, 1);
        assert_eq!(features.time_signature, 4);
    }

    #[tokio::test]
    async fn resolve_stops_at_first_non_empty_tier() {
        let _field = mock_search(r#"track:"Obscure Song" artist:"Someone Else""#, "tests/files/search_empty.json");
        let _combined = mock_search("Obscure Song Someone Else", "tests/files/search_no_previews.json");
        let title_only = mock("GET", "/search")
            .match_query(Matcher::AllOf(search_query("Obscure Song")))
            .with_status(200)
            .with_body_from_file("tests/files/search_exact.json")
            .expect(0)
            .create();
        let _features = mock_features("5nopreview000000000001", "tests/files/audio_features_empty.json");

        let resolution = resolve_with(&catalog(), "Obscure Song", "Someone Else")
            .await
            .unwrap();

        title_only.assert();
        assert_eq!(resolution.track.id, "5nopreview000000000001");
        assert_eq!(resolution.tier, SearchTier::TitleAndArtist);
        assert_eq!(resolution.quality, MatchQuality::FirstResult);
        assert_eq!(resolution.track.preview_url, None);
        assert_eq!(resolution.advisory(), Some(PREVIEW_UNAVAILABLE));
        assert_eq!(resolution.track.audio_features, FeatureSet::DEFAULT);
        assert_eq!(
            resolution.track.alternatives.music_search,
            "https://music.youtube.com/search?q=Obscure%20Song%20Someone%20Else"
        );
    }

    #[tokio::test]
    async fn resolve_not_found_after_all_tiers() {
        let field = mock_search(r#"track:"Nope" artist:"Nobody""#, "tests/files/search_empty.json");
        let combined = mock_search("Nope Nobody", "tests/files/search_empty.json");
        let title_only = mock_search("Nope", "tests/files/search_empty.json");

        let result = resolve_with(&catalog(), "Nope", "Nobody").await;

        field.assert();
        combined.assert();
        title_only.assert();
        match result {
            Err(err @ ResolveError::NotFound { .. }) => {
                let message = err.to_string();
                assert!(message.contains("Nope"));
                assert!(message.contains("Nobody"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn resolve_reports_search_failure() {
        let _search = mock_request("GET", "/search", search_query(r#"track:"Yesterday" artist:"The Beatles""#), 500, "");

        let result = resolve_with(&catalog(), TITLE, ARTIST).await;

        match result {
            Err(err @ ResolveError::Client(_)) => {
                assert!(err.to_string().starts_with("An error occurred: status code: 500"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn resolve_defaults_features_on_lookup_failure() {
        let _search = mock_search(r#"track:"Yesterday" artist:"The Beatles""#, "tests/files/search_exact.json");
        let _features = mock_request("GET", "/audio-features", vec![], 500, "");

        let resolution = resolve_with(&catalog(), TITLE, ARTIST).await.unwrap();

        assert_eq!(resolution.track.id, "3BQHpFgAp4l80e1XslIjNI");
        assert_eq!(resolution.track.audio_features, FeatureSet::DEFAULT);
        assert_eq!(resolution.advisory(), None);
    }

    #[tokio::test]
    async fn resolve_defaults_features_for_record_without_measurements() {
        let _search = mock_search(r#"track:"Yesterday" artist:"The Beatles""#, "tests/files/search_exact.json");
        let _features = mock_request(
            "GET",
            "/audio-features",
            vec![Matcher::UrlEncoded("ids".into(), "3BQHpFgAp4l80e1XslIjNI".into())],
            200,
            r#"{"audio_features": [{"id": "3BQHpFgAp4l80e1XslIjNI"}]}"#,
        );

        let resolution = resolve_with(&catalog(), TITLE, ARTIST).await.unwrap();

        assert_eq!(resolution.track.audio_features, FeatureSet::DEFAULT);
    }

    #[tokio::test]
    async fn resolve_is_repeatable() {
        let _search = mock_search(r#"track:"Yesterday" artist:"The Beatles""#, "tests/files/search_exact.json");
        let _features = mock_features("3BQHpFgAp4l80e1XslIjNI", "tests/files/audio_features.json");

        let first = resolve_with(&catalog(), TITLE, ARTIST).await.unwrap();
        let second = resolve_with(&catalog(), TITLE, ARTIST).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn resolver_uses_fresh_session() {
        let token = mock("POST", "/api/token")
            .with_status(200)
            .with_body_from_file("tests/files/token.json")
            .expect(2)
            .create();
        let _search = mock_search(r#"track:"Yesterday" artist:"The Beatles""#, "tests/files/search_exact.json");
        let _features = mock_features("3BQHpFgAp4l80e1XslIjNI", "tests/files/audio_features.json");

        let resolver = Resolver::new(config());
        let first = resolver.resolve(TITLE, ARTIST).await.unwrap();
        let (record, advisory) = into_outcome(resolver.resolve(TITLE, ARTIST).await);

        token.assert();
        assert_eq!(Some(first.track), record);
        assert_eq!(advisory, None);
    }

    #[tokio::test]
    async fn resolver_client_unavailable() {
        let _token = mock("POST", "/api/token")
            .with_status(401)
            .with_body(r#"{"error": "invalid_client", "error_description": "Invalid client"}"#)
            .create();

        let resolver = Resolver::new(config());
        let result = resolver.resolve(TITLE, ARTIST).await;

        match result {
            Err(err @ ResolveError::ClientUnavailable(_)) => {
                assert!(err.to_string().contains("invalid_client: Invalid client"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn resolver_without_credentials() {
        let resolver = Resolver::new(config_without_credentials());
        let (record, message) = into_outcome(resolver.resolve(TITLE, ARTIST).await);

        assert!(record.is_none());
        assert!(message.unwrap().starts_with("Failed to initialize catalog client"));
    }

    fn config_without_credentials() -> CatalogConfig {
        CatalogConfig::new("", "")
            .api_url(&mockito::server_url())
            .accounts_url(&mockito::server_url())
    }
}
