//! Listening options that do not depend on the catalog.

// Use 3rd party
use serde::{Deserialize, Serialize};

pub const EMBED_BASE_URL: &str = "https://open.spotify.com/embed/track";

/// Search links on other services, built from the user's own title and
/// artist text so they exist even when the catalog match is poor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeLinks {
    pub video_search: String,
    pub music_search: String,
    pub audio_search: String,
}

impl AlternativeLinks {
    #[must_use]
    pub fn new(title: &str, artist: &str) -> Self {
        let terms = format!("{} {}", title, artist);
        let encoded = encode_terms(&terms);
        let video_terms = format!("{} audio", terms);

        Self {
            video_search: format!(
                "https://www.youtube.com/results?search_query={}",
                encode_terms(&video_terms)
            ),
            music_search: format!("https://music.youtube.com/search?q={}", encoded),
            audio_search: format!("https://soundcloud.com/search?q={}", encoded),
        }
    }
}

/// Percent-encodes search terms, leaving `/` intact so names like "AC/DC"
/// stay readable.
fn encode_terms(terms: &str) -> String {
    urlencoding::encode(terms).replace("%2F", "/")
}

/// Player widget address for a catalog track id.
pub fn embed_url(id: &str) -> String {
    format!("{}/{}", EMBED_BASE_URL, urlencoding::encode(id))
}

/// Iframe markup for the embeddable player, for display layers that render
/// HTML when no preview clip exists.
pub fn embed_html(id: &str) -> String {
    format!(
        r#"<iframe src="{}" width="100%" height="152" frameborder="0" allowfullscreen="" allow="autoplay; clipboard-write; encrypted-media; fullscreen; picture-in-picture" loading="lazy" style="border-radius: 12px;"></iframe>"#,
        embed_url(id)
    )
}
