//! Tabular track listings to pick a `(title, artist)` pair from.
//!
//! A dataset is a CSV file with at least `artist` and `track_name` columns.
//! `album` and `popularity` are picked up when present; anything else is
//! ignored.

// Use 3rd party
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Use built-in library
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

pub const REQUIRED_COLUMNS: [&str; 2] = ["artist", "track_name"];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub artist: String,
    pub track_name: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub popularity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_tracks: usize,
    pub unique_artists: usize,
    pub average_popularity: Option<f64>,
    pub unique_albums: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
    has_album: bool,
    has_popularity: bool,
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DatasetError> {
        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS.iter() {
            if !headers.iter().any(|header| header == *column) {
                return Err(DatasetError::MissingColumn(*column));
            }
        }

        let rows = reader
            .deserialize::<DatasetRow>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows,
            has_album: headers.iter().any(|header| header == "album"),
            has_popularity: headers.iter().any(|header| header == "popularity"),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> &[DatasetRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Distinct artist names, sorted.
    pub fn artists(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.artist.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct track names for one artist, sorted.
    pub fn tracks_for(&self, artist: &str) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.artist == artist)
            .map(|row| row.track_name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn summary(&self) -> DatasetSummary {
        let average_popularity = if self.has_popularity {
            let values: Vec<f64> = self.rows.iter().filter_map(|row| row.popularity).collect();
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
        } else {
            None
        };

        let unique_albums = if self.has_album {
            Some(
                self.rows
                    .iter()
                    .filter_map(|row| row.album.as_deref())
                    .collect::<BTreeSet<_>>()
                    .len(),
            )
        } else {
            None
        };

        DatasetSummary {
            total_tracks: self.rows.len(),
            unique_artists: self.artists().len(),
            average_popularity,
            unique_albums,
        }
    }
}
