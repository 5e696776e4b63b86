use std::fmt;

use serde::{Deserialize, Serialize};

/// A song as the server reports it. Backend-specific fields (ids, stream
/// URLs, ...) are kept verbatim in `extra` so an enqueue can send back
/// exactly what a search returned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct Song {
    pub(crate) artist: String,
    pub(crate) title: String,
    pub(crate) album: String,
    #[serde(flatten)]
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.artist, self.title, self.album)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_artist_title_album() {
        let song: Song =
            serde_json::from_str(r#"{"artist":"A","title":"T","album":"L"}"#).unwrap();
        assert_eq!(song.to_string(), "A - T (L)");
    }

    #[test]
    fn extra_fields_survive_round_trip() {
        let raw = r#"{"artist":"A","title":"T","album":"L","songID":"x1","backend":"gmusic"}"#;
        let song: Song = serde_json::from_str(raw).unwrap();
        assert_eq!(song.extra.get("songID").unwrap(), "x1");

        let back: serde_json::Value = serde_json::to_value(&song).unwrap();
        assert_eq!(back["backend"], "gmusic");
        assert_eq!(back["artist"], "A");
    }
}
