//! Local client state under the data directory.
//!
//! Layout mirrors what the server does not track for us:
//! `temp/searchresults.json` caches the last search so `add` can reference
//! result ids; `playlists/` holds user-saved song lists as JSON files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::song::Song;

pub(crate) struct Store {
    root: PathBuf,
}

impl Store {
    /// Open the data directory, creating the expected subdirectories.
    pub(crate) fn open(root: PathBuf) -> Result<Self> {
        for sub in ["temp", "playlists"] {
            let dir = root.join(sub);
            fs::create_dir_all(&dir).with_context(|| format!("create {:?}", dir))?;
        }
        Ok(Self { root })
    }

    fn results_path(&self) -> PathBuf {
        self.root.join("temp").join("searchresults.json")
    }

    pub(crate) fn save_results(&self, songs: &[Song]) -> Result<()> {
        let path = self.results_path();
        let json = serde_json::to_string(songs).context("encode search results")?;
        fs::write(&path, json).with_context(|| format!("write {:?}", path))
    }

    /// Cached songs from the last search or playlist listing, if any.
    pub(crate) fn load_results(&self) -> Result<Option<Vec<Song>>> {
        let path = self.results_path();
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path).with_context(|| format!("read {:?}", path))?;
        let songs =
            serde_json::from_str(&raw).with_context(|| format!("decode {:?}", path))?;
        Ok(Some(songs))
    }

    pub(crate) fn list_playlists(&self) -> Result<Vec<String>> {
        let dir = self.root.join("playlists");
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("list {:?}", dir))? {
            let entry = entry.with_context(|| format!("list {:?}", dir))?;
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        names.sort();
        Ok(names)
    }

    pub(crate) fn load_playlist(&self, name: &str) -> Result<Vec<Song>> {
        let path = self.root.join("playlists").join(name);
        let raw =
            fs::read_to_string(&path).with_context(|| format!("read playlist {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("decode playlist {:?}", path))
    }
}
