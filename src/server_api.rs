use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::song::Song;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    terms: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BackendResults {
    pub(crate) songs: Vec<Song>,
}

#[derive(Debug, Serialize)]
struct EnqueueRequest<'a> {
    song: &'a Song,
}

#[derive(Debug, Serialize)]
struct PlayctlRequest<'a> {
    action: &'a str,
    cnt: i64,
}

/// Search every backend; results are grouped per backend name.
pub(crate) fn search(cfg: &Config, terms: &str) -> Result<BTreeMap<String, BackendResults>> {
    let url = format!("{}/search", cfg.server_url);
    let resp = with_auth(ureq::post(&url), cfg)
        .send_json(SearchRequest { terms })
        .context("request /search")?;
    read_json(resp, "search")
}

pub(crate) fn queue_list(cfg: &Config) -> Result<Vec<Song>> {
    let url = format!("{}/queue", cfg.server_url);
    let resp = with_auth(ureq::get(&url), cfg)
        .call()
        .context("request /queue")?;
    read_json(resp, "queue")
}

pub(crate) fn enqueue(cfg: &Config, song: &Song) -> Result<()> {
    let url = format!("{}/queue", cfg.server_url);
    let resp = with_auth(ureq::post(&url), cfg)
        .send_json(EnqueueRequest { song })
        .context("request /queue")?;
    if !resp.status().is_success() {
        return Err(anyhow::anyhow!("enqueue failed with {}", resp.status()));
    }
    Ok(())
}

/// Delete the song at queue position `id`; returns the removed songs.
pub(crate) fn queue_delete(cfg: &Config, id: usize) -> Result<Vec<Song>> {
    let url = format!("{}/queue/{id}", cfg.server_url);
    let resp = with_auth(ureq::delete(&url), cfg)
        .call()
        .context("request /queue delete")?;
    read_json(resp, "queue")
}

/// Skip `cnt` songs; negative goes back. Returns the server's reply verbatim.
pub(crate) fn skip(cfg: &Config, cnt: i64) -> Result<String> {
    let url = format!("{}/playctl", cfg.server_url);
    let mut resp = with_auth(ureq::post(&url), cfg)
        .send_json(PlayctlRequest {
            action: "skip",
            cnt,
        })
        .context("request /playctl")?;
    resp.body_mut()
        .read_to_string()
        .context("read /playctl response body")
}

fn with_auth<B>(req: ureq::RequestBuilder<B>, cfg: &Config) -> ureq::RequestBuilder<B> {
    match cfg.auth_token.as_deref() {
        Some(token) => req.header("Authorization", format!("Bearer {token}")),
        None => req,
    }
}

fn read_json<T: DeserializeOwned>(
    mut resp: ureq::http::Response<ureq::Body>,
    label: &str,
) -> Result<T> {
    let body = resp
        .body_mut()
        .read_to_string()
        .with_context(|| format!("read /{label} response body"))?;
    serde_json::from_str(&body).with_context(|| format!("decode /{label} response"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_decodes_per_backend() {
        let raw = r#"{
            "local": {"songs": [{"artist":"A","title":"T","album":"L","songID":"1"}]},
            "gmusic": {"songs": []}
        }"#;
        let resp: BTreeMap<String, BackendResults> = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.len(), 2);
        assert_eq!(resp["local"].songs.len(), 1);
        assert_eq!(resp["local"].songs[0].artist, "A");
    }

    #[test]
    fn enqueue_request_wraps_song_with_extras() {
        let song: Song = serde_json::from_str(
            r#"{"artist":"A","title":"T","album":"L","songID":"x1"}"#,
        )
        .unwrap();
        let body = serde_json::to_value(EnqueueRequest { song: &song }).unwrap();
        assert_eq!(body["song"]["songID"], "x1");
        assert_eq!(body["song"]["title"], "T");
    }

    #[test]
    fn skip_request_shape() {
        let body = serde_json::to_value(PlayctlRequest {
            action: "skip",
            cnt: -2,
        })
        .unwrap();
        assert_eq!(body["action"], "skip");
        assert_eq!(body["cnt"], -2);
    }
}
