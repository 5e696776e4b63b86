//! Persistent push channel to the server.
//!
//! One WebSocket, one reader thread. Frames are validated here and forwarded
//! as typed events over a crossbeam channel; malformed frames are dropped at
//! this boundary and never reach the view.

use std::net::TcpStream;
use std::time::Instant;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::Deserialize;
use tungstenite::client::IntoClientRequest;
use tungstenite::http::HeaderValue;
use tungstenite::http::header::AUTHORIZATION;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use super::clock::PlaybackSnapshot;
use crate::config::Config;
use crate::song::Song;

/// Messages the live view consumes.
#[derive(Debug)]
pub(crate) enum LiveEvent {
    PlaybackUpdate(PlaybackSnapshot),
    QueueUpdate(Vec<Song>),
    /// The channel dropped or the server closed it. Fatal; no reconnect.
    Closed(String),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
enum ServerPush {
    Playback { position: u64, duration: u64 },
    Queue(Vec<Song>),
}

/// Connect the push channel and spawn the reader thread.
pub(crate) fn subscribe(cfg: &Config) -> Result<Receiver<LiveEvent>> {
    let url = events_url(&cfg.server_url)?;
    let mut request = url
        .clone()
        .into_client_request()
        .with_context(|| format!("build request for {url}"))?;
    if let Some(token) = cfg.auth_token.as_deref() {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .context("encode auth token header")?;
        request.headers_mut().insert(AUTHORIZATION, value);
    }
    let (socket, _response) =
        tungstenite::connect(request).with_context(|| format!("connect {url}"))?;

    let (tx, rx) = unbounded();
    std::thread::spawn(move || read_loop(socket, tx));
    Ok(rx)
}

fn read_loop(mut socket: WebSocket<MaybeTlsStream<TcpStream>>, tx: Sender<LiveEvent>) {
    loop {
        let msg = match socket.read() {
            Ok(msg) => msg,
            Err(e) => {
                tx.send(LiveEvent::Closed(e.to_string())).ok();
                return;
            }
        };
        let event = match msg {
            Message::Text(text) => match decode_push(&text) {
                Some(event) => event,
                None => continue,
            },
            Message::Close(frame) => {
                let reason = frame
                    .map(|f| f.reason.to_string())
                    .unwrap_or_else(|| "server closed the channel".to_string());
                tx.send(LiveEvent::Closed(reason)).ok();
                return;
            }
            // ping/pong are answered inside tungstenite's read
            _ => continue,
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

fn decode_push(text: &str) -> Option<LiveEvent> {
    match serde_json::from_str::<ServerPush>(text) {
        Ok(ServerPush::Playback { position, duration }) => {
            Some(LiveEvent::PlaybackUpdate(PlaybackSnapshot {
                position_ms: position,
                duration_ms: duration,
                received_at: Instant::now(),
            }))
        }
        Ok(ServerPush::Queue(songs)) => Some(LiveEvent::QueueUpdate(songs)),
        Err(e) => {
            tracing::warn!("dropping malformed push event: {e}");
            None
        }
    }
}

fn events_url(server_url: &str) -> Result<String> {
    let base = server_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        anyhow::bail!("server_url must start with http:// or https://, got {base}");
    };
    Ok(format!("{ws_base}/events"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_playback_update() {
        let event = decode_push(r#"{"event":"playback","data":{"position":5000,"duration":180000}}"#);
        match event {
            Some(LiveEvent::PlaybackUpdate(snap)) => {
                assert_eq!(snap.position_ms, 5_000);
                assert_eq!(snap.duration_ms, 180_000);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn decodes_queue_update() {
        let event = decode_push(
            r#"{"event":"queue","data":[{"artist":"A","title":"T","album":"L"}]}"#,
        );
        match event {
            Some(LiveEvent::QueueUpdate(songs)) => {
                assert_eq!(songs.len(), 1);
                assert_eq!(songs[0].title, "T");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn malformed_pushes_are_dropped() {
        assert!(decode_push("not json").is_none());
        assert!(decode_push(r#"{"event":"playback","data":{"position":"late"}}"#).is_none());
        assert!(decode_push(r#"{"event":"volume","data":5}"#).is_none());
    }

    #[test]
    fn events_url_maps_scheme() {
        assert_eq!(
            events_url("http://localhost:8080").unwrap(),
            "ws://localhost:8080/events"
        );
        assert_eq!(
            events_url("https://h:8443/").unwrap(),
            "wss://h:8443/events"
        );
        assert!(events_url("ftp://h").is_err());
    }
}
