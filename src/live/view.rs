//! Live view rendering and event loop.
//!
//! One consumer loop owns all display state: push events mutate it, the
//! ticker repaints the clock line, the quit channel ends the session. No two
//! handlers run concurrently, so nothing here needs a lock.

use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, never, tick};
use crossterm::cursor::{MoveTo, MoveToColumn};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use super::channel::LiveEvent;
use super::clock::{PlaybackSnapshot, clock_line};
use crate::song::Song;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Display state owned by one live-view session.
pub(crate) struct RenderState {
    playback: Option<PlaybackSnapshot>,
    queue: Vec<Song>,
    /// At most one repeating clock ticker; dropping the receiver cancels it,
    /// and a queue repaint always cancels before starting a replacement.
    ticker: Option<Receiver<Instant>>,
}

impl RenderState {
    pub(crate) fn new() -> Self {
        Self {
            playback: None,
            queue: Vec::new(),
            ticker: None,
        }
    }

    /// Full repaint on a queue snapshot: clear the screen, print upcoming
    /// songs farthest-first with descending indices, the separator, then the
    /// now-playing line. Restarts the ticker and draws the clock immediately
    /// so the time line appears without waiting a full period.
    fn apply_queue<W: Write>(&mut self, out: &mut W, songs: Vec<Song>, now: Instant) -> Result<()> {
        self.ticker = None;
        self.queue = songs;

        queue!(out, Clear(ClearType::All), MoveTo(0, 0)).context("clear screen")?;
        let (now_playing, upcoming) = match self.queue.split_first() {
            Some((first, rest)) => (Some(first), rest),
            None => (None, &[][..]),
        };
        let mut id = upcoming.len();
        for song in upcoming.iter().rev() {
            write!(out, "  {id}: {song}\r\n").context("write queue entry")?;
            id -= 1;
        }
        write!(out, "--- Queue ---\r\n\r\n").context("write separator")?;
        if let Some(song) = now_playing {
            write!(out, "Now playing: {song}\r\n").context("write now playing")?;
        }
        out.flush().context("flush queue listing")?;

        if !upcoming.is_empty() || now_playing.is_some() {
            self.ticker = Some(tick(TICK_PERIOD));
            self.draw_clock(out, now)?;
        }
        Ok(())
    }

    /// Repaint only the clock line, in place.
    fn draw_clock<W: Write>(&self, out: &mut W, now: Instant) -> Result<()> {
        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine)).context("clear clock line")?;
        write!(out, "[{}]", clock_line(self.playback.as_ref(), now)).context("write clock")?;
        out.flush().context("flush clock line")?;
        Ok(())
    }
}

/// Drive the live view until quit or channel failure. A queue repaint and
/// its ticker restart complete before the next message is dispatched.
pub(crate) fn run<W: Write>(
    out: &mut W,
    events: Receiver<LiveEvent>,
    quit: Receiver<()>,
) -> Result<()> {
    let mut state = RenderState::new();
    let idle = never();
    loop {
        let ticker = state.ticker.clone().unwrap_or_else(|| idle.clone());
        crossbeam_channel::select! {
            recv(events) -> event => match event {
                Ok(LiveEvent::PlaybackUpdate(snapshot)) => state.playback = Some(snapshot),
                Ok(LiveEvent::QueueUpdate(songs)) => {
                    state.apply_queue(out, songs, Instant::now())?;
                }
                Ok(LiveEvent::Closed(reason)) => {
                    anyhow::bail!("event channel closed: {reason}");
                }
                Err(_) => anyhow::bail!("event channel closed"),
            },
            recv(ticker) -> _ => state.draw_clock(out, Instant::now())?,
            recv(quit) -> _ => return Ok(()),
        }
    }
}
