//! Playback clock estimation.

use std::time::Instant;

/// Last playback state pushed by the server, stamped at receipt. Replaced
/// wholesale on every push, never merged.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlaybackSnapshot {
    pub(crate) position_ms: u64,
    pub(crate) duration_ms: u64,
    pub(crate) received_at: Instant,
}

/// `elapsed/total` for the clock line. Elapsed advances with wall-clock time
/// from the snapshot's position, clamped to the track duration; total is the
/// reported duration as-is, not remaining time.
pub(crate) fn clock_line(snapshot: Option<&PlaybackSnapshot>, now: Instant) -> String {
    let Some(snap) = snapshot else {
        return "0:00/0:00".to_string();
    };
    let since_ms = now.saturating_duration_since(snap.received_at).as_millis() as u64;
    let elapsed_ms = snap.position_ms.saturating_add(since_ms).min(snap.duration_ms);
    format!(
        "{}/{}",
        format_duration_ms(elapsed_ms),
        format_duration_ms(snap.duration_ms)
    )
}

pub(crate) fn format_duration_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{mins}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn snap(position_ms: u64, duration_ms: u64, received_at: Instant) -> PlaybackSnapshot {
        PlaybackSnapshot {
            position_ms,
            duration_ms,
            received_at,
        }
    }

    #[test]
    fn no_snapshot_yields_fixed_literal() {
        assert_eq!(clock_line(None, Instant::now()), "0:00/0:00");
    }

    #[test]
    fn elapsed_advances_from_snapshot_position() {
        let t0 = Instant::now();
        let s = snap(5_000, 180_000, t0);
        let line = clock_line(Some(&s), t0 + Duration::from_millis(12_000));
        assert_eq!(line, "0:17/3:00");
    }

    #[test]
    fn elapsed_clamps_at_duration() {
        let t0 = Instant::now();
        let s = snap(170_000, 180_000, t0);
        let line = clock_line(Some(&s), t0 + Duration::from_secs(60));
        assert_eq!(line, "3:00/3:00");
    }

    #[test]
    fn render_time_before_receipt_does_not_rewind() {
        let now = Instant::now();
        let s = snap(5_000, 180_000, now + Duration::from_secs(10));
        assert_eq!(clock_line(Some(&s), now), "0:05/3:00");
    }

    #[test]
    fn sub_second_remainder_is_discarded() {
        let t0 = Instant::now();
        let s = snap(61_999, 180_000, t0);
        assert_eq!(clock_line(Some(&s), t0), "1:01/3:00");
    }

    #[test]
    fn formats_minutes_unpadded_seconds_padded() {
        assert_eq!(format_duration_ms(0), "0:00");
        assert_eq!(format_duration_ms(9_000), "0:09");
        assert_eq!(format_duration_ms(600_000), "10:00");
        assert_eq!(format_duration_ms(3_725_000), "62:05");
    }
}
