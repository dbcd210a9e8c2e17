//! Packet sniffer demo
//!
//! Plays back a canned capture, one frame per interval, looping over the
//! sample set. `5` pauses and resumes, `0` returns home. There is no
//! capture hardware behind it.

use core::fmt::Write;

use heapless::{Deque, String};
use soroban_core::{App, AppContext, Instant};
use soroban_display::{Align, DisplayError, Draw, FontSize, Rgb565};

use crate::keymap;
use crate::ui;

/// Playback interval between frames
const FRAME_INTERVAL_US: u64 = 500_000;

/// Rows kept on screen
const VISIBLE_ROWS: usize = 6;

struct Sample {
    proto: &'static str,
    src: &'static str,
    dst: &'static str,
    len: u16,
}

const SAMPLES: &[Sample] = &[
    Sample { proto: "ARP", src: "192.168.1.1", dst: "broadcast", len: 42 },
    Sample { proto: "TCP", src: "192.168.1.7", dst: "142.250.74.36", len: 1514 },
    Sample { proto: "DNS", src: "192.168.1.7", dst: "192.168.1.1", len: 74 },
    Sample { proto: "UDP", src: "192.168.1.12", dst: "239.255.255.250", len: 217 },
    Sample { proto: "TCP", src: "142.250.74.36", dst: "192.168.1.7", len: 66 },
    Sample { proto: "ICMP", src: "192.168.1.9", dst: "8.8.8.8", len: 98 },
    Sample { proto: "TLS", src: "192.168.1.7", dst: "104.16.132.229", len: 583 },
    Sample { proto: "DHCP", src: "0.0.0.0", dst: "broadcast", len: 342 },
];

pub struct SnifferApp {
    paused: bool,
    /// Frames emitted since the capture started
    captured: u32,
    /// Playback clock; only advances while running
    last_frame: Instant,
    rows: Deque<String<56>, VISIBLE_ROWS>,
}

impl SnifferApp {
    pub fn new() -> Self {
        Self {
            paused: false,
            captured: 0,
            last_frame: Instant::EPOCH,
            rows: Deque::new(),
        }
    }

    fn emit_frame(&mut self) {
        let sample = &SAMPLES[self.captured as usize % SAMPLES.len()];
        self.captured += 1;

        let mut row: String<56> = String::new();
        let _ = write!(
            row,
            "{:>4} {:<4} {} > {}",
            self.captured, sample.proto, sample.src, sample.dst
        );
        let _ = write!(row, " {}B", sample.len);
        if self.rows.is_full() {
            let _ = self.rows.pop_front();
        }
        let _ = self.rows.push_back(row);
    }
}

impl Default for SnifferApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for SnifferApp {
    fn name(&self) -> &'static str {
        "Sniffer"
    }

    fn icon(&self) -> &'static str {
        "P"
    }

    fn init(&mut self) {
        *self = Self::new();
    }

    fn update(&mut self, ctx: &mut AppContext<'_>) {
        if self.paused {
            // Keep the clock moving so resume does not burst-replay
            self.last_frame = ctx.now;
            return;
        }
        while ctx.now.micros_since(self.last_frame) >= FRAME_INTERVAL_US {
            self.last_frame = self.last_frame.add_micros(FRAME_INTERVAL_US);
            self.emit_frame();
        }
    }

    fn on_key(&mut self, code: u8, ctx: &mut AppContext<'_>) {
        match code {
            keymap::KEY_5 => self.paused = !self.paused,
            keymap::KEY_0 => ctx.nav.home(),
            _ => {}
        }
    }

    fn render(
        &mut self,
        display: &mut dyn Draw,
        _ctx: &AppContext<'_>,
    ) -> Result<(), DisplayError> {
        let (w, _) = display.size();
        let w = w as i16;

        ui::header(display, "Sniffer")?;

        let mut status: String<24> = String::new();
        let _ = write!(status, "{} captured", self.captured);
        let color = if self.paused {
            Rgb565::ORANGE
        } else {
            Rgb565::GREEN
        };
        display.draw_text(10, 46, &status, FontSize::Small, color)?;
        if self.paused {
            display.draw_text_aligned(
                w - 10,
                46,
                "PAUSED",
                FontSize::Small,
                Align::Right,
                Rgb565::ORANGE,
            )?;
        }

        let top: i16 = 64;
        let row_height: i16 = 22;
        for (slot, row) in self.rows.iter().enumerate() {
            let y = top + slot as i16 * row_height;
            display.draw_text(10, y, row, FontSize::Small, Rgb565::CYAN)?;
        }

        ui::footer(display, "5: pause  0: back")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_core::app::NavRequest;
    use soroban_core::{KeySet, Navigator};

    fn step(app: &mut SnifferApp, code: Option<u8>, now: Instant) -> Navigator {
        let mut nav = Navigator::new();
        let mut ctx = AppContext {
            now,
            held: KeySet::default(),
            apps: &[],
            nav: &mut nav,
        };
        match code {
            Some(code) => app.on_key(code, &mut ctx),
            None => app.update(&mut ctx),
        }
        nav
    }

    #[test]
    fn test_frames_arrive_on_interval() {
        let mut app = SnifferApp::new();
        step(&mut app, None, Instant::from_millis(400));
        assert_eq!(app.captured, 0);
        step(&mut app, None, Instant::from_millis(1_100));
        assert_eq!(app.captured, 2);
    }

    #[test]
    fn test_rows_bounded_to_screen() {
        let mut app = SnifferApp::new();
        step(&mut app, None, Instant::from_millis(10_000));
        assert_eq!(app.captured, 20);
        assert_eq!(app.rows.len(), VISIBLE_ROWS);
        // Oldest visible row is frame 15
        assert!(app.rows.front().unwrap().starts_with("  15"));
    }

    #[test]
    fn test_pause_stops_capture_without_burst() {
        let mut app = SnifferApp::new();
        step(&mut app, None, Instant::from_millis(1_000));
        assert_eq!(app.captured, 2);

        step(&mut app, Some(keymap::KEY_5), Instant::from_millis(1_000));
        step(&mut app, None, Instant::from_millis(5_000));
        assert_eq!(app.captured, 2);

        // Resume counts from the resume point, not the pause point
        step(&mut app, Some(keymap::KEY_5), Instant::from_millis(5_000));
        step(&mut app, None, Instant::from_millis(5_400));
        assert_eq!(app.captured, 2);
        step(&mut app, None, Instant::from_millis(5_600));
        assert_eq!(app.captured, 3);
    }

    #[test]
    fn test_zero_requests_home() {
        let mut app = SnifferApp::new();
        let mut nav = step(&mut app, Some(keymap::KEY_0), Instant::EPOCH);
        assert_eq!(nav.take(), Some(NavRequest::Home));
    }
}
