//! BadUSB payload runner demo
//!
//! Shows the classic payload menu and animates a fake injection when one
//! is run; no USB HID stack is attached. `2`/`8` select, `=` runs, `0`
//! returns home (ignored mid-run).

use core::fmt::Write;

use heapless::String;
use soroban_core::{App, AppContext, Instant};
use soroban_display::{Align, DisplayError, Draw, FontSize, Rgb565};

use crate::keymap;
use crate::ui;

struct Payload {
    name: &'static str,
    /// Fake injection duration
    duration_us: u64,
}

const PAYLOADS: &[Payload] = &[
    Payload { name: "Rickroll", duration_us: 2_000_000 },
    Payload { name: "Fake Update", duration_us: 3_500_000 },
    Payload { name: "WiFi Grabber", duration_us: 5_000_000 },
    Payload { name: "Reverse Shell", duration_us: 4_000_000 },
    Payload { name: "Keylogger", duration_us: 2_500_000 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Running { started_at: Instant },
    Done,
}

pub struct BadUsbApp {
    selected: usize,
    state: RunState,
}

impl BadUsbApp {
    pub const fn new() -> Self {
        Self {
            selected: 0,
            state: RunState::Idle,
        }
    }

    /// Injection progress in percent, as of `now`
    fn progress(&self, now: Instant) -> Option<u8> {
        match self.state {
            RunState::Running { started_at } => {
                let duration = PAYLOADS[self.selected].duration_us;
                let elapsed = now.micros_since(started_at);
                Some(((elapsed * 100 / duration) as u8).min(100))
            }
            _ => None,
        }
    }
}

impl Default for BadUsbApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for BadUsbApp {
    fn name(&self) -> &'static str {
        "BadUSB"
    }

    fn icon(&self) -> &'static str {
        "U"
    }

    fn init(&mut self) {
        *self = Self::new();
    }

    fn update(&mut self, ctx: &mut AppContext<'_>) {
        if let RunState::Running { started_at } = self.state {
            if ctx.now.micros_since(started_at) >= PAYLOADS[self.selected].duration_us {
                self.state = RunState::Done;
            }
        }
    }

    fn on_key(&mut self, code: u8, ctx: &mut AppContext<'_>) {
        // Selection and exit are locked out while injecting
        if matches!(self.state, RunState::Running { .. }) {
            return;
        }
        match code {
            keymap::KEY_2 => {
                self.state = RunState::Idle;
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            keymap::KEY_8 => {
                self.state = RunState::Idle;
                if self.selected + 1 < PAYLOADS.len() {
                    self.selected += 1;
                }
            }
            keymap::KEY_EQUAL => {
                self.state = RunState::Running { started_at: ctx.now };
            }
            keymap::KEY_0 => ctx.nav.home(),
            _ => {}
        }
    }

    fn render(
        &mut self,
        display: &mut dyn Draw,
        ctx: &AppContext<'_>,
    ) -> Result<(), DisplayError> {
        let (w, _) = display.size();
        let w = w as i16;

        ui::header(display, "BadUSB")?;

        let top: i16 = 50;
        let row_height: i16 = 24;
        for (index, payload) in PAYLOADS.iter().enumerate() {
            let y = top + index as i16 * row_height;
            if index == self.selected {
                display.fill_rect(5, y - 2, w - 10, row_height - 4, Rgb565::DARK_GRAY)?;
            }
            display.draw_text(10, y, payload.name, FontSize::Medium, Rgb565::WHITE)?;
        }

        let bar_y: i16 = 180;
        match self.state {
            RunState::Running { .. } => {
                let pct = self.progress(ctx.now).unwrap_or(0);
                let bar_width = w - 40;
                display.draw_rect(20, bar_y, bar_width, 16, Rgb565::WHITE)?;
                let filled = bar_width as i32 * pct as i32 / 100;
                display.fill_rect(20, bar_y, filled as i16, 16, Rgb565::RED)?;

                let mut label: String<16> = String::new();
                let _ = write!(label, "Injecting {pct}%");
                display.draw_text_aligned(
                    w / 2,
                    bar_y - 16,
                    &label,
                    FontSize::Small,
                    Align::Center,
                    Rgb565::RED,
                )?;
            }
            RunState::Done => {
                display.draw_text_aligned(
                    w / 2,
                    bar_y,
                    "Payload delivered",
                    FontSize::Medium,
                    Align::Center,
                    Rgb565::GREEN,
                )?;
            }
            RunState::Idle => {}
        }

        ui::footer(display, "=: run  0: back")
    }
}
