//! Stopwatch with lap capture
//!
//! `5` starts and stops, `=` records a lap while running and resets when
//! stopped, `2`/`8` move the lap highlight, `0` returns home. Elapsed
//! time accumulates across pauses; a lap stores the total at the moment
//! of capture.

use core::fmt::Write;

use heapless::{String, Vec};
use soroban_core::{App, AppContext, Instant};
use soroban_display::{Align, DisplayError, Draw, FontSize, Rgb565};

use crate::keymap;
use crate::ui;

/// Laps kept; older captures are dropped once full
pub const MAX_LAPS: usize = 10;

/// Lap rows visible at once
const VISIBLE_LAPS: usize = 4;

pub struct StopwatchApp {
    running: bool,
    /// Wall-clock anchor of the current running stretch
    started_at: Instant,
    /// Time accumulated before `started_at`
    elapsed_us: u64,
    laps: Vec<u64, MAX_LAPS>,
    selected_lap: usize,
    scroll: usize,
}

impl StopwatchApp {
    pub const fn new() -> Self {
        Self {
            running: false,
            started_at: Instant::EPOCH,
            elapsed_us: 0,
            laps: Vec::new(),
            selected_lap: 0,
            scroll: 0,
        }
    }

    /// Total elapsed time as of `now`
    pub fn elapsed_at(&self, now: Instant) -> u64 {
        if self.running {
            self.elapsed_us + now.micros_since(self.started_at)
        } else {
            self.elapsed_us
        }
    }

    fn toggle(&mut self, now: Instant) {
        if self.running {
            self.elapsed_us += now.micros_since(self.started_at);
            self.running = false;
        } else {
            self.started_at = now;
            self.running = true;
        }
    }

    fn lap_or_reset(&mut self, now: Instant) {
        if self.running {
            if self.laps.is_full() {
                self.laps.remove(0);
            }
            let _ = self.laps.push(self.elapsed_at(now));
        } else {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.running = false;
        self.started_at = Instant::EPOCH;
        self.elapsed_us = 0;
        self.laps.clear();
        self.selected_lap = 0;
        self.scroll = 0;
    }

    fn select_prev(&mut self) {
        if self.selected_lap > 0 {
            self.selected_lap -= 1;
            if self.selected_lap < self.scroll {
                self.scroll = self.selected_lap;
            }
        }
    }

    fn select_next(&mut self) {
        if self.selected_lap + 1 < self.laps.len() {
            self.selected_lap += 1;
            if self.selected_lap >= self.scroll + VISIBLE_LAPS {
                self.scroll = self.selected_lap + 1 - VISIBLE_LAPS;
            }
        }
    }
}

impl Default for StopwatchApp {
    fn default() -> Self {
        Self::new()
    }
}

/// `mm:ss.mmm`, minutes unbounded
fn format_duration(micros: u64) -> String<16> {
    let millis = micros / 1_000;
    let minutes = millis / 60_000;
    let seconds = (millis / 1_000) % 60;
    let millis = millis % 1_000;
    let mut out = String::new();
    let _ = write!(out, "{minutes:02}:{seconds:02}.{millis:03}");
    out
}

impl App for StopwatchApp {
    fn name(&self) -> &'static str {
        "Stopwatch"
    }

    fn icon(&self) -> &'static str {
        "S"
    }

    fn init(&mut self) {
        self.reset();
    }

    fn on_key(&mut self, code: u8, ctx: &mut AppContext<'_>) {
        match code {
            keymap::KEY_5 => self.toggle(ctx.now),
            keymap::KEY_EQUAL => self.lap_or_reset(ctx.now),
            keymap::KEY_2 => self.select_prev(),
            keymap::KEY_8 => self.select_next(),
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

        ui::header(display, "Stopwatch")?;

        let readout = format_duration(self.elapsed_at(ctx.now));
        let color = if self.running {
            Rgb565::GREEN
        } else {
            Rgb565::WHITE
        };
        display.draw_text_aligned(w / 2, 60, &readout, FontSize::Large, Align::Center, color)?;

        // Lap list, newest at the bottom
        let top: i16 = 100;
        let row_height: i16 = 24;
        for (slot, index) in (self.scroll..self.laps.len())
            .take(VISIBLE_LAPS)
            .enumerate()
            .map(|(slot, index)| (slot as i16, index))
        {
            let y = top + slot * row_height;
            if index == self.selected_lap {
                display.fill_rect(10, y - 2, w - 20, row_height - 4, Rgb565::DARK_GRAY)?;
            }
            let mut line: String<24> = String::new();
            let _ = write!(line, "Lap {:>2}  ", index + 1);
            let _ = line.push_str(&format_duration(self.laps[index]));
            display.draw_text(20, y, &line, FontSize::Medium, Rgb565::CYAN)?;
        }

        let hint = if self.running {
            "5: stop  =: lap  0: back"
        } else {
            "5: start  =: reset  0: back"
        };
        ui::footer(display, hint)
    }
}
