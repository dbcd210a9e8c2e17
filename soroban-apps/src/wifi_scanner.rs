//! WiFi scanner demo
//!
//! No radio is fitted; `5` plays back a canned survey, revealing one
//! network per interval so the screen behaves like a live scan. `2`/`8`
//! move the highlight, `0` returns home.

use core::fmt::Write;

use heapless::String;
use soroban_core::{App, AppContext, Instant};
use soroban_display::{Align, DisplayError, Draw, FontSize, Rgb565};

use crate::keymap;
use crate::ui;

/// Playback interval between reveals
const REVEAL_INTERVAL_US: u64 = 400_000;

struct Network {
    ssid: &'static str,
    channel: u8,
    /// dBm
    rssi: i8,
    secured: bool,
}

const NETWORKS: &[Network] = &[
    Network { ssid: "HomeNet-5G", channel: 36, rssi: -42, secured: true },
    Network { ssid: "CoffeeShop_Free", channel: 6, rssi: -58, secured: false },
    Network { ssid: "Linksys04522", channel: 11, rssi: -67, secured: true },
    Network { ssid: "IoT-Gateway", channel: 1, rssi: -71, secured: true },
    Network { ssid: "PrinterDirect", channel: 6, rssi: -80, secured: false },
    Network { ssid: "NETGEAR-Guest", channel: 44, rssi: -84, secured: true },
];

pub struct WifiScannerApp {
    scanning: bool,
    scan_started: Instant,
    /// How many canned entries are shown so far
    revealed: usize,
    selected: usize,
}

impl WifiScannerApp {
    pub const fn new() -> Self {
        Self {
            scanning: false,
            scan_started: Instant::EPOCH,
            revealed: 0,
            selected: 0,
        }
    }

    fn start_scan(&mut self, now: Instant) {
        self.scanning = true;
        self.scan_started = now;
        self.revealed = 0;
        self.selected = 0;
    }
}

impl Default for WifiScannerApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for WifiScannerApp {
    fn name(&self) -> &'static str {
        "WiFi Scan"
    }

    fn icon(&self) -> &'static str {
        "W"
    }

    fn init(&mut self) {
        *self = Self::new();
    }

    fn update(&mut self, ctx: &mut AppContext<'_>) {
        if !self.scanning {
            return;
        }
        let due = (ctx.now.micros_since(self.scan_started) / REVEAL_INTERVAL_US) as usize;
        self.revealed = due.min(NETWORKS.len());
        if self.revealed == NETWORKS.len() {
            self.scanning = false;
        }
    }

    fn on_key(&mut self, code: u8, ctx: &mut AppContext<'_>) {
        match code {
            keymap::KEY_5 => self.start_scan(ctx.now),
            keymap::KEY_2 => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            keymap::KEY_8 => {
                if self.selected + 1 < self.revealed {
                    self.selected += 1;
                }
            }
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

        ui::header(display, "WiFi Scan")?;

        if self.revealed == 0 && !self.scanning {
            display.draw_text_aligned(
                w / 2,
                110,
                "Press 5 to scan",
                FontSize::Medium,
                Align::Center,
                Rgb565::GRAY,
            )?;
        }

        let top: i16 = 50;
        let row_height: i16 = 26;
        for (index, network) in NETWORKS.iter().take(self.revealed).enumerate() {
            let y = top + index as i16 * row_height;
            if index == self.selected {
                display.fill_rect(5, y - 2, w - 10, row_height - 4, Rgb565::DARK_GRAY)?;
            }
            let color = if network.secured {
                Rgb565::YELLOW
            } else {
                Rgb565::GREEN
            };
            display.draw_text(10, y, network.ssid, FontSize::Medium, color)?;

            let mut detail: String<24> = String::new();
            let _ = write!(detail, "ch{:<2} {}dBm", network.channel, network.rssi);
            display.draw_text_aligned(
                w - 10,
                y + 2,
                &detail,
                FontSize::Small,
                Align::Right,
                Rgb565::LIGHT_GRAY,
            )?;
        }

        if self.scanning {
            display.draw_text_aligned(
                w / 2,
                205,
                "Scanning...",
                FontSize::Small,
                Align::Center,
                Rgb565::CYAN,
            )?;
        }

        ui::footer(display, "5: scan  0: back")
    }
}
