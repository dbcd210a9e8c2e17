//! Home app: icon grid of everything else that is installed
//!
//! Lives at registry index 0 by convention. The tile grid is built from
//! the registration-order catalog in the dispatch context, skipping the
//! launcher itself.

use soroban_core::{App, AppContext};
use soroban_display::{Align, DisplayError, Draw, FontSize, Rgb565};

use crate::keymap;
use crate::ui;

const ICON_SIZE: i16 = 64;
const ICON_SPACING: i16 = 20;
const ICONS_PER_ROW: usize = 3;
const GRID_TOP: i16 = 60;
const GRID_LEFT: i16 = 10;

pub struct LauncherApp {
    /// Catalog index of the highlighted tile (never 0, the launcher)
    selected: usize,
}

impl LauncherApp {
    pub const fn new() -> Self {
        Self { selected: 1 }
    }
}

impl Default for LauncherApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for LauncherApp {
    fn name(&self) -> &'static str {
        "Launcher"
    }

    fn icon(&self) -> &'static str {
        "L"
    }

    fn init(&mut self) {
        self.selected = 1;
    }

    fn on_key(&mut self, code: u8, ctx: &mut AppContext<'_>) {
        let count = ctx.apps.len();
        match code {
            keymap::KEY_2 => {
                if self.selected > ICONS_PER_ROW {
                    self.selected -= ICONS_PER_ROW;
                }
            }
            keymap::KEY_8 => {
                if self.selected + ICONS_PER_ROW < count {
                    self.selected += ICONS_PER_ROW;
                }
            }
            keymap::KEY_4 => {
                if self.selected > 1 {
                    self.selected -= 1;
                }
            }
            keymap::KEY_6 => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            keymap::KEY_EQUAL => {
                if self.selected > 0 && self.selected < count {
                    ctx.nav.switch_to(self.selected);
                }
            }
            _ => {}
        }
    }

    fn render(
        &mut self,
        display: &mut dyn Draw,
        ctx: &AppContext<'_>,
    ) -> Result<(), DisplayError> {
        ui::header(display, "Soroban")?;

        for (index, entry) in ctx.apps.iter().enumerate().skip(1) {
            let grid = index - 1;
            let col = (grid % ICONS_PER_ROW) as i16;
            let row = (grid / ICONS_PER_ROW) as i16;
            let x = GRID_LEFT + col * (ICON_SIZE + ICON_SPACING);
            let y = GRID_TOP + row * (ICON_SIZE + ICON_SPACING);

            let bg = if self.selected == index {
                Rgb565::BLUE
            } else {
                Rgb565::GRAY
            };
            display.fill_rect(x, y, ICON_SIZE, ICON_SIZE, bg)?;
            display.draw_rect(x, y, ICON_SIZE, ICON_SIZE, Rgb565::WHITE)?;
            display.draw_text_aligned(
                x + ICON_SIZE / 2,
                y + ICON_SIZE / 2 - 14,
                entry.icon,
                FontSize::Large,
                Align::Center,
                Rgb565::WHITE,
            )?;
            display.draw_text_aligned(
                x + ICON_SIZE / 2,
                y + ICON_SIZE - 12,
                entry.name,
                FontSize::Small,
                Align::Center,
                Rgb565::WHITE,
            )?;
        }

        ui::footer(display, "Press = to launch")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_core::app::NavRequest;
    use soroban_core::{AppEntry, Instant, KeySet, Navigator};
    use soroban_display::FramebufferDisplay;

    const CATALOG: &[AppEntry] = &[
        AppEntry {
            name: "Launcher",
            icon: "L",
        },
        AppEntry {
            name: "Calculator",
            icon: "C",
        },
        AppEntry {
            name: "Stopwatch",
            icon: "S",
        },
        AppEntry {
            name: "Editor",
            icon: "E",
        },
        AppEntry {
            name: "BadUSB",
            icon: "B",
        },
    ];

    fn press(app: &mut LauncherApp, code: u8, nav: &mut Navigator) {
        let mut ctx = AppContext {
            now: Instant::EPOCH,
            held: KeySet::default(),
            apps: CATALOG,
            nav,
        };
        app.on_key(code, &mut ctx);
    }

    #[test]
    fn test_horizontal_navigation_clamps() {
        let mut app = LauncherApp::new();
        let mut nav = Navigator::new();

        press(&mut app, keymap::KEY_4, &mut nav);
        assert_eq!(app.selected, 1);

        for _ in 0..10 {
            press(&mut app, keymap::KEY_6, &mut nav);
        }
        assert_eq!(app.selected, CATALOG.len() - 1);
    }

    #[test]
    fn test_vertical_navigation_by_row() {
        let mut app = LauncherApp::new();
        let mut nav = Navigator::new();

        press(&mut app, keymap::KEY_8, &mut nav);
        assert_eq!(app.selected, 4);
        press(&mut app, keymap::KEY_2, &mut nav);
        assert_eq!(app.selected, 1);
        // Already on the top row
        press(&mut app, keymap::KEY_2, &mut nav);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_equal_requests_switch() {
        let mut app = LauncherApp::new();
        let mut nav = Navigator::new();

        press(&mut app, keymap::KEY_6, &mut nav);
        press(&mut app, keymap::KEY_EQUAL, &mut nav);
        assert_eq!(nav.take(), Some(NavRequest::SwitchTo(2)));
    }

    #[test]
    fn test_init_resets_selection() {
        let mut app = LauncherApp::new();
        let mut nav = Navigator::new();
        press(&mut app, keymap::KEY_6, &mut nav);
        app.init();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_render_draws_tiles() {
        let mut app = LauncherApp::new();
        let mut nav = Navigator::new();
        let mut display = FramebufferDisplay::<320, 240>::new();
        let ctx = AppContext {
            now: Instant::EPOCH,
            held: KeySet::default(),
            apps: CATALOG,
            nav: &mut nav,
        };
        app.render(&mut display, &ctx).unwrap();
        // Selected tile background
        assert!(display.count_of(Rgb565::BLUE) > 0);
        // Unselected tiles
        assert!(display.count_of(Rgb565::GRAY) > 0);
    }
}
