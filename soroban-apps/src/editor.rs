//! Scratchpad text editor
//!
//! The keypad types its own labels: digits and operator glyphs append to
//! the buffer, `C` is backspace, `=` inserts a newline. Holding `C` and
//! pressing `0` returns to the launcher; that chord wins over typing a
//! zero.

use heapless::String;
use soroban_core::{App, AppContext};
use soroban_display::{DisplayError, Draw, FontSize, Rgb565};

use crate::keymap;
use crate::ui;

/// Buffer capacity; further input is dropped
pub const BUFFER_CAPACITY: usize = 256;

/// Glyph columns that fit between the margins at small size
const COLS_PER_LINE: usize = 50;

/// Text rows that fit between header and footer
const VISIBLE_LINES: usize = 10;

pub struct EditorApp {
    buffer: String<BUFFER_CAPACITY>,
}

impl EditorApp {
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Buffer contents
    pub fn text(&self) -> &str {
        &self.buffer
    }

    fn insert(&mut self, text: &str) {
        let _ = self.buffer.push_str(text);
    }

    fn backspace(&mut self) {
        let _ = self.buffer.pop();
    }
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for EditorApp {
    fn name(&self) -> &'static str {
        "Editor"
    }

    fn icon(&self) -> &'static str {
        "E"
    }

    fn init(&mut self) {
        self.buffer.clear();
    }

    fn on_key(&mut self, code: u8, ctx: &mut AppContext<'_>) {
        if code == keymap::KEY_0 && ctx.held.is_pressed(keymap::KEY_CLEAR) {
            ctx.nav.home();
            return;
        }
        match code {
            keymap::KEY_CLEAR => self.backspace(),
            keymap::KEY_EQUAL => self.insert("\n"),
            _ => {
                if let Some(label) = keymap::label(code) {
                    self.insert(label);
                }
            }
        }
    }

    fn render(
        &mut self,
        display: &mut dyn Draw,
        _ctx: &AppContext<'_>,
    ) -> Result<(), DisplayError> {
        ui::header(display, "Editor")?;

        let top: i16 = 48;
        let line_height = FontSize::Small.line_height() as i16 + 4;

        // Wrap hard at the column limit, then show the tail that fits
        let mut lines: heapless::Vec<&str, 64> = heapless::Vec::new();
        for line in self.buffer.split('\n') {
            if line.is_empty() {
                let _ = lines.push(line);
                continue;
            }
            let mut rest = line;
            while !rest.is_empty() {
                let cut = rest.len().min(COLS_PER_LINE);
                let (head, tail) = rest.split_at(cut);
                let _ = lines.push(head);
                rest = tail;
            }
        }
        let skip = lines.len().saturating_sub(VISIBLE_LINES);
        for (slot, line) in lines.iter().skip(skip).enumerate() {
            let y = top + slot as i16 * line_height;
            display.draw_text(10, y, line, FontSize::Small, Rgb565::WHITE)?;
        }

        // Cursor block at the end of the last line
        let cursor_row = lines.len().saturating_sub(skip).saturating_sub(1);
        let cursor_col = lines.last().map(|line| line.len()).unwrap_or(0);
        let x = 10 + (cursor_col * 6) as i16;
        let y = top + cursor_row as i16 * line_height;
        display.fill_rect(x, y, 5, 7, Rgb565::GREEN)?;

        ui::footer(display, "C: del  =: newline  C+0: back")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_core::app::NavRequest;
    use soroban_core::{Instant, KeySet, Navigator};

    fn press(app: &mut EditorApp, code: u8, held: KeySet) -> Navigator {
        let mut nav = Navigator::new();
        let mut ctx = AppContext {
            now: Instant::EPOCH,
            held,
            apps: &[],
            nav: &mut nav,
        };
        app.on_key(code, &mut ctx);
        nav
    }

    #[test]
    fn test_typing_appends_labels() {
        let mut app = EditorApp::new();
        for code in [keymap::KEY_1, keymap::KEY_PLUS, keymap::KEY_2] {
            press(&mut app, code, KeySet::default());
        }
        assert_eq!(app.text(), "1+2");
    }

    #[test]
    fn test_backspace_and_newline() {
        let mut app = EditorApp::new();
        for code in [keymap::KEY_7, keymap::KEY_8, keymap::KEY_CLEAR, keymap::KEY_EQUAL, keymap::KEY_9] {
            press(&mut app, code, KeySet::default());
        }
        assert_eq!(app.text(), "7\n9");
        // Backspace on empty is a no-op
        let mut empty = EditorApp::new();
        press(&mut empty, keymap::KEY_CLEAR, KeySet::default());
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn test_buffer_capacity_drops_overflow() {
        let mut app = EditorApp::new();
        for _ in 0..(BUFFER_CAPACITY + 20) {
            press(&mut app, keymap::KEY_5, KeySet::default());
        }
        assert_eq!(app.text().len(), BUFFER_CAPACITY);
    }

    #[test]
    fn test_clear_chord_requests_home_without_typing() {
        let mut app = EditorApp::new();
        let held = KeySet(1 << keymap::KEY_CLEAR);
        let mut nav = press(&mut app, keymap::KEY_0, held);
        assert_eq!(nav.take(), Some(NavRequest::Home));
        assert_eq!(app.text(), "");
    }

    #[test]
    fn test_init_clears_buffer() {
        let mut app = EditorApp::new();
        press(&mut app, keymap::KEY_3, KeySet::default());
        app.init();
        assert_eq!(app.text(), "");
    }
}
