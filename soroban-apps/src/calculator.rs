//! Four-function calculator
//!
//! Chained infix arithmetic over the keypad: pressing an operator while
//! one is already pending evaluates first, `=` evaluates and leaves the
//! result editable as the next left operand. Division by zero latches an
//! error state until `C`.
//!
//! Holding `C` and pressing `0` returns to the launcher.

use core::fmt::Write;

use heapless::String;
use soroban_core::{App, AppContext};
use soroban_display::{Align, DisplayError, Draw, FontSize, Rgb565};

use crate::keymap;
use crate::ui;

/// Maximum digits accepted into the entry field
const MAX_ENTRY_DIGITS: usize = 15;

/// Magnitudes beyond these switch the readout to scientific notation
const SCI_UPPER: f64 = 1e10;
const SCI_LOWER: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
}

pub struct CalculatorApp {
    /// Readout contents (digits being entered, or a formatted result)
    input: String<32>,
    stored: f64,
    pending: Option<Op>,
    /// Next digit starts a fresh entry
    new_input: bool,
    error: bool,
}

impl CalculatorApp {
    pub fn new() -> Self {
        let mut app = Self {
            input: String::new(),
            stored: 0.0,
            pending: None,
            new_input: true,
            error: false,
        };
        app.clear();
        app
    }

    /// Current readout text
    pub fn readout(&self) -> &str {
        &self.input
    }

    fn clear(&mut self) {
        self.input.clear();
        let _ = self.input.push('0');
        self.stored = 0.0;
        self.pending = None;
        self.new_input = true;
        self.error = false;
    }

    fn entry_value(&self) -> f64 {
        self.input.parse().unwrap_or(0.0)
    }

    fn enter_digit(&mut self, digit: u8) {
        if self.error {
            return;
        }
        if self.new_input {
            self.input.clear();
            self.new_input = false;
        }
        // Drop a leading zero so "0" then "7" reads "7"
        if self.input.as_str() == "0" {
            self.input.clear();
        }
        if self.input.len() < MAX_ENTRY_DIGITS {
            let _ = self.input.push((b'0' + digit) as char);
        }
    }

    fn enter_operator(&mut self, op: Op) {
        if self.error {
            return;
        }
        if self.pending.is_some() {
            self.evaluate();
        } else {
            self.stored = self.entry_value();
        }
        self.pending = Some(op);
        self.new_input = true;
    }

    fn evaluate(&mut self) {
        if self.error {
            return;
        }
        let current = self.entry_value();
        let result = match self.pending {
            Some(Op::Add) => self.stored + current,
            Some(Op::Subtract) => self.stored - current,
            Some(Op::Multiply) => self.stored * current,
            Some(Op::Divide) => {
                if current > -SCI_LOWER && current < SCI_LOWER {
                    self.input.clear();
                    let _ = self.input.push_str("Error");
                    self.error = true;
                    return;
                }
                self.stored / current
            }
            None => current,
        };
        self.stored = result;
        self.format_result(result);
    }

    fn format_result(&mut self, value: f64) {
        self.input.clear();
        let magnitude = if value < 0.0 { -value } else { value };
        if magnitude > SCI_UPPER || (value != 0.0 && magnitude < SCI_LOWER) {
            let _ = write!(self.input, "{value:e}");
        } else {
            let _ = write!(self.input, "{value}");
        }
        // Overflowed the readout: fall back to scientific
        if self.input.len() == self.input.capacity() {
            self.input.clear();
            let _ = write!(self.input, "{value:e}");
        }
    }
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl App for CalculatorApp {
    fn name(&self) -> &'static str {
        "Calculator"
    }

    fn icon(&self) -> &'static str {
        "C"
    }

    fn init(&mut self) {
        self.clear();
    }

    fn on_key(&mut self, code: u8, ctx: &mut AppContext<'_>) {
        // Exit chord, checked before digit handling so it wins over "0"
        if code == keymap::KEY_0 && ctx.held.is_pressed(keymap::KEY_CLEAR) {
            ctx.nav.home();
            return;
        }

        match code {
            keymap::KEY_PLUS => self.enter_operator(Op::Add),
            keymap::KEY_MINUS => self.enter_operator(Op::Subtract),
            keymap::KEY_MULTIPLY => self.enter_operator(Op::Multiply),
            keymap::KEY_DIVIDE => self.enter_operator(Op::Divide),
            keymap::KEY_EQUAL => {
                self.evaluate();
                self.pending = None;
                self.new_input = true;
            }
            keymap::KEY_CLEAR => self.clear(),
            _ => {
                if let Some(digit) = keymap::digit(code) {
                    self.enter_digit(digit);
                }
            }
        }
    }

    fn render(
        &mut self,
        display: &mut dyn Draw,
        _ctx: &AppContext<'_>,
    ) -> Result<(), DisplayError> {
        let (w, _) = display.size();
        let w = w as i16;

        ui::header(display, "Calculator")?;

        // Readout box
        display.fill_rect(10, 50, w - 20, 40, Rgb565::LIGHT_GRAY)?;
        display.draw_rect(10, 50, w - 20, 40, Rgb565::BLACK)?;
        let color = if self.error {
            Rgb565::RED
        } else {
            Rgb565::BLACK
        };
        display.draw_text_aligned(w - 20, 60, &self.input, FontSize::Large, Align::Right, color)?;

        // On-screen keypad mirroring the physical layout
        const LABELS: [[&str; 4]; 4] = [
            ["7", "8", "9", "/"],
            ["4", "5", "6", "*"],
            ["1", "2", "3", "-"],
            ["0", "C", "=", "+"],
        ];
        let key_size: i16 = 24;
        let spacing: i16 = 6;
        let top: i16 = 100;
        let left = (w - (4 * key_size + 3 * spacing)) / 2;

        for (row, labels) in LABELS.iter().enumerate() {
            for (col, label) in labels.iter().enumerate() {
                let x = left + col as i16 * (key_size + spacing);
                let y = top + row as i16 * (key_size + spacing);
                let bg = match (row, col) {
                    (_, 3) => Rgb565::ORANGE,
                    (3, 1) => Rgb565::RED,
                    (3, 2) => Rgb565::GREEN,
                    _ => Rgb565::GRAY,
                };
                display.fill_rect(x, y, key_size, key_size, bg)?;
                display.draw_rect(x, y, key_size, key_size, Rgb565::WHITE)?;
                display.draw_text_aligned(
                    x + key_size / 2,
                    y + key_size / 2 - 7,
                    label,
                    FontSize::Medium,
                    Align::Center,
                    Rgb565::WHITE,
                )?;
            }
        }

        ui::footer(display, "Hold C + 0: back")
    }
}
