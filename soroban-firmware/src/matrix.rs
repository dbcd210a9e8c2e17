//! GPIO key-matrix driver
//!
//! Four row lines driven as outputs, four column lines read through
//! pull-ups. A scan strobes one row low at a time and samples the
//! columns active-low, after a short settle for line capacitance.

use embassy_rp::gpio::{Input, Output};
use embassy_time::{block_for, Duration};
use soroban_core::KeyMatrix;

pub const ROWS: usize = 4;
pub const COLS: usize = 4;

/// Settle time after driving a row, before sampling columns
const STROBE_SETTLE_US: u64 = 5;

/// Logical key code at each physical position
///
/// The cap layout is the classic calculator grid; codes follow
/// `soroban_apps::keymap`.
const LAYOUT: [[u8; COLS]; ROWS] = [
    [7, 8, 9, 13],  // 7 8 9 /
    [4, 5, 6, 12],  // 4 5 6 *
    [1, 2, 3, 11],  // 1 2 3 -
    [0, 15, 14, 10], // 0 C = +
];

pub struct MatrixDriver<'d> {
    rows: [Output<'d>; ROWS],
    cols: [Input<'d>; COLS],
}

impl<'d> MatrixDriver<'d> {
    /// Rows must be initialized high (idle), columns pulled up
    pub fn new(rows: [Output<'d>; ROWS], cols: [Input<'d>; COLS]) -> Self {
        Self { rows, cols }
    }
}

impl KeyMatrix for MatrixDriver<'_> {
    fn read(&mut self) -> u16 {
        let mut bits = 0u16;
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.set_low();
            block_for(Duration::from_micros(STROBE_SETTLE_US));
            for (c, col) in self.cols.iter().enumerate() {
                if col.is_low() {
                    bits |= 1 << LAYOUT[r][c];
                }
            }
            row.set_high();
        }
        bits
    }
}
