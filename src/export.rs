//! Pure grid-to-text encoders: half-block, braille and lif renderings.

use crate::cell::{self, ALIVE};
use crate::error::Error;
use crate::grid::Grid;

/// Glyph for a half-block key `top + 2 * bottom`. Besides the four binary
/// combinations this covers the legacy-computing shade halves produced when
/// one or both cells hold the unknown code 32.
fn block_glyph(key: usize) -> Option<char> {
  match key {
    0 => Some(' '),
    1 => Some('\u{2580}'),
    2 => Some('\u{2584}'),
    3 => Some('\u{2588}'),
    32 => Some('\u{1fb8e}'),
    64 => Some('\u{1fb8f}'),
    96 => Some('\u{1fb90}'),
    65 => Some('\u{1fb91}'),
    34 => Some('\u{1fb92}'),
    _ => None,
  }
}

/// Dot weight of each cell in a 2x4 braille group, as (row, column) offsets.
/// Bits 0-5 cover the top three rows, bits 6-7 the fourth.
const BRAILLE_DOTS: [(usize, usize, u32); 8] = [
  (0, 0, 0x01),
  (1, 0, 0x02),
  (2, 0, 0x04),
  (0, 1, 0x08),
  (1, 1, 0x10),
  (2, 1, 0x20),
  (3, 0, 0x40),
  (3, 1, 0x80),
];

/// Render two grid rows per text row using Unicode half blocks. Patterns
/// narrower than `min_width` render as the empty string.
pub fn block(grid: &Grid, min_width: usize) -> String {
  if grid.width() < min_width {
    return String::new();
  }

  let mut out = String::new();
  for i in (0..grid.height()).step_by(2) {
    for j in 0..grid.width() {
      let top = grid.get(j, i) as usize;
      let bottom = if i + 1 < grid.height() {
        grid.get(j, i + 1) as usize
      } else {
        0
      };
      let glyph = block_glyph(top + 2 * bottom).unwrap_or_else(|| {
        // no entry for this combination: reduce both cells to binary
        let key = (top != 0) as usize + 2 * (bottom != 0) as usize;
        block_glyph(key).unwrap_or(' ')
      });
      out.push(glyph);
    }
    out.push('\n');
  }
  out
}

/// Render a 2x4 group of grid cells per text cell using braille dots.
/// Any cell not exactly alive leaves its dot clear. Patterns narrower than
/// `min_width` render as the empty string, same as block output.
pub fn braille(grid: &Grid, min_width: usize) -> String {
  if grid.width() < min_width {
    return String::new();
  }

  let mut out = String::new();
  for i in (0..grid.height()).step_by(4) {
    for j in (0..grid.width()).step_by(2) {
      let mut key = 0;
      for &(di, dj, bit) in &BRAILLE_DOTS {
        if i + di < grid.height() && j + dj < grid.width()
          && grid.get(j + dj, i + di) == ALIVE
        {
          key |= bit;
        }
      }
      out.push(char::from_u32(0x2800 + key).unwrap_or(' '));
    }
    out.push('\n');
  }
  out
}

/// Render one character per cell through the lif symbol table. Unlike the
/// other encoders no size filter applies here; a cell code outside the
/// table is an error.
pub fn lif(grid: &Grid) -> Result<String, Error> {
  let mut out = String::new();
  for row in grid.rows() {
    for &code in row {
      out.push(cell::lif_symbol(code).ok_or(Error::UnknownCellValue { code })?);
    }
    out.push('\n');
  }
  Ok(out)
}
