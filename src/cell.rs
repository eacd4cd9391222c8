//! Cell codes written by the decoder and their lif display symbols.

/// Dead cell, written for `b` and `.` runs (by leaving the default in place).
pub const DEAD: u8 = 0;

/// Alive cell, written for `o` and `A` runs.
pub const ALIVE: u8 = 1;

/// Excluded cell, written for `X` runs (lifesrc-style search state).
pub const EXCLUDED: u8 = 3;

/// Unknown cell, written for `?` runs (lifesrc-style search state).
pub const UNKNOWN: u8 = 32;

/// Frozen cell. Never written by the decoder; kept in the display table so
/// hand-built grids round-trip through lif output.
pub const FROZEN: u8 = 4;

/// Display character of a cell code in lif output. `None` for codes with no
/// entry in the table.
pub fn lif_symbol(code: u8) -> Option<char> {
  match code {
    DEAD => Some('.'),
    ALIVE => Some('o'),
    UNKNOWN => Some('?'),
    EXCLUDED => Some('X'),
    FROZEN => Some('+'),
    _ => None,
  }
}

/// Inverse of `lif_symbol`. `b` and `A` are accepted as RLE aliases of the
/// dead and alive symbols.
pub fn lif_code(symbol: char) -> Option<u8> {
  match symbol {
    '.' | 'b' => Some(DEAD),
    'o' | 'A' => Some(ALIVE),
    '?' => Some(UNKNOWN),
    'X' => Some(EXCLUDED),
    '+' => Some(FROZEN),
    _ => None,
  }
}
