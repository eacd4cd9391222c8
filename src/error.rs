use thiserror::Error;

/// Decode and encode failures. All variants are pattern-local: the decoder
/// drops the active pattern and picks up again at the next header line.
/// I/O failures stay with the caller feeding lines in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("line {line}: header has fewer than two numeric fields")]
  MalformedHeader { line: u64 },

  #[error(
    "line {line}: run of {run} at ({x}, {y}) leaves the {width}x{height} pattern"
  )]
  OutOfBounds {
    line: u64,
    x: usize,
    y: usize,
    run: usize,
    width: usize,
    height: usize,
  },

  #[error("line {line}: unexpected character {symbol:?} in pattern body")]
  UnexpectedSymbol { line: u64, symbol: char },

  #[error("line {line}: run count with no symbol")]
  DanglingCount { line: u64 },

  #[error("cell value {code} has no display symbol")]
  UnknownCellValue { code: u8 },
}
