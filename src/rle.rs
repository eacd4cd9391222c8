//! Streaming RLE pattern decoder.
//!
//! RLE format: <https://www.conwaylife.com/wiki/Run_Length_Encoded>.

use itertools::Itertools;
use regex::Regex;
use crate::cell::{ALIVE, EXCLUDED, UNKNOWN};
use crate::error::Error;
use crate::export;
use crate::grid::Grid;

/// Render strategy, fixed when the decoder is built.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RenderMode {
  Block,
  Braille,
  Lif,
}

impl Default for RenderMode {
  fn default() -> Self {
    RenderMode::Block
  }
}

/// Per-stream decoder configuration. `min_height` drops patterns at header
/// time; `min_width` suppresses block and braille output but not lif.
#[derive(Clone, Copy, Default, Debug)]
pub struct Config {
  pub mode: RenderMode,
  pub min_width: usize,
  pub min_height: usize,
}

/// One rendered pattern plus the counters for its diagnostic line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rendered {
  pub text: String,
  /// 1-based index of the pattern within the stream.
  pub pattern: u64,
  /// 1-based input line of the terminating `!`.
  pub line: u64,
}

/// Line-oriented decoder. Feed lines in order with `process`; a pattern is
/// rendered when its `!` terminator arrives. One decoder per stream.
pub struct Decoder {
  config: Config,
  num: Regex,
  grid: Option<Grid>,
  x: usize,
  y: usize,
  line: u64,
  patterns: u64,
}

impl Decoder {
  pub fn new(config: Config) -> Self {
    Self {
      config,
      num: Regex::new(r"\d+").unwrap(),
      grid: None,
      x: 0,
      y: 0,
      line: 0,
      patterns: 0,
    }
  }

  /// Feed one input line, without its terminator. Returns a rendering when
  /// the line completed a pattern. An error abandons the active pattern;
  /// decoding resumes at the next header line.
  pub fn process(&mut self, line: &str) -> Result<Option<Rendered>, Error> {
    self.line += 1;
    if line.starts_with('#') {
      return Ok(None);
    }
    if line.starts_with('x') {
      return self.header(line).map(|_| None);
    }
    // body lines are no-ops while no pattern is active, which also covers
    // everything following a dropped or failed pattern
    match self.grid.take() {
      Some(grid) => self.body(line, grid),
      None => Ok(None),
    }
  }

  /// `x = <w>, y = <h>[, rule = ...]`: the first decimal run of each of the
  /// first two comma fields. Any further fields are not consulted.
  fn header(&mut self, line: &str) -> Result<(), Error> {
    self.grid = None;
    self.x = 0;
    self.y = 0;

    let dims = line
      .split(',')
      .take(2)
      .map(|field| {
        self.num.find(field).and_then(|m| m.as_str().parse::<usize>().ok())
      })
      .collect_tuple();
    let (width, height) = match dims {
      Some((Some(width), Some(height))) => (width, height),
      _ => return Err(Error::MalformedHeader { line: self.line }),
    };

    if height < self.config.min_height {
      tracing::debug!(
        "line {}: {}x{} pattern below height cutoff, dropped",
        self.line, width, height
      );
      return Ok(());
    }
    if width != 0 && height != 0 {
      self.grid = Some(Grid::new(width, height));
    }
    Ok(())
  }

  /// Run tokens, scanned as an optional decimal count followed by exactly
  /// one symbol. Whitespace between tokens is skipped; anything else that
  /// is not part of the grammar is rejected.
  fn body(&mut self, line: &str, mut grid: Grid) -> Result<Option<Rendered>, Error> {
    let mut chars = line.chars().peekable();

    loop {
      while chars.peek().map_or(false, |c| c.is_ascii_whitespace()) {
        chars.next();
      }
      let first = match chars.next() {
        Some(c) => c,
        None => {
          self.grid = Some(grid);
          return Ok(None);
        }
      };

      let (run, symbol) = match first.to_digit(10) {
        Some(d) => {
          let mut n = d as usize;
          while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            n = n.saturating_mul(10).saturating_add(d as usize);
            chars.next();
          }
          match chars.next() {
            Some(c) => (n, c),
            None => return Err(Error::DanglingCount { line: self.line }),
          }
        }
        None => (1, first),
      };

      match symbol {
        'b' | '.' => self.x = self.x.saturating_add(run),
        '$' => {
          self.x = 0;
          self.y = self.y.saturating_add(run);
        }
        // the terminator ends the pattern unconditionally; the rest of the
        // line is never examined
        '!' => return self.finish(grid).map(Some),
        'o' | 'A' => self.write(&mut grid, run, ALIVE)?,
        '?' => self.write(&mut grid, run, UNKNOWN)?,
        'X' => self.write(&mut grid, run, EXCLUDED)?,
        symbol => {
          return Err(Error::UnexpectedSymbol { line: self.line, symbol });
        }
      }
    }
  }

  fn write(&mut self, grid: &mut Grid, run: usize, code: u8) -> Result<(), Error> {
    let end = self.x.checked_add(run);
    if self.y >= grid.height() || end.map_or(true, |end| end > grid.width()) {
      return Err(Error::OutOfBounds {
        line: self.line,
        x: self.x,
        y: self.y,
        run,
        width: grid.width(),
        height: grid.height(),
      });
    }
    grid.fill(self.x, self.y, run, code);
    self.x += run;
    Ok(())
  }

  fn finish(&mut self, grid: Grid) -> Result<Rendered, Error> {
    self.patterns += 1;
    let text = match self.config.mode {
      RenderMode::Block => export::block(&grid, self.config.min_width),
      RenderMode::Braille => export::braille(&grid, self.config.min_width),
      RenderMode::Lif => export::lif(&grid)?,
    };
    Ok(Rendered {
      text,
      pattern: self.patterns,
      line: self.line,
    })
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use super::*;

  fn decoder(mode: RenderMode) -> Decoder {
    Decoder::new(Config {
      mode,
      ..Config::default()
    })
  }

  fn feed(dec: &mut Decoder, lines: &[&str]) -> Vec<Rendered> {
    lines
      .iter()
      .filter_map(|l| dec.process(l).unwrap())
      .collect()
  }

  #[test]
  fn fresh_grid_is_all_dead() {
    let mut dec = decoder(RenderMode::Lif);
    let out = feed(&mut dec, &["x = 2, y = 2", "!"]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].text, "..\n..\n");
  }

  #[test]
  fn block_render_with_diagnostics() {
    let mut dec = decoder(RenderMode::Block);
    let out = feed(&mut dec, &["x = 3, y = 2", "obo$b2o!"]);
    assert_eq!(out, vec![Rendered {
      text: "\u{2580}\u{2584}\u{2588}\n".to_owned(),
      pattern: 1,
      line: 2,
    }]);
  }

  #[test]
  fn header_rule_field_is_ignored() {
    let mut dec = decoder(RenderMode::Lif);
    let out = feed(&mut dec, &["x = 3, y = 1, rule = B3/S23", "3o!"]);
    assert_eq!(out[0].text, "ooo\n");
  }

  #[test]
  fn auxiliary_symbols_write_their_codes() {
    let mut dec = decoder(RenderMode::Lif);
    let out = feed(&mut dec, &["x = 4, y = 1", "?2Xo!"]);
    assert_eq!(out[0].text, "?XXo\n");
  }

  #[test]
  fn dollar_resets_column() {
    let mut dec = decoder(RenderMode::Lif);
    let out = feed(&mut dec, &["x = 3, y = 3", "o$$2bo!"]);
    assert_eq!(out[0].text, "o..\n...\n..o\n");
  }

  #[test]
  fn whitespace_between_tokens_is_skipped() {
    let mut dec = decoder(RenderMode::Lif);
    let out = feed(&mut dec, &["x = 3, y = 1", " o bo !"]);
    assert_eq!(out[0].text, "o.o\n");
  }

  #[test]
  fn pattern_spread_over_lines() {
    let mut dec = decoder(RenderMode::Lif);
    let out = feed(&mut dec, &["x = 2, y = 2", "2o$", "2o!"]);
    assert_eq!(out, vec![Rendered {
      text: "oo\noo\n".to_owned(),
      pattern: 1,
      line: 3,
    }]);
  }

  #[test]
  fn terminator_discards_rest_of_line() {
    let mut dec = decoder(RenderMode::Lif);
    let out = feed(&mut dec, &["x = 1, y = 1", "o!o%%%"]);
    assert_eq!(out[0].text, "o\n");
    // and the stream is inactive afterwards
    assert_eq!(dec.process("3o").unwrap(), None);
  }

  #[test]
  fn multiple_patterns_share_counters() {
    let mut dec = decoder(RenderMode::Lif);
    let out = feed(&mut dec, &[
      "x = 1, y = 1",
      "o!",
      "x = 2, y = 1",
      "bo!",
    ]);
    assert_eq!(
      out.iter().map(|r| (r.pattern, r.line)).collect::<Vec<_>>(),
      vec![(1, 2), (2, 4)]
    );
    assert_eq!(out[1].text, ".o\n");
  }

  #[test]
  fn min_height_drops_pattern_silently() {
    let mut dec = Decoder::new(Config {
      mode: RenderMode::Lif,
      min_height: 3,
      ..Config::default()
    });
    let out = feed(&mut dec, &[
      "x = 5, y = 2",
      "5o!",
      "x = 2, y = 3",
      "2o$2o$2o!",
    ]);
    // the short pattern produces neither render nor diagnostic
    assert_eq!(
      out.iter().map(|r| (r.pattern, r.line)).collect::<Vec<_>>(),
      vec![(1, 4)]
    );
  }

  #[test]
  fn min_width_suppresses_block_but_keeps_diagnostics() {
    let mut dec = Decoder::new(Config {
      mode: RenderMode::Block,
      min_width: 10,
      ..Config::default()
    });
    let out = feed(&mut dec, &["x = 2, y = 2", "2o$2o!"]);
    assert_eq!(out, vec![Rendered {
      text: String::new(),
      pattern: 1,
      line: 2,
    }]);
  }

  #[test]
  fn min_width_never_touches_lif() {
    let mut dec = Decoder::new(Config {
      mode: RenderMode::Lif,
      min_width: 10,
      ..Config::default()
    });
    let out = feed(&mut dec, &["x = 2, y = 2", "2o$2o!"]);
    assert_eq!(out[0].text, "oo\noo\n");
  }

  #[test]
  fn zero_dimension_header_deactivates() {
    let mut dec = decoder(RenderMode::Lif);
    assert_eq!(dec.process("x = 0, y = 5").unwrap(), None);
    assert_eq!(dec.process("3o!").unwrap(), None);
  }

  #[test]
  fn malformed_header_fails_pattern() {
    let mut dec = decoder(RenderMode::Lif);
    assert_eq!(
      dec.process("x = 3"),
      Err(Error::MalformedHeader { line: 1 })
    );
    // body lines up to the next header stay inert
    assert_eq!(dec.process("3o!").unwrap(), None);
    let out = feed(&mut dec, &["x = 1, y = 1", "o!"]);
    assert_eq!(out[0].text, "o\n");
  }

  #[test]
  fn write_past_width_is_out_of_bounds() {
    let mut dec = decoder(RenderMode::Lif);
    assert_eq!(dec.process("x = 2, y = 1").unwrap(), None);
    assert_eq!(
      dec.process("3o!"),
      Err(Error::OutOfBounds {
        line: 2,
        x: 0,
        y: 0,
        run: 3,
        width: 2,
        height: 1,
      })
    );
    // pattern abandoned, terminator of the dead pattern is inert
    assert_eq!(dec.process("!").unwrap(), None);
  }

  #[test]
  fn write_past_height_is_out_of_bounds() {
    let mut dec = decoder(RenderMode::Lif);
    assert_eq!(dec.process("x = 2, y = 2").unwrap(), None);
    assert!(matches!(
      dec.process("$$o!"),
      Err(Error::OutOfBounds { y: 2, .. })
    ));
  }

  #[test]
  fn dead_runs_are_not_bounds_checked() {
    // trailing blank runs past the edge are tolerated, as in files that
    // pad rows out of habit; only writes are checked
    let mut dec = decoder(RenderMode::Lif);
    let out = feed(&mut dec, &["x = 2, y = 1", "o5b!"]);
    assert_eq!(out[0].text, "o.\n");
  }

  #[test]
  fn stray_character_is_rejected() {
    let mut dec = decoder(RenderMode::Lif);
    assert_eq!(dec.process("x = 2, y = 1").unwrap(), None);
    assert_eq!(
      dec.process("oz!"),
      Err(Error::UnexpectedSymbol { line: 2, symbol: 'z' })
    );
  }

  #[test]
  fn count_without_symbol_is_rejected() {
    let mut dec = decoder(RenderMode::Lif);
    assert_eq!(dec.process("x = 3, y = 1").unwrap(), None);
    assert_eq!(dec.process("3"), Err(Error::DanglingCount { line: 2 }));
  }

  #[test]
  fn space_between_count_and_symbol_is_rejected() {
    let mut dec = decoder(RenderMode::Lif);
    assert_eq!(dec.process("x = 3, y = 1").unwrap(), None);
    assert_eq!(
      dec.process("2 o!"),
      Err(Error::UnexpectedSymbol { line: 2, symbol: ' ' })
    );
  }

  #[test]
  fn comment_lines_never_touch_the_grid() {
    let mut dec = decoder(RenderMode::Lif);
    let out = feed(&mut dec, &[
      "#C 3o would fill the row",
      "x = 3, y = 1",
      "#C 3o would fill the row",
      "bo!",
    ]);
    assert_eq!(out, vec![Rendered {
      text: ".o.\n".to_owned(),
      pattern: 1,
      line: 4,
    }]);
  }
}
