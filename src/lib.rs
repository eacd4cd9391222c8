//! Decode Run-Length-Encoded cellular-automaton patterns and render them as
//! compact text: Unicode half blocks, braille cells or a plain lif grid.
//!
//! The decoder is a line-oriented state machine; feed it one line at a time
//! and collect a [`Rendered`] whenever a pattern terminator arrives:
//!
//! ```
//! use rleview::{Config, Decoder};
//!
//! let mut dec = Decoder::new(Config::default());
//! assert!(dec.process("x = 3, y = 2").unwrap().is_none());
//! let out = dec.process("obo$b2o!").unwrap().unwrap();
//! assert_eq!(out.text, "\u{2580}\u{2584}\u{2588}\n");
//! assert_eq!((out.pattern, out.line), (1, 2));
//! ```

pub mod cell;
pub mod export;
mod error;
mod grid;
mod rle;

pub use error::Error;
pub use grid::Grid;
pub use rle::{Config, Decoder, RenderMode, Rendered};
