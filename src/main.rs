use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use rleview::{Config, Decoder, RenderMode};

/// Displays RLE patterns in a file as Unicode block, braille or lif output.
#[derive(Parser)]
#[command(version)]
struct Args {
  /// File containing RLE patterns
  file: PathBuf,

  /// Output using unicode braille
  #[arg(short, long, conflicts_with = "lif")]
  braille: bool,

  /// Output using lif pattern
  #[arg(short, long)]
  lif: bool,

  /// Minimum width for patterns to get displayed
  #[arg(long, default_value_t = 0)]
  min_width: usize,

  /// Minimum height for patterns to get displayed
  #[arg(long, default_value_t = 0)]
  min_height: usize,

  /// Log skipped patterns and decode details to stderr
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  let log_level = if args.verbose {
    tracing::Level::DEBUG
  } else {
    tracing::Level::WARN
  };
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
    )
    .with_writer(std::io::stderr)
    .init();

  let mode = if args.braille {
    RenderMode::Braille
  } else if args.lif {
    RenderMode::Lif
  } else {
    RenderMode::Block
  };
  let mut decoder = Decoder::new(Config {
    mode,
    min_width: args.min_width,
    min_height: args.min_height,
  });

  let file = File::open(&args.file)
    .with_context(|| format!("cannot open {}", args.file.display()))?;
  for line in BufReader::new(file).lines() {
    let line = line.with_context(|| format!("cannot read {}", args.file.display()))?;
    match decoder.process(&line) {
      Ok(Some(rendered)) => {
        println!("{}", rendered.text);
        println!("{} {}", rendered.pattern, rendered.line);
      }
      Ok(None) => {}
      // pattern-local: the decoder already dropped the pattern and will
      // pick up at the next header
      Err(err) => tracing::warn!("{}", err),
    }
  }
  Ok(())
}
