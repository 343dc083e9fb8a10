use std::collections::HashSet;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::num::NonZero;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread::sleep;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use wordclock::{GeneratorBuilder, Grid, Position, SentenceOrder};

const ANSI_CLEAR: &str = "\x1b[2J";

/// Lay out every time of day as words on a letter grid.
///
/// Writes a JSON object mapping each time ("HH:MM") to the [x, y] cells spelling it.
/// Progress and the finished grid are shown on stderr.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Grid size as WIDTHxHEIGHT, e.g. 22x22
    #[arg(value_parser = parse_size)]
    size: (NonZero<usize>, NonZero<usize>),

    /// Seed for the random source; a fresh one is drawn and logged if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Give up after this many fresh grids; 0 keeps trying forever
    #[arg(short = 'n', long, default_value_t = 0)]
    max_attempts: usize,

    /// Order sentences are placed in: shared-prefix or as-given
    #[arg(long, default_value_t = SentenceOrder::SharedPrefix)]
    order: SentenceOrder,

    /// Leave unused cells blank instead of filling them with random letters
    #[arg(long)]
    no_fill: bool,

    /// Write the JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Afterwards, highlight each time in turn
    #[arg(long)]
    replay: bool,

    /// Log every sentence as it is placed
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum SizeParseError {
    #[error("expected WIDTHxHEIGHT, got \"{0}\"")]
    Format(String),
    #[error("width and height must be positive")]
    Zero,
}

fn parse_size(size: &str) -> Result<(NonZero<usize>, NonZero<usize>), SizeParseError> {
    let (width, height) = size.split_once('x').ok_or_else(|| SizeParseError::Format(size.to_string()))?;
    let width: usize = width.trim().parse().map_err(|_| SizeParseError::Format(size.to_string()))?;
    let height: usize = height.trim().parse().map_err(|_| SizeParseError::Format(size.to_string()))?;

    match (NonZero::new(width), NonZero::new(height)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(SizeParseError::Zero),
    }
}

/// Log at `info`, or `debug` if `verbose`. `RUST_LOG` overrides either.
fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    builder.init();
}

/// Clear the terminal and show `text` over the grid.
fn display(text: &str, grid: &Grid, highlight: &HashSet<Position>) {
    let (width, _) = grid.dims();
    let mut stderr = std::io::stderr().lock();
    // nothing useful to do if the terminal has gone away
    let _ = write!(stderr, "{ANSI_CLEAR}{text}\n{}\n{}", "=".repeat(width), grid.render(highlight));
    let _ = stderr.flush();
}

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let generator = GeneratorBuilder::with_dims(cli.size)
        .order(cli.order)
        .max_attempts(NonZero::new(cli.max_attempts))
        .build()
        .map_err(|reasons| reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let (width, height) = generator.dims();
    let mut layout = generator.generate_with_progress(&mut rng, |progress| {
        display(
            &format!(
                "Best attempt so far {}/{} [{}% of {width}x{height}]",
                progress.placed,
                progress.total,
                100 * progress.placed / progress.total.max(1),
            ),
            progress.grid,
            &HashSet::new(),
        );
    })?;

    display("Success!", layout.grid(), &HashSet::new());
    if !cli.no_fill {
        layout.fill(&mut rng);
    }

    match &cli.output {
        Some(path) => layout.write_json(BufWriter::new(File::create(path)?))?,
        None => layout.write_json(std::io::stdout().lock())?,
    }

    if cli.replay {
        for (key, cells) in layout.highlights() {
            display(&key.to_string(), layout.grid(), &cells.into_iter().collect());
            sleep(Duration::from_millis(250));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_size, SizeParseError};

    #[test]
    fn parses_width_by_height() {
        let (width, height) = parse_size("22x18").unwrap();
        assert_eq!((width.get(), height.get()), (22, 18));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(matches!(parse_size("22"), Err(SizeParseError::Format(_))));
        assert!(matches!(parse_size("axb"), Err(SizeParseError::Format(_))));
        assert!(matches!(parse_size("-3x4"), Err(SizeParseError::Format(_))));
        assert!(matches!(parse_size("0x4"), Err(SizeParseError::Zero)));
    }
}
