use caption_album::{album, config, output};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn version_string() -> &'static str {
    let on_tag = env!("CAPTION_ALBUM_RELEASE");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("CAPTION_ALBUM_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "caption-album")]
#[command(about = "Render a photo album into captioned images")]
#[command(long_about = "\
Render a photo album into captioned images

The album is a JSON file listing pictures and their captions, plus album-wide
settings that any picture may override:

  {
    \"name\": \"Holidays\",
    \"pictures\": {
      \"scotland.jpg\": {\"caption\": \"Shigiddy whoo!\"},
      \"japan.jpg\":    {\"caption\": \"Zen\", \"style\": \"text\"}
    },
    \"configuration\": {
      \"style\": \"polaroid\",
      \"size\": [320, 320],
      \"file-format\": \"jpg\"
    }
  }

Picture files are resolved relative to the JSON file. Each picture is written
as '<name> (<n>).<file-format>'. A picture that cannot be rendered is reported
and skipped; the rest of the album is still produced.")]
#[command(version = version_string())]
struct Cli {
    /// Album description file
    #[arg(short = 'i', long = "json")]
    json: PathBuf,

    /// Output directory [default: the album name]
    #[arg(short = 'o', long = "output-folder")]
    output_folder: Option<PathBuf>,

    /// Show diagnostic output
    #[arg(short, long)]
    verbose: bool,
}

/// Diagnostics go to stderr; stdout carries the album report.
///
/// `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let album = config::load_album(&cli.json)?;
    let report = album::generate(&album, cli.output_folder.as_deref());
    output::print_report(&report);

    Ok(())
}
