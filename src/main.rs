use clap::{Parser, Subcommand};
use pictura::model::GalleryModel;
use pictura::{config, feed, output, render, resize, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pictura")]
#[command(about = "Static site generator for personal photo journals")]
#[command(long_about = "\
Static site generator for personal photo journals

Your filesystem is the data source: a flat directory of photos named
YYYY-MM-DD-title.ext. The date groups photos into days, the dashed title
becomes the caption, and the reserved marker word ('small' by default)
opts a photo out of the resized/lightbox treatment.

Source structure:

  pictures/
  ├── 2021-06-01-sunset.jpg            # June 1st, \"sunset\"
  ├── 2021-06-02-hike-trail.jpg        # title \"hike trail\"
  ├── 2021-06-02-signpost-small.jpg    # ships as-is, no lightbox
  └── notes.txt                        # non-image, ignored

Output (self-contained, works off the filesystem):

  output/
  ├── index.html, index2.html, ...     # day-grouped pages, newest first
  ├── 2021-06-01-sunset.html           # one page per photo
  ├── all.html                         # whole archive on one page
  ├── feed.xml                         # RSS 2.0
  └── pictures/                        # originals + resized copies

Run 'pictura gen-config' to generate a documented pictura.toml.")]
#[command(version)]
struct Cli {
    /// Source directory of photos
    #[arg(long, default_value = "pictures", global = true)]
    source: PathBuf,

    /// Config file
    #[arg(long, default_value = "pictura.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site: scan, resize, render, feed
    Build,
    /// Validate the source directory and config without writing anything
    Check,
    /// Print a stock pictura.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.config)?;
            let output_dir = PathBuf::from(&config.output_dir);

            println!("==> Scanning {}", cli.source.display());
            let report = scan::scan(&cli.source, &config)?;
            let mut skipped = report.skipped;

            println!("==> Preparing pictures");
            let prepared = resize::prepare_pictures(report.records, &output_dir, &config)?;
            skipped.extend(prepared.skipped);

            let model = GalleryModel::new(prepared.records);
            output::print_gallery_report(&model);
            output::print_skip_report(&skipped);

            println!("==> Rendering HTML → {}", output_dir.display());
            let summary = render::render_site(&model, &config, &output_dir)?;

            if let Err(e) = feed::write_feed(&model, &config, &output_dir) {
                eprintln!("warning: feed generation failed: {e}");
            }

            output::print_build_summary(&prepared.stats, &summary);
            println!("==> Build complete: {}", output_dir.display());
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            println!("==> Checking {}", cli.source.display());
            let report = scan::scan(&cli.source, &config)?;
            let model = GalleryModel::new(report.records);
            output::print_gallery_report(&model);
            output::print_skip_report(&report.skipped);
            println!("==> Source is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
