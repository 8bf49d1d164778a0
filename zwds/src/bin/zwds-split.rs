use anyhow::Context;
use clap::{ArgAction, Parser};
use flexi_logger::{Logger, LoggerHandle};
use std::path::PathBuf;
use zwds::io::{DEFAULT_ARCHIVE_NAME, DEFAULT_JPEG_QUALITY};
use zwds::{ImageFormat, ProcessingStep, Rgb, SplitConfig, SplitError};

#[derive(Parser, Debug)]
#[command(
    name = "zwds-split",
    about = "Split a ZWDS chart image into its thirteen boxes",
    version
)]
struct Cli {
    /// Chart image (PNG, JPEG or WebP).
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory the box JPEGs are written to.
    #[arg(long = "out-dir", value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Also pack the boxes into a zip archive.
    ///
    /// Without a value the archive is written to the output directory as
    /// `zwds_chart_boxes.zip`.
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    zip: Option<Option<PathBuf>>,

    /// Ruling color as `#rrggbb`.
    #[arg(long, value_name = "HEX", default_value_t = zwds::classify::DEFAULT_LINE_COLOR)]
    color: Rgb,

    /// Maximum RGB distance to the ruling color still counted as a line.
    #[arg(long, value_name = "F", default_value_t = zwds::classify::DEFAULT_COLOR_THRESHOLD)]
    threshold: f64,

    /// Minimum box size as a fraction of the image width and height.
    #[arg(long = "min-ratio", value_name = "F", default_value_t = zwds::region::DEFAULT_MIN_SIZE_RATIO)]
    min_ratio: f64,

    /// Number of boxes the chart must yield.
    #[arg(long, value_name = "N", default_value_t = zwds::region::DEFAULT_EXPECTED_COUNT)]
    expected: usize,

    /// JPEG quality of the crops (1-100).
    #[arg(long, value_name = "Q", default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Write the cut-out map (rulings black, background white) as PNG.
    #[arg(long = "dump-mask", value_name = "FILE")]
    dump_mask: Option<PathBuf>,

    /// More log output (-v debug, -vv trace). `RUST_LOG` applies otherwise.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) -> anyhow::Result<LoggerHandle> {
    let logger = match verbose {
        0 => Logger::try_with_env_or_str("info")?,
        1 => Logger::try_with_str("debug")?,
        _ => Logger::try_with_str("trace")?,
    };
    Ok(logger.log_to_stderr().start()?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = setup_logging(cli.verbose)?;

    let config = SplitConfig::default()
        .with_reference_color(cli.color)
        .with_color_threshold(cli.threshold)
        .with_min_box_size_ratio(cli.min_ratio)
        .with_expected_box_count(cli.expected)
        .with_jpeg_quality(cli.quality);
    config.validate()?;

    log::debug!("{}", ProcessingStep::ReadingImage);
    let grid = zwds::io::read_image(&cli.input)
        .map_err(SplitError::ImageLoadFailure)
        .with_context(|| format!("cannot split {}", cli.input.display()))?;

    if let Some(path) = &cli.dump_mask {
        let map = zwds::cut_out_map(&grid, &config)?;
        zwds::io::write_image(&map, path, ImageFormat::Png)
            .with_context(|| format!("cannot write cut-out map {}", path.display()))?;
        log::info!("cut-out map written to {}", path.display());
    }

    let images = zwds::split_chart_with_progress(&grid, &config, |step| log::debug!("{}", step))
        .with_context(|| format!("cannot split {}", cli.input.display()))?;

    let paths = zwds::write_images(&images, &cli.out_dir)
        .with_context(|| format!("cannot write boxes to {}", cli.out_dir.display()))?;
    log::info!("{} boxes written to {}", paths.len(), cli.out_dir.display());

    if let Some(zip) = cli.zip {
        let path = zip.unwrap_or_else(|| cli.out_dir.join(DEFAULT_ARCHIVE_NAME));
        zwds::write_archive(&images, &path)
            .with_context(|| format!("cannot write archive {}", path.display()))?;
        log::info!("archive written to {}", path.display());
    }

    Ok(())
}
