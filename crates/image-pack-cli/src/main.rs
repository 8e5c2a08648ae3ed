mod logger;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use logger::StderrLogger;

#[derive(Parser)]
#[command(name = "impack", about = "Pack images onto pages", version)]
struct Cli {
    /// Show per-page and per-shelf decisions
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a folder of images into a PDF or a folder of page images
    Pack {
        /// Input folder with images
        #[arg(short, long, default_value = "input_images")]
        input: PathBuf,

        /// Output PDF file (or folder of page JPEGs if not .pdf)
        #[arg(short, long, default_value = "output.pdf")]
        output: PathBuf,

        /// Options file written by `init-config`; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output paper size
        #[arg(short, long, value_enum)]
        paper: Option<PaperArg>,

        /// Output orientation
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Page rasterization resolution (pixels per inch)
        #[arg(long)]
        dpi: Option<u32>,

        /// JPEG quality for page images (1-100)
        #[arg(long)]
        quality: Option<u8>,

        /// Gap between images and around the page edge, in pixels
        #[arg(long)]
        padding: Option<u32>,

        /// Margin subtracted from the page before images are scaled to fit, in pixels
        #[arg(long)]
        margin: Option<u32>,

        /// Order in which images are placed
        #[arg(long, value_enum)]
        order: Option<OrderArg>,

        /// Show statistics only, don't compose or write pages
        #[arg(long)]
        stats_only: bool,
    },

    /// Write the default options to a JSON file
    InitConfig {
        /// Output JSON file
        #[arg(short, long, default_value = "impack.json")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    TallestFirst,
    Input,
}

impl From<PaperArg> for image_pack::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for image_pack::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<OrderArg> for image_pack::OrderingPolicy {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::TallestFirst => Self::TallestFirst,
            OrderArg::Input => Self::InputOrder,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    StderrLogger::new(level).init()?;

    match cli.command {
        Commands::Pack {
            input,
            output,
            config,
            paper,
            orientation,
            dpi,
            quality,
            padding,
            margin,
            order,
            stats_only,
        } => {
            let mut options = match config {
                Some(path) => image_pack::PackOptions::load(&path).await?,
                None => image_pack::PackOptions::default(),
            };
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation.into();
            }
            if let Some(dpi) = dpi {
                options.dpi = dpi;
            }
            if let Some(quality) = quality {
                options.jpeg_quality = quality;
            }
            if let Some(padding) = padding {
                options.padding = padding;
            }
            if let Some(margin) = margin {
                options.normalization_margin = margin;
            }
            if let Some(order) = order {
                options.ordering = order.into();
            }
            options.validate()?;

            let (page_width, page_height) = options.page_pixels();
            println!(
                "Page {:?} at {} DPI -> {} x {} px",
                options.paper_size, options.dpi, page_width, page_height
            );

            let paths = image_pack::discover_images(&input).await?;
            if paths.is_empty() {
                println!("No images found in {}", input.display());
                return Ok(());
            }

            let images = image_pack::load_images(&paths).await?;
            let geometry = options.geometry();

            if stats_only {
                let pages = image_pack::plan_pages(&images, &geometry, options.ordering)?;
                print_statistics(&image_pack::calculate_statistics(&pages, &geometry));
                return Ok(());
            }

            let packed = image_pack::pack(images, &options).await?;
            print_statistics(&image_pack::calculate_statistics(&packed.pages, &geometry));

            let target = image_pack::OutputTarget::from_path(&output);
            image_pack::export(packed.canvases, &target, &options).await?;
            match target {
                image_pack::OutputTarget::Pdf(path) => println!("Saved PDF → {}", path.display()),
                image_pack::OutputTarget::PageImages(dir) => {
                    println!("Saved pages → {}", dir.display())
                }
            }
        }

        Commands::InitConfig { output } => {
            image_pack::PackOptions::default().save(&output).await?;
            println!("Wrote default options → {}", output.display());
        }
    }

    Ok(())
}

fn print_statistics(stats: &image_pack::PackStatistics) {
    println!("Packing Statistics:");
    println!("  Images: {}", stats.images);
    println!("  Pages: {}", stats.pages);
    println!("  Shelves: {}", stats.shelves);
    if stats.forced_fits > 0 {
        println!("  Scaled to page width: {}", stats.forced_fits);
    }
    println!("  Coverage: {:.1}%", stats.coverage * 100.0);
}
