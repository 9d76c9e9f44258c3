use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "phot", about = "Photo tools CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pad images into a target aspect ratio without cropping
    Nocrop {
        /// Input image file(s) - can specify multiple
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Target ratio: `original` or `W:H` (e.g. 1:1, 4:5)
        #[arg(long, default_value = "original")]
        ratio: String,

        /// Background fill color as hex (e.g. #ffffff)
        #[arg(long, default_value = "#ffffff")]
        color: String,

        /// Render the downscaled preview instead of full resolution
        #[arg(long)]
        preview: bool,

        /// Show statistics only, don't render
        #[arg(long)]
        stats_only: bool,

        /// Process on the remote service at this base URL instead of locally
        #[arg(long, value_name = "BASE_URL")]
        remote: Option<String>,
    },

    /// Compose 2-3 images into a collage layout
    Layout {
        /// Input image files, in cell order (2 or 3)
        #[arg(short, long, required = true, num_args = 2..=3)]
        input: Vec<PathBuf>,

        /// Output image file
        #[arg(short, long)]
        output: PathBuf,

        /// Layout template
        #[arg(long, default_value = "side-by-side", value_enum)]
        template: TemplateArg,

        /// Canvas ratio: `fit-all` or `W:H`
        #[arg(long, default_value = "fit-all")]
        ratio: String,

        /// Background fill color as hex
        #[arg(long, default_value = "#ffffff")]
        color: String,

        /// Per-image zoom factors, in input order
        #[arg(long, num_args = 0..)]
        zoom: Vec<f64>,

        /// Per-image horizontal offsets in canvas pixels, in input order
        #[arg(long, num_args = 0.., allow_negative_numbers = true)]
        offset_x: Vec<f64>,

        /// Per-image vertical offsets in canvas pixels, in input order
        #[arg(long, num_args = 0.., allow_negative_numbers = true)]
        offset_y: Vec<f64>,

        /// Explicit canvas width (skips the planner; requires --height)
        #[arg(long, requires = "height")]
        width: Option<u32>,

        /// Explicit canvas height (skips the planner; requires --width)
        #[arg(long, requires = "width")]
        height: Option<u32>,

        /// Render the downscaled preview instead of full resolution
        #[arg(long)]
        preview: bool,

        /// Show statistics only, don't render
        #[arg(long)]
        stats_only: bool,

        /// Process on the remote service at this base URL instead of locally
        #[arg(long, value_name = "BASE_URL")]
        remote: Option<String>,
    },

    /// Check the remote processing service
    Status {
        /// Base URL of the processing service
        #[arg(long)]
        server: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateArg {
    SideBySide,
    TopBottom,
    ThreeRow,
    ThreeColumn,
    OneLeftTwoRight,
    TwoLeftOneRight,
}

impl From<TemplateArg> for photo_compose::LayoutTemplate {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::SideBySide => Self::SideBySide,
            TemplateArg::TopBottom => Self::TopBottom,
            TemplateArg::ThreeRow => Self::ThreeRow,
            TemplateArg::ThreeColumn => Self::ThreeColumn,
            TemplateArg::OneLeftTwoRight => Self::OneLeftTwoRight,
            TemplateArg::TwoLeftOneRight => Self::TwoLeftOneRight,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Nocrop {
            input,
            output,
            ratio,
            color,
            preview,
            stats_only,
            remote,
        } => {
            let ratio = photo_compose::RatioSpec::parse(&ratio)?;
            let background = photo_compose::Color::from_hex(&color)?;

            match remote {
                Some(base_url) => {
                    remote_nocrop(&input, &output, &ratio, background, &base_url).await?
                }
                None => local_nocrop(&input, &output, &ratio, background, preview, stats_only).await?,
            }
        }

        Commands::Layout {
            input,
            output,
            template,
            ratio,
            color,
            zoom,
            offset_x,
            offset_y,
            width,
            height,
            preview,
            stats_only,
            remote,
        } => {
            let mut options = photo_compose::CollageOptions::default();
            options.input_files = input.clone();
            options.template = template.into();
            options.ratio = photo_compose::RatioSpec::parse(&ratio)?;
            options.background = photo_compose::Color::from_hex(&color)?;
            options.cell_settings = cell_settings(&input, &zoom, &offset_x, &offset_y);
            if let (Some(width), Some(height)) = (width, height) {
                options.dimensions = Some(photo_compose::layout::CanvasPlan::new(width, height));
            }

            match remote {
                Some(base_url) => remote_layout(&options, &output, &base_url).await?,
                None => local_layout(&options, &output, preview, stats_only).await?,
            }
        }

        Commands::Status { server } => {
            let client = photo_upload::ServiceClient::new(server);
            let health = client.health().await?;
            println!("Service status: {}", health.status);
        }
    }

    Ok(())
}

/// Zip per-image zoom/offset arguments into cell settings, padding with
/// defaults where an argument list is shorter than the input list.
fn cell_settings(
    input: &[PathBuf],
    zoom: &[f64],
    offset_x: &[f64],
    offset_y: &[f64],
) -> Vec<photo_compose::CellSettings> {
    (0..input.len())
        .map(|i| {
            let defaults = photo_compose::CellSettings::default();
            photo_compose::CellSettings {
                zoom: zoom.get(i).copied().unwrap_or(defaults.zoom),
                offset_x: offset_x.get(i).copied().unwrap_or(defaults.offset_x),
                offset_y: offset_y.get(i).copied().unwrap_or(defaults.offset_y),
            }
        })
        .collect()
}

/// Output filename for a letterboxed input: `<stem>_nocrop.<ext>`
fn nocrop_output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    output_dir.join(format!("{stem}_nocrop.{ext}"))
}

async fn local_nocrop(
    input: &[PathBuf],
    output_dir: &Path,
    ratio: &photo_compose::RatioSpec,
    background: photo_compose::Color,
    preview: bool,
    stats_only: bool,
) -> Result<()> {
    let mut options = photo_compose::LetterboxOptions::default();
    options.input_files = input.to_vec();
    options.ratio = *ratio;
    options.background = background;

    // Each file renders independently; one bad decode doesn't stop the rest.
    let mut failures = 0usize;
    for path in input {
        if let Err(e) = nocrop_one(path, output_dir, &options, preview, stats_only).await {
            eprintln!("Failed: {} ({e})", path.display());
            failures += 1;
        }
    }

    if failures == input.len() {
        bail!("All {failures} input(s) failed");
    }
    if failures > 0 {
        eprintln!("{failures} of {} input(s) failed", input.len());
    }
    Ok(())
}

async fn nocrop_one(
    path: &Path,
    output_dir: &Path,
    options: &photo_compose::LetterboxOptions,
    preview: bool,
    stats_only: bool,
) -> Result<()> {
    let image = photo_compose::load_image(path).await?;

    let stats =
        photo_compose::letterbox_statistics(image.width(), image.height(), &options.ratio)?;
    println!("{}:", path.display());
    println!("  Canvas: {}x{}", stats.canvas_width, stats.canvas_height);
    println!(
        "  Padding: {}px horizontal, {}px vertical ({:.1}% of canvas)",
        stats.padding_x,
        stats.padding_y,
        stats.padding_fraction * 100.0
    );

    if stats_only {
        return Ok(());
    }

    let canvas = if preview {
        photo_compose::generate_letterbox_preview(&image, options).await?
    } else {
        photo_compose::compose_letterbox(&image, options).await?
    };

    let out = nocrop_output_path(output_dir, path);
    photo_compose::save_image(canvas, &out).await?;
    println!("  Letterboxed → {}", out.display());
    Ok(())
}

async fn local_layout(
    options: &photo_compose::CollageOptions,
    output: &Path,
    preview: bool,
    stats_only: bool,
) -> Result<()> {
    let images = photo_compose::load_multiple_images(&options.input_files).await?;
    let sources: Vec<(u32, u32)> = images.iter().map(|i| (i.width(), i.height())).collect();

    let stats = photo_compose::calculate_statistics(&sources, options)?;
    println!("Collage Statistics:");
    println!("  Canvas: {}x{}", stats.canvas_width, stats.canvas_height);
    println!("  Cells: {} ({} filled)", stats.cell_count, stats.filled_cells);
    for (index, scale) in stats.cover_scales.iter().enumerate() {
        println!("  Image {index}: cover scale {scale:.3}");
    }
    if stats.background_fraction > 0.0 {
        println!(
            "  Background visible: {:.1}%",
            stats.background_fraction * 100.0
        );
    }

    if stats_only {
        return Ok(());
    }

    let canvas = if preview {
        photo_compose::generate_collage_preview(&images, options).await?
    } else {
        photo_compose::compose_collage(&images, options).await?
    };

    photo_compose::save_image(canvas, output).await?;
    println!("Composed → {}", output.display());
    Ok(())
}

async fn remote_nocrop(
    input: &[PathBuf],
    output_dir: &Path,
    ratio: &photo_compose::RatioSpec,
    background: photo_compose::Color,
    base_url: &str,
) -> Result<()> {
    let client = photo_upload::ServiceClient::new(base_url);

    let mut failures = 0usize;
    for path in input {
        if let Err(e) = remote_nocrop_one(&client, path, output_dir, ratio, background).await {
            eprintln!("Failed: {} ({e})", path.display());
            failures += 1;
        }
    }

    if failures == input.len() {
        bail!("All {failures} input(s) failed");
    }
    Ok(())
}

async fn remote_nocrop_one(
    client: &photo_upload::ServiceClient,
    path: &Path,
    output_dir: &Path,
    ratio: &photo_compose::RatioSpec,
    background: photo_compose::Color,
) -> Result<()> {
    let uploaded = client
        .upload_file(path, |percent| {
            println!("  Uploading {}: {percent}%", path.display());
        })
        .await?;

    let response = client
        .process_single(&photo_upload::ProcessRequest {
            upload_id: uploaded.upload_id,
            filename: uploaded.filename,
            ratio: ratio.as_param(),
            color: background.to_hex(),
        })
        .await?;
    println!(
        "  Processed: {} ({}x{}, {} bytes, expires in {}s)",
        response.filename,
        response.metadata.width,
        response.metadata.height,
        response.metadata.size,
        response.expires_in
    );

    let download = client.download(&response.download_url).await?;
    let filename = download.filename.unwrap_or(response.filename);
    let out = output_dir.join(filename);
    tokio::fs::write(&out, download.bytes).await?;
    println!("  Downloaded → {}", out.display());
    Ok(())
}

async fn remote_layout(
    options: &photo_compose::CollageOptions,
    output: &Path,
    base_url: &str,
) -> Result<()> {
    options.validate()?;
    let client = photo_upload::ServiceClient::new(base_url);

    if options.input_files.len() > client.config().max_images {
        bail!(
            "At most {} images per batch",
            client.config().max_images
        );
    }

    let mut images = Vec::new();
    for (position, path) in options.input_files.iter().enumerate() {
        let uploaded = client
            .upload_file(path, |percent| {
                println!("Uploading {}: {percent}%", path.display());
            })
            .await?;
        let settings = options
            .cell_settings
            .get(position)
            .copied()
            .unwrap_or_default();
        images.push(photo_upload::LayoutImage {
            upload_id: uploaded.upload_id,
            filename: uploaded.filename,
            position,
            zoom: settings.zoom,
            offset_x: settings.offset_x,
            offset_y: settings.offset_y,
        });
    }

    // The server plans from the same formulas; sending the locally planned
    // dimensions keeps preview and final output proportional.
    let dimensions = match options.dimensions {
        Some(plan) => Some(plan),
        None => {
            let mut sources = Vec::new();
            for path in &options.input_files {
                let (width, height) = image::image_dimensions(path)
                    .with_context(|| format!("Cannot read {}", path.display()))?;
                sources.push((width, height));
            }
            Some(photo_compose::layout::plan_canvas(
                options.template,
                &sources,
                &options.ratio,
            )?)
        }
    };

    let response = client
        .process_layout(&photo_upload::LayoutProcessRequest {
            layout_type: options.template.as_param().to_string(),
            ratio: options.ratio.as_param(),
            background_color: options.background.to_hex(),
            images,
            dimensions: dimensions.map(|d| photo_upload::Dimensions {
                width: d.width,
                height: d.height,
            }),
        })
        .await?;

    let download = client.download(&response.download_url).await?;
    tokio::fs::write(output, download.bytes).await?;
    println!("Composed → {}", output.display());
    Ok(())
}
