use std::{
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "photobooth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built-in layouts as JSON.
    Layouts,
    /// List the built-in capture filters.
    Filters,
    /// Apply a capture filter to an image, the way the booth does at shutter time.
    Filter(FilterArgs),
    /// Render photos into a collage PNG.
    Compose(ComposeArgs),
}

#[derive(Parser, Debug)]
struct FilterArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Filter id (see `photobooth filters`).
    #[arg(long, default_value = "normal")]
    filter: String,

    /// Mirror horizontally before filtering.
    #[arg(long)]
    mirror: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Built-in layout id.
    #[arg(long, default_value = "strip-4", conflicts_with = "layout_file")]
    layout: String,

    /// Custom layout JSON, used instead of `--layout`.
    #[arg(long)]
    layout_file: Option<PathBuf>,

    /// Photo files in slot order.
    #[arg(long = "photo")]
    photos: Vec<PathBuf>,

    /// Output PNG path. Defaults to `photobooth-<millis>.png` in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Compositor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Branding line drawn under the grid.
    #[arg(long, default_value = photobooth::DEFAULT_BRANDING)]
    branding: String,

    /// External caption program; receives the PNG on stdin.
    #[arg(long)]
    caption_cmd: Option<PathBuf>,

    /// Argument passed to the caption program (repeatable).
    #[arg(long = "caption-arg", requires = "caption_cmd")]
    caption_args: Vec<String>,

    /// Caption program timeout in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    caption_timeout_ms: u64,

    /// Also print the PNG as a data URL.
    #[arg(long)]
    data_url: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Layouts => cmd_layouts(),
        Command::Filters => cmd_filters(),
        Command::Filter(args) => cmd_filter(args),
        Command::Compose(args) => cmd_compose(args),
    }
}

fn cmd_layouts() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&photobooth::builtin_layouts())
        .context("serialize layouts")?;
    println!("{json}");
    Ok(())
}

fn cmd_filters() -> anyhow::Result<()> {
    for f in photobooth::builtin_filters() {
        println!("{}\t{}\t{}", f.id, f.name, f.css);
    }
    Ok(())
}

fn cmd_filter(args: FilterArgs) -> anyhow::Result<()> {
    let filter = photobooth::filter_by_id(&args.filter)?;
    let frame = image::open(&args.in_path)
        .with_context(|| format!("open image '{}'", args.in_path.display()))?
        .to_rgba8();
    let shot = photobooth::CapturedPhoto::capture(&frame, &filter, args.mirror)?;
    let png = shot
        .encoded_bytes()
        .context("captured shot carries no PNG payload")?;
    std::fs::write(&args.out, png)
        .with_context(|| format!("write PNG '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({}x{}, filter {})",
        args.out.display(),
        frame.width(),
        frame.height(),
        shot.filter_id()
    );
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let layout = match &args.layout_file {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read layout '{}'", path.display()))?;
            photobooth::LayoutSpec::from_json(&json)?
        }
        None => photobooth::layout_by_id(&args.layout)?,
    };
    let config = match &args.config {
        Some(path) => photobooth::CompositorConfig::from_path(path)?,
        None => photobooth::CompositorConfig::default(),
    };

    let mut photos = Vec::with_capacity(args.photos.len());
    for path in &args.photos {
        let bytes =
            std::fs::read(path).with_context(|| format!("read photo '{}'", path.display()))?;
        photos.push(photobooth::CapturedPhoto::from_encoded(bytes, "normal"));
    }

    let compositor = photobooth::Compositor::new(config)?;
    let composite = compositor.render(&layout, &photos, &args.branding)?;
    for i in composite.skipped_photos() {
        eprintln!("warning: photo {} ({}) was skipped", i, args.photos[*i].display());
    }
    let png = composite.encode_png()?;

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(photobooth::export_file_name(millis)));
    std::fs::write(&out, &png).with_context(|| format!("write PNG '{}'", out.display()))?;

    let fallback = photobooth::default_captions()
        .into_iter()
        .next()
        .unwrap_or_default();
    let caption = match &args.caption_cmd {
        Some(program) => {
            let provider = photobooth::CommandCaptionProvider::new(program)
                .with_args(&args.caption_args)
                .with_timeout(Duration::from_millis(args.caption_timeout_ms));
            photobooth::caption_or_fallback(&provider, &png, &fallback)
        }
        None => {
            let provider = photobooth::StaticCaptionProvider::default();
            photobooth::caption_or_fallback(&provider, &png, &fallback)
        }
    };

    eprintln!(
        "wrote {} ({}x{}, {} photos)",
        out.display(),
        composite.width(),
        composite.height(),
        photos.len()
    );
    println!("{caption}");
    if args.data_url {
        println!("{}", photobooth::png_data_url(&png));
    }
    Ok(())
}
