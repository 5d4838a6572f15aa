use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "carousel", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every slide of a deck into a directory of PNGs.
    Render(RenderArgs),
    /// Render a single slide as a PNG.
    Slide(SlideArgs),
    /// Parse and validate a deck without rendering it.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct RendererArgs {
    /// Directory relative image paths are resolved against (defaults to the deck's directory).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Additional font directory (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Do not load the fonts installed on this machine.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    /// Skip writing manifest.json.
    #[arg(long, default_value_t = false)]
    no_manifest: bool,

    #[command(flatten)]
    renderer: RendererArgs,
}

#[derive(Args, Debug)]
struct SlideArgs {
    /// Input deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Slide index (0-based).
    #[arg(long)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    renderer: RendererArgs,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Input deck JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Slide(args) => cmd_slide(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn renderer_for(deck_path: &Path, args: RendererArgs) -> carousel::SlideRenderer {
    let assets_root = args.assets.unwrap_or_else(|| {
        deck_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });
    carousel::SlideRenderer::new(carousel::RendererOpts {
        assets_root,
        font_dirs: args.font_dirs,
        system_fonts: !args.no_system_fonts,
        ..carousel::RendererOpts::default()
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let deck = carousel::Deck::from_path(&args.in_path)
        .with_context(|| format!("load deck '{}'", args.in_path.display()))?;
    let mut renderer = renderer_for(&args.in_path, args.renderer);
    let images = renderer.render_deck(&deck)?;

    let opts = carousel::ExportOpts {
        manifest: !args.no_manifest,
        ..carousel::ExportOpts::default()
    };
    let paths = carousel::write_pngs(&images, &args.out, &opts)?;

    let stats = renderer.stats();
    if stats.background_fallbacks > 0 || stats.logo_fallbacks > 0 {
        eprintln!(
            "warning: {} background and {} logo image(s) could not be loaded",
            stats.background_fallbacks, stats.logo_fallbacks
        );
    }
    eprintln!("wrote {} slide(s) to {}", paths.len(), args.out.display());
    Ok(())
}

fn cmd_slide(args: SlideArgs) -> anyhow::Result<()> {
    let deck = carousel::Deck::from_path(&args.in_path)
        .with_context(|| format!("load deck '{}'", args.in_path.display()))?;
    let slide = deck.slides.get(args.index).with_context(|| {
        format!(
            "slide index {} out of range (deck has {} slides)",
            args.index,
            deck.slides.len()
        )
    })?;

    let mut renderer = renderer_for(&args.in_path, args.renderer);
    let image = renderer.render_slide_at(args.index, slide, &deck.settings, deck.active_logo())?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &image.png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let deck = carousel::Deck::from_path(&args.in_path)
        .with_context(|| format!("load deck '{}'", args.in_path.display()))?;
    println!(
        "ok: {} slide(s), font '{}' {}px, logo {}",
        deck.slides.len(),
        deck.settings.font_family,
        deck.settings.font_size,
        if deck.active_logo().is_some() { "on" } else { "off" }
    );
    Ok(())
}
