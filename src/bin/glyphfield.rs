use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glyphfield::{
    CpuSurface, FixedClock, GlyphRasterizer, JsonFileStore, MemoryStore, ParleyRasterizer,
    PreferenceStore, RenderLoop, Site, SiteConfig, Surface, TextSampler, Theme, ThemeManager,
    Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "glyphfield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a PNG sequence of a scripted navigation.
    Tour(TourArgs),
    /// Render a single frame of one navigation as a PNG.
    Frame(FrameArgs),
    /// Print (and optionally toggle) the persisted theme.
    Theme(ThemeArgs),
    /// Sample text into points and print a summary.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct SiteArgs {
    /// Site configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Preference file holding the theme. In-memory when omitted.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Pretend the system prefers a light color scheme.
    #[arg(long)]
    system_light: bool,
}

#[derive(Parser, Debug)]
struct TourArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Paths visited in order, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "/projects,/about,/")]
    routes: Vec<String>,

    /// Frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Time spent on each route before navigating to the next.
    #[arg(long, default_value_t = 3.0)]
    seconds_per_route: f64,

    /// Output directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long, default_value = "frames")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Path navigated to from home before rendering.
    #[arg(long, default_value = "/projects")]
    route: String,

    /// Milliseconds elapsed after the navigation.
    #[arg(long, default_value_t = 1500.0)]
    at_ms: f64,

    /// Frames per second used to reach `at_ms`.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ThemeArgs {
    /// Preference file.
    #[arg(long)]
    store: PathBuf,

    /// Flip the theme before printing it.
    #[arg(long)]
    toggle: bool,

    /// System color-scheme preference used when nothing is stored.
    #[arg(long)]
    system_dark: bool,

    /// Storage key.
    #[arg(long, default_value = "portfolio-theme")]
    key: String,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Text to sample.
    #[arg(long)]
    text: String,

    /// Viewport width driving the responsive font size.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Font file instead of the system sans-serif stack.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Tour(args) => cmd_tour(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Theme(args) => cmd_theme(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn build_site(args: &SiteArgs) -> anyhow::Result<Site> {
    let cfg = match &args.config {
        Some(path) => SiteConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => SiteConfig::default(),
    };
    let viewport = Viewport::new(f64::from(args.width), f64::from(args.height))?;
    let prefs: Box<dyn PreferenceStore> = match &args.store {
        Some(path) => Box::new(JsonFileStore::open(path)),
        None => Box::new(MemoryStore::new()),
    };
    Ok(Site::with_parley(cfg, viewport, prefs, !args.system_light)?)
}

fn write_png(path: &Path, surface: &mut CpuSurface) -> anyhow::Result<()> {
    let (width, height) = surface.size();
    let rgba = surface.to_rgba8();
    image::save_buffer_with_format(
        path,
        &rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_tour(args: TourArgs) -> anyhow::Result<()> {
    if args.routes.is_empty() {
        anyhow::bail!("--routes must name at least one path");
    }
    if !(args.seconds_per_route > 0.0) {
        anyhow::bail!("--seconds-per-route must be > 0");
    }
    let mut site = build_site(&args.site)?;
    let mut surface = CpuSurface::new(args.site.width, args.site.height)?;
    let mut clock = FixedClock::new(args.fps)?;
    let per_route = (args.seconds_per_route * args.fps).round().max(1.0) as u64;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    site.load("#/");
    let mut routes = args.routes.iter();
    if let Some(first) = routes.next() {
        let nav = site.navigate(first);
        tracing::info!(path = %first, ?nav, "navigate");
    }

    let mut lp = RenderLoop::new();
    lp.start();
    let frames = lp.run(
        &mut clock,
        &mut site,
        &mut surface,
        |frame, site, surface| -> anyhow::Result<ControlFlow<()>> {
            let path = args.out_dir.join(format!("frame_{frame:05}.png"));
            write_png(&path, surface)?;
            if (frame + 1) % per_route != 0 {
                return Ok(ControlFlow::Continue(()));
            }
            match routes.next() {
                Some(next) => {
                    let nav = site.navigate(next);
                    tracing::info!(path = %next, ?nav, "navigate");
                    Ok(ControlFlow::Continue(()))
                }
                None => Ok(ControlFlow::Break(())),
            }
        },
    )?;

    eprintln!("wrote {frames} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(args.at_ms >= 0.0) {
        anyhow::bail!("--at-ms must be >= 0");
    }
    let mut site = build_site(&args.site)?;
    let mut surface = CpuSurface::new(args.site.width, args.site.height)?;
    let mut clock = FixedClock::new(args.fps)?;
    let frames = (args.at_ms / clock.interval_ms()).round() as u64 + 1;

    site.load("#/");
    let nav = site.navigate(&args.route);
    tracing::info!(path = %args.route, ?nav, "navigate");

    let mut lp = RenderLoop::new();
    lp.start();
    lp.run(&mut clock, &mut site, &mut surface, |frame, _, _| {
        Ok::<_, anyhow::Error>(if frame + 1 >= frames {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        })
    })?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_png(&args.out, &mut surface)?;

    eprintln!(
        "wrote {} ({:?}, {} particles)",
        args.out.display(),
        site.state(),
        site.store().len()
    );
    Ok(())
}

fn cmd_theme(args: ThemeArgs) -> anyhow::Result<()> {
    let store = JsonFileStore::open(&args.store);
    let mut theme = ThemeManager::init(store, args.key, args.system_dark);
    if args.toggle {
        theme
            .toggle()
            .with_context(|| format!("persist theme to '{}'", args.store.display()))?;
    }
    let current: Theme = theme.current();
    println!("{}", current.as_str());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let raster: Box<dyn GlyphRasterizer> = match &args.font {
        Some(path) => Box::new(ParleyRasterizer::with_font_file(path)?),
        None => Box::new(ParleyRasterizer::new()),
    };
    let cfg = SiteConfig::default().text;
    let mut sampler = TextSampler::new(raster, cfg);
    let viewport = Viewport::new(f64::from(args.width), 1.0)?;
    let cloud = sampler.sample(&args.text, viewport);

    println!("points: {}", cloud.len());
    println!("bitmap: {}x{}", cloud.width, cloud.height);
    if let Some(first) = cloud.points.first() {
        let (mut min, mut max) = (*first, *first);
        for p in &cloud.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        println!(
            "bounds: ({:.1}, {:.1}) .. ({:.1}, {:.1})",
            min.x, min.y, max.x, max.y
        );
    }
    Ok(())
}
