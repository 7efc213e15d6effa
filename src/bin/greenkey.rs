use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "greenkey", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Key the green background out of a single image.
    Key(KeyArgs),
    /// Play a green-screen clip through the compositor and dump presented frames as PNGs
    /// (requires the `media-ffmpeg` feature and `ffmpeg` on PATH).
    Clip(ClipArgs),
}

#[derive(Parser, Debug)]
struct KeyArgs {
    /// Input image (any format `image` can read).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Compositor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ClipArgs {
    /// Input video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory for `frame_NNNNN.png` outputs.
    #[arg(long)]
    out_dir: PathBuf,

    /// Display refreshes to run.
    #[arg(long, default_value_t = 30)]
    frames: u32,

    /// Compositor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Key(args) => cmd_key(args),
        Command::Clip(args) => cmd_clip(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<greenkey::CompositorConfig> {
    match path {
        Some(p) => Ok(greenkey::CompositorConfig::from_path(p)?),
        None => Ok(greenkey::CompositorConfig::default()),
    }
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_key(args: KeyArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let img = image::open(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();

    let mut buf =
        greenkey::PixelBuffer::from_rgba(greenkey::Size::new(width, height), img.into_raw())?;
    buf.chroma_key(&cfg.threshold, cfg.keying);

    create_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        buf.as_bytes(),
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_clip(args: ClipArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let mut video = greenkey::decode_clip(&args.in_path, args.frames.max(1), cfg.refresh)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut clock = greenkey::FrameClock::new(cfg.refresh);
    let mut ticker = greenkey::LoadingTicker::new(0x5eed);
    let mut comp = greenkey::Compositor::new(cfg, greenkey::CpuSurface::new());

    ticker.start(&mut clock);
    comp.mount(&mut clock);
    video.play();

    let mut written = 0u32;
    for _ in 0..args.frames {
        for ev in video.drain_events() {
            comp.handle_event(&ev, &mut clock);
        }
        clock.advance_frame();
        ticker.pump(&mut clock);

        let report = comp.pump(&video, &mut clock);
        if report.ready_signal {
            ticker.stop(&mut clock);
            tracing::info!(status = ticker.status(), progress = ticker.progress(), "video ready");
        }
        if report.cycle == Some(greenkey::CycleOutcome::Presented)
            && let Some(img) = comp.surface().to_image()
        {
            let path = args.out_dir.join(format!("frame_{written:05}.png"));
            img.save_with_format(&path, image::ImageFormat::Png)
                .with_context(|| format!("write png '{}'", path.display()))?;
            written += 1;
        }
        video.advance(clock.refresh_interval());
    }

    let stats = comp.loop_stats();
    comp.unmount(&mut clock);
    eprintln!(
        "wrote {written} frames to {} (skipped {}, failed {})",
        args.out_dir.display(),
        stats.skipped,
        stats.failed
    );
    Ok(())
}
