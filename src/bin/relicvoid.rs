use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use relicvoid::MediaPlayer as _;

#[derive(Parser, Debug)]
#[command(name = "relicvoid", version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Config JSON; every field is optional.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Viewport width in CSS pixels.
    #[arg(long, global = true)]
    width: Option<f64>,

    /// Viewport height in CSS pixels.
    #[arg(long, global = true)]
    height: Option<f64>,

    /// Device pixel ratio (clamped to 1..=2 for the backing buffer).
    #[arg(long, global = true)]
    dpr: Option<f64>,

    /// Seed for particles, glitches and the starting track.
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the lore typewriter in the terminal.
    Lore(LoreArgs),
    /// Render one void frame as a PNG.
    Frame(FrameArgs),
    /// Render a sequence of void frames as PNGs.
    Frames(FramesArgs),
    /// Print the discovered playlist.
    Tracks(TracksArgs),
    /// Run the whole experience headless in virtual time.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct LoreArgs {
    /// Print the timeline immediately instead of playing it in real time.
    #[arg(long)]
    instant: bool,

    /// Jump straight to the end of the lore.
    #[arg(long)]
    skip_lore: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Number of ticks to run before capturing.
    #[arg(long, default_value_t = 1)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[arg(long)]
    count: u64,

    /// Directory receiving `frame_00001.png`, `frame_00002.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct TracksArgs {
    /// Assets directory; defaults to the configured one.
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Virtual seconds to run.
    #[arg(long, default_value_t = 20.0)]
    seconds: f64,

    /// Press continue at this virtual time (ms). Without it, continue is
    /// pressed as soon as the control becomes available.
    #[arg(long)]
    press_continue_at: Option<u64>,

    /// Write the last void frame here.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Looping backdrop video locator, played alongside the audio.
    #[arg(long)]
    backdrop: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.global)?;
    match cli.cmd {
        Command::Lore(args) => cmd_lore(&config, args),
        Command::Frame(args) => cmd_frame(&config, args),
        Command::Frames(args) => cmd_frames(&config, args),
        Command::Tracks(args) => cmd_tracks(&config, args),
        Command::Simulate(args) => cmd_simulate(config, args),
    }
}

fn load_config(global: &GlobalArgs) -> anyhow::Result<relicvoid::IntroConfig> {
    let mut config = match &global.config {
        Some(path) => relicvoid::IntroConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => relicvoid::IntroConfig::default(),
    };
    config.apply_env();
    if let Some(w) = global.width {
        config.viewport.width = w;
    }
    if let Some(h) = global.height {
        config.viewport.height = h;
    }
    if let Some(dpr) = global.dpr {
        config.viewport.device_pixel_ratio = dpr;
    }
    if let Some(seed) = global.seed {
        config.void.seed = seed;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn cmd_lore(config: &relicvoid::IntroConfig, args: LoreArgs) -> anyhow::Result<()> {
    let mut tw = relicvoid::Typewriter::new(config.lore.resolved_lines(), config.lore.timing)?;

    if args.skip_lore {
        tw.skip();
        println!("lore skipped");
        return Ok(());
    }

    if args.instant {
        let mut t = Duration::ZERO;
        let mut step = tw.start();
        loop {
            if let Some(view) = &step.view {
                println!(
                    "{:>6} ms  {:<28} {}",
                    t.as_millis(),
                    format!("{:?}", tw.state()),
                    view.rendered()
                );
            }
            if step.finished {
                break;
            }
            let Some(delay) = step.delay else { break };
            t += delay;
            step = tw.advance();
        }
        println!("complete at {} ms", t.as_millis());
        return Ok(());
    }

    let mut scheduler = relicvoid::Scheduler::<()>::new(config.void.refresh_hz)?;
    let pacer = relicvoid::RealtimePacer::new(scheduler.frame_interval());
    let mut changed_at = Duration::ZERO;
    let step = tw.start();
    if let Some(delay) = step.delay {
        scheduler.after(delay, ());
    }

    let mut out = std::io::stdout().lock();
    while !tw.is_done() {
        let now = pacer.sleep_until_next(scheduler.next_due());
        while scheduler.pop_due(now).is_some() {
            let step = tw.advance();
            if step.view.is_some() {
                changed_at = scheduler.now();
            }
            if let Some(delay) = step.delay {
                scheduler.after(delay, ());
            }
        }
        let view = tw.view();
        let opacity = view.opacity_at(now.saturating_sub(changed_at), config.fade_ease);
        write!(out, "\r\x1b[2K{}", paint_line(view, opacity))?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

/// Terminal rendition of a lore view: opacity maps onto the 24-step grey ramp.
fn paint_line(view: &relicvoid::LoreView, opacity: f64) -> String {
    let top = match view.tone {
        relicvoid::Tone::Normal => 23.0,
        relicvoid::Tone::Muted => 14.0,
    };
    let level = (232.0 + (top * opacity.clamp(0.0, 1.0)).round()) as u8;
    format!("\x1b[38;5;{level}m{}\x1b[0m", view.rendered())
}

fn render_ticks(
    config: &relicvoid::IntroConfig,
    ticks: u64,
    mut on_tick: impl FnMut(u64, &relicvoid::CpuSurface) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let viewport = config.viewport;
    let mut surface = relicvoid::CpuSurface::new(viewport)?;
    let mut void_loop = relicvoid::VoidLoop::new(config.void.particle_count, config.void.seed);
    for i in 1..=ticks {
        void_loop.tick(&mut surface, viewport)?;
        on_tick(i, &surface)?;
    }
    Ok(())
}

fn cmd_frame(config: &relicvoid::IntroConfig, args: FrameArgs) -> anyhow::Result<()> {
    let mut last = None;
    render_ticks(config, args.frame, |i, surface| {
        if i == args.frame {
            last = Some(surface.readback());
        }
        Ok(())
    })?;
    let frame = match last {
        Some(frame) => frame,
        None => relicvoid::CpuSurface::new(config.viewport)?.readback(),
    };
    write_frame(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(config: &relicvoid::IntroConfig, args: FramesArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    render_ticks(config, args.count, |i, surface| {
        let path = args.out_dir.join(format!("frame_{i:05}.png"));
        write_frame(&surface.readback(), &path)
    })?;
    eprintln!("wrote {} frames to {}", args.count, args.out_dir.display());
    Ok(())
}

fn write_frame(frame: &relicvoid::FrameRGBA, path: &Path) -> anyhow::Result<()> {
    relicvoid::write_png(frame, path).with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_tracks(config: &relicvoid::IntroConfig, args: TracksArgs) -> anyhow::Result<()> {
    let dir = args.assets.unwrap_or_else(|| config.audio.assets_dir.clone());
    let tracks = relicvoid::discover_tracks(&dir, &config.audio.src_prefix);
    for (i, t) in tracks.iter().enumerate() {
        println!("{i:>3}  {:<24} {}", t.name, t.src);
    }
    println!("{} track(s)", tracks.len());
    Ok(())
}

fn cmd_simulate(config: relicvoid::IntroConfig, args: SimulateArgs) -> anyhow::Result<()> {
    if !args.seconds.is_finite() || args.seconds < 0.0 {
        anyhow::bail!("--seconds must be a non-negative number");
    }
    let end = Duration::from_secs_f64(args.seconds);
    let step = Duration::from_secs(1) / config.void.refresh_hz;
    let press_at = args.press_continue_at.map(Duration::from_millis);

    let surface = relicvoid::CpuSurface::new(config.viewport)?;
    let mut exp = relicvoid::Experience::new(config, surface, relicvoid::HeadlessPlayer::new())?;
    if let Some(src) = &args.backdrop {
        let mut backdrop = relicvoid::HeadlessPlayer::new();
        backdrop.load(src);
        exp = exp.with_backdrop(Box::new(backdrop));
    }
    exp.start();

    let mut press_attempted = false;
    let mut press_accepted = false;
    while exp.now() < end {
        exp.run_until((exp.now() + step).min(end))?;
        if press_attempted {
            continue;
        }
        let due = match press_at {
            Some(at) => exp.now() >= at,
            None => exp.scene().is_enabled(relicvoid::Control::Continue),
        };
        if due {
            press_attempted = true;
            press_accepted = exp.press_continue();
            if !press_accepted {
                tracing::warn!(at_ms = exp.now().as_millis() as u64, "continue was not available");
            }
        }
    }

    if let Some(out) = &args.out {
        write_frame(&exp.surface().readback(), out)?;
        eprintln!("wrote {}", out.display());
    }

    let summary = serde_json::json!({
        "virtual_ms": exp.now().as_millis() as u64,
        "phase": format!("{:?}", exp.scene().phase()),
        "lore_completed_at_ms": exp.lore_completed_at().map(|t| t.as_millis() as u64),
        "continue_pressed": press_accepted,
        "void_frames": exp.void_loop().frame(),
        "tracks": exp.playlist().tracks().len(),
        "track": exp.playlist().current().map(|t| t.name.clone()),
        "label": exp.playlist().label(),
        "playing": !exp.playlist().player().paused,
        "backdrop_playing": exp.playlist().backdrop().map(|b| !b.is_paused()),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
