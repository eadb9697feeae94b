use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use scrollscene::{
    ContentDocument, FrameEnv, RecordingRenderer, SceneConfig, SceneEngine, SectionRect,
    ShapeTable, TickIndex, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "scrollscene", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a portfolio content document.
    Validate(ValidateArgs),
    /// Sweep scroll progress over a synthetic page and print the
    /// theme/section/cross-fade timeline.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input portfolio JSON (the `info.json` document).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Number of frames to sweep from the top to the bottom of the page.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Use the banded (four-threshold) theme schedule instead of the
    /// midpoint one.
    #[arg(long)]
    banded: bool,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    viewport_height: f64,

    /// Height of each of the 7 sections, in pixels.
    #[arg(long, default_value_t = 900.0)]
    section_height: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_document(path: &Path) -> anyhow::Result<ContentDocument> {
    let f = File::open(path).with_context(|| format!("open document '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: ContentDocument =
        serde_json::from_reader(r).with_context(|| "parse portfolio JSON")?;
    Ok(doc)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path)?;
    doc.portfolio.validate()?;
    eprintln!(
        "ok: '{}' ({} experience entries, {} experiments)",
        doc.portfolio.name,
        doc.portfolio.experience.len(),
        doc.portfolio
            .experiments
            .as_ref()
            .map_or(0, |e| e.projects.len()),
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let table = ShapeTable::portfolio();
    let section_count = table.sections.len() as f64;
    let document_height = args.section_height * section_count;
    let viewport = Viewport::new(1280.0, args.viewport_height)?;

    let config = SceneConfig {
        theme_schedule: if args.banded {
            scrollscene::ThemeSchedule::Banded
        } else {
            scrollscene::ThemeSchedule::Midpoint
        },
        ..SceneConfig::default()
    };

    let mut engine = SceneEngine::new(config, table, viewport, RecordingRenderer::new())?;
    let range = (document_height - args.viewport_height).max(0.0);

    println!("frame  offset    progress  theme  section");
    let mut last_section = None;
    for frame in 0..args.frames {
        let t = if args.frames > 1 {
            frame as f64 / (args.frames - 1) as f64
        } else {
            0.0
        };
        let offset = range * t;
        engine.on_scroll(offset);

        let sections: Vec<SectionRect> = (0..7)
            .map(|i| SectionRect {
                top: i as f64 * args.section_height - offset,
                height: args.section_height,
            })
            .collect();
        let env = FrameEnv {
            document_height,
            sections,
        };

        let report = engine.frame(TickIndex(frame), &env)?;
        if report.theme_changed || report.section != last_section {
            println!(
                "{frame:>5}  {offset:>8.1}  {:>8.3}  {:<5?}  {:?}",
                report.progress, report.theme, report.section
            );
            last_section = report.section;
        }
    }

    engine.teardown()?;
    eprintln!(
        "simulated {} frames, {} renderer calls, {} live handles after teardown",
        args.frames,
        engine.renderer().calls.len(),
        engine.renderer().live_handles()
    );
    Ok(())
}
