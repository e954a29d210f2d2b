use anyhow::Context;
use clap::{Parser, Subcommand};
use liminal_assets::ItemCatalog;
use liminal_input::{Action, Intent};
use liminal_kernel::{SessionConfig, World};
use liminal_render::{Presenter, RecordingScene, SceneAdapter, TextHud};
use liminal_stream::FrameTimer;
use liminal_tools::WorldInspector;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "liminal-cli", about = "Headless runner for liminal sessions")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run a scripted session
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        /// RNG seed
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Seconds per tick
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Comma-separated steps, each a `+`-joined set of keys
        /// (w,a,s,d,shift,space,e,q,f, or `use:<item name>`).
        /// The route repeats until the tick count is reached.
        #[arg(short, long, default_value = "w,w,w,w,d")]
        route: String,
        /// Hold sprint on every tick
        #[arg(long)]
        sprint: bool,
        /// Try to collect on every tick
        #[arg(long)]
        auto_collect: bool,
        /// Interact with any portal in reach
        #[arg(long)]
        auto_interact: bool,
        /// Session config (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Item catalog (JSON)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print a status line every N ticks (0 disables)
        #[arg(long, default_value = "60")]
        hud_every: u64,
    },
    /// Print the default session config as YAML
    Config,
    /// Print the item catalog as JSON, or write it to a file
    Catalog {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match cli.command {
        Commands::Info => {
            println!("liminal-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", liminal_input::crate_info());
            println!("assets: {}", liminal_assets::crate_info());
            println!("tilegen: {}", liminal_tilegen::crate_info());
            println!("stream: {}", liminal_stream::crate_info());
            println!("kernel: {}", liminal_kernel::crate_info());
            println!("render: {}", liminal_render::crate_info());
            println!("tools: {}", liminal_tools::crate_info());
        }
        Commands::Run {
            ticks,
            seed,
            dt,
            route,
            sprint,
            auto_collect,
            auto_interact,
            config,
            catalog,
            hud_every,
        } => {
            let config = match config {
                Some(path) => SessionConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => SessionConfig::default(),
            };
            let catalog = match catalog {
                Some(path) => ItemCatalog::load(&path)
                    .with_context(|| format!("loading catalog {}", path.display()))?,
                None => ItemCatalog::builtin(),
            };
            let steps = parse_route(&route)?;
            if !(dt.is_finite() && dt > 0.0) {
                anyhow::bail!("dt must be a positive number of seconds, got {dt}");
            }

            let mut extras = Vec::new();
            if sprint {
                extras.push(Action::Sprint);
            }
            if auto_collect {
                extras.push(Action::Collect);
            }
            if auto_interact {
                extras.push(Action::Interact);
            }

            let mut world = World::new(config, catalog, seed)?;
            tracing::info!(seed, ticks, theme = %world.theme(), "session started");
            let mut scene = RecordingScene::new();
            let adapter = SceneAdapter::new();
            adapter.apply(&mut scene, &world.drain_events());
            let mut timer = FrameTimer::new(120);
            let hud = TextHud::new();

            println!("Session: seed={seed} ticks={ticks} dt={dt} route={route}");
            for tick in 0..ticks {
                let step = &steps[(tick % steps.len() as u64) as usize];
                let intent = Intent::from_actions(step.iter().chain(extras.iter()));

                let started = Instant::now();
                let snapshot = world.step(&intent, dt);
                adapter.apply(&mut scene, &world.drain_events());
                timer.record(started.elapsed());

                if hud_every > 0 && (tick + 1) % hud_every == 0 {
                    println!("{}", TextHud::status_line(&snapshot));
                }
            }

            tracing::info!(
                tick = world.tick(),
                theme = %world.theme(),
                resident = world.stream_stats().total_resident,
                "session finished"
            );
            println!();
            print!("{}", hud.present(&world.snapshot()));
            println!("{}", WorldInspector::summary(&world));
            if let Some(info) = WorldInspector::inspect_tile(&world, world.observer_tile()) {
                println!("{info}");
            }
            println!(
                "Scene: tiles={} objects={} visible={}",
                scene.tile_count(),
                scene.object_count(),
                scene.visible_count()
            );
            println!(
                "Tick time over last {}: avg={:?} min={:?} max={:?}",
                timer.count(),
                timer.average(),
                timer.min(),
                timer.max()
            );
        }
        Commands::Config => {
            print!("{}", SessionConfig::default().to_yaml_string()?);
        }
        Commands::Catalog { out } => {
            let catalog = ItemCatalog::builtin();
            match out {
                Some(path) => {
                    catalog.save(&path)?;
                    println!("Wrote {} items to {}", catalog.len(), path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&catalog)?),
            }
        }
    }

    Ok(())
}

/// Parse `w+shift,d,,e+use:Energy Drink` into per-tick action sets. Empty
/// steps idle.
fn parse_route(route: &str) -> anyhow::Result<Vec<Vec<Action>>> {
    let mut steps = Vec::new();
    for step in route.split(',') {
        let mut actions = Vec::new();
        for key in step.split('+').map(str::trim).filter(|k| !k.is_empty()) {
            let action =
                Action::from_key(key).with_context(|| format!("unknown route key `{key}`"))?;
            actions.push(action);
        }
        steps.push(actions);
    }
    if steps.is_empty() {
        anyhow::bail!("route has no steps");
    }
    Ok(steps)
}
