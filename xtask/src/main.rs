use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for liminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and doc in order
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Run the streaming window benchmark
    Bench,
    /// Build rustdoc for the workspace
    Doc,
    /// Run a short headless session through the CLI
    Smoke,
}

/// One cargo invocation: a banner label plus its arguments.
struct Task {
    label: &'static str,
    args: &'static [&'static str],
}

const FMT: Task = Task {
    label: "cargo fmt --check",
    args: &["fmt", "--all", "--", "--check"],
};
const CLIPPY: Task = Task {
    label: "cargo clippy",
    args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
};
const TEST: Task = Task {
    label: "cargo test",
    args: &["test", "--workspace"],
};
const BENCH: Task = Task {
    label: "stream window bench",
    args: &["bench", "-p", "liminal-stream", "--bench", "bench_stream_window"],
};
const DOC: Task = Task {
    label: "cargo doc",
    args: &["doc", "--workspace", "--no-deps"],
};
const SMOKE: Task = Task {
    label: "headless smoke run",
    args: &[
        "run",
        "-p",
        "liminal-cli",
        "--",
        "run",
        "--ticks",
        "300",
        "--auto-collect",
        "--hud-every",
        "100",
    ],
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let tasks: &[&Task] = match cli.command {
        Commands::Check => &[&FMT, &CLIPPY, &TEST, &DOC],
        Commands::Fmt => &[&FMT],
        Commands::Clippy => &[&CLIPPY],
        Commands::Test => &[&TEST],
        Commands::Bench => &[&BENCH],
        Commands::Doc => &[&DOC],
        Commands::Smoke => &[&SMOKE],
    };
    for task in tasks {
        run(task)?;
    }
    Ok(())
}

fn run(task: &Task) -> Result<()> {
    println!("==> Running {}", task.label);
    let status = Command::new("cargo").args(task.args).status()?;
    if !status.success() {
        anyhow::bail!("{} failed", task.label);
    }
    Ok(())
}
