// gesture-commands - draw a shape, run a command
//
// Small front end over the library: recognize a trace, dispatch it against
// the configured command set, or list what is bound.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gesture_commands_lib::core::parse_trace;
use gesture_commands_lib::{AppConfig, GestureDispatcher, GestureError, Outcome};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gesture-commands", version, about = "Mouse gestures bound to commands")]
struct Cli {
    /// Config file (defaults to <config dir>/gesture-commands/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug logging unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the gesture string for a trace, e.g. "0,0 0,20 20,20"
    Recognize { points: String },
    /// Recognize a trace and resolve it to a command
    Dispatch { points: String },
    /// Show every bound gesture and what it does
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::load_or_default().context("loading default config")?,
    };

    let mut dispatcher =
        GestureDispatcher::from_config(&config).context("seeding gesture commands")?;

    match cli.command {
        Command::Recognize { points } => handle_recognize(&dispatcher, &points, cli.json),
        Command::Dispatch { points } => handle_dispatch(&mut dispatcher, &points, cli.json),
        Command::List => handle_list(&dispatcher, cli.json),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_recognize(dispatcher: &GestureDispatcher, points: &str, json: bool) -> Result<()> {
    let points = parse_trace(points)?;

    let gesture = match dispatcher.recognizer().recognize(&points) {
        Ok(gesture) => gesture,
        Err(e) => report(e),
    };

    if json {
        println!("{}", serde_json::to_string(&gesture)?);
    } else if gesture.is_empty() {
        println!("(no direction recognized)");
    } else {
        println!("{}", gesture);
    }

    Ok(())
}

fn handle_dispatch(dispatcher: &mut GestureDispatcher, points: &str, json: bool) -> Result<()> {
    let points = parse_trace(points)?;

    // observers print for the human output, the returned outcome feeds --json
    if !json {
        dispatcher.on_matched(|e| println!("✓ {} -> {}", e.gesture, e.command_id));
        dispatcher.on_unmatched(|e| println!("✗ {}?! (no command bound)", e.gesture));
    }

    let outcome = match dispatcher.dispatch(&points) {
        Ok(outcome) => outcome,
        Err(e) => report(e),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if let Outcome::Matched(matched) = &outcome {
        let info = dispatcher.gestures_info();
        if let Some(description) = info.get(&matched.gesture) {
            println!("   {}", description);
        }
    }

    Ok(())
}

fn handle_list(dispatcher: &GestureDispatcher, json: bool) -> Result<()> {
    let gestures = dispatcher.gestures_info();

    if json {
        println!("{}", serde_json::to_string_pretty(&gestures)?);
        return Ok(());
    }

    if gestures.is_empty() {
        println!("No gestures bound.");
        return Ok(());
    }

    println!("\nAvailable gestures:");
    println!("{}", "=".repeat(40));
    for (gesture, description) in &gestures {
        println!("  {:<8} {}", gesture, description);
    }
    println!("{}", "=".repeat(40));

    Ok(())
}

// Bad traces are the user's problem, not a crash
fn report(err: GestureError) -> ! {
    eprintln!("✗ {}", err.user_message());
    std::process::exit(2);
}
