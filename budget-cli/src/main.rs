use anyhow::{Context, Result, bail};
use budget_core::{RecordStore, current_month, is_month_key, load_demo};
use budget_report::MonthView;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod home;
mod shell;

use config::Config;
use shell::Shell;

#[derive(Parser, Debug)]
#[command(name = "budget", version, about = "Household budget: plan the month, record receipts, compare")]
struct Cli {
    /// Month to open (YYYY-MM); defaults to the current month
    #[arg(long, global = true)]
    month: Option<String>,

    /// Start from the demo data set
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive shell on stdin (default)
    Shell,

    /// Run shell commands from a file, one per line
    Run {
        script: PathBuf,
    },

    /// Print the full report of the demo month
    Demo {
        /// Print the JSON view instead of text
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.budget/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let Cli {
        month,
        demo,
        command,
    } = Cli::parse();
    let cfg = config::load_config()?;
    init_tracing(&cfg.session.log_level);

    match command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let mut sh = open_shell(month, demo, &cfg)?;
            shell::run_interactive(&mut sh)?;
        }

        Command::Run { script } => {
            let source = std::fs::read_to_string(&script)
                .with_context(|| format!("read {}", script.display()))?;
            let mut sh = open_shell(month, demo, &cfg)?;
            shell::run_script(&mut sh, &script.display().to_string(), &source, &mut io::stdout().lock())?;
        }

        Command::Demo { json } => {
            let mut store = RecordStore::new();
            let month = load_demo(&mut store)?;
            let view = MonthView::build(&store, month);
            if json {
                println!("{}", view.to_json()?);
            } else {
                print!("{}", view.render_text(&cfg.display.currency_prefix, cfg.display.chart_width));
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config(&cfg)?,
        },
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level; logs go to stderr.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_shell(month: Option<String>, demo: bool, cfg: &Config) -> Result<Shell> {
    let mut sh = Shell::new(&cfg.display);
    if demo {
        sh.load_demo()?;
    }
    match month {
        Some(m) if is_month_key(&m) => sh.select_month(&m)?,
        Some(m) => bail!("--month expects YYYY-MM, got \"{m}\""),
        // --demo already picked its own month
        None if demo => {}
        None => sh.select_month(&current_month(cfg.session.tz()?))?,
    }
    Ok(sh)
}
