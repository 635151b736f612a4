use std::path::PathBuf;

use bottleneck::analysis;
use bottleneck::app::App;
use bottleneck::config::{self, Config, load_config, load_config_from_path};
use bottleneck::event::{Event, EventHandler};
use bottleneck::logging::init_file_logging;
use bottleneck::report::{render_json, render_report};
use bottleneck::system::collector::CollectorKind;
use bottleneck::ui;
use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;

#[derive(Parser)]
#[command(
    name = "bottleneck",
    version,
    about = "Terminal system monitor that turns CPU, memory and GPU readings into upgrade recommendations"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Metrics source: sysinfo, command
    #[arg(long)]
    collector: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Theme: dark, light, mono
    #[arg(long)]
    theme: Option<String>,

    /// Print one report to stdout and exit.
    #[arg(long, default_value_t = false)]
    once: bool,

    /// With --once, print JSON instead of text.
    #[arg(long, default_value_t = false, requires = "once")]
    json: bool,

    /// Write JSON logs to this file (filter with RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config = load_config_for_cli(&cli);
    if config.general.refresh_rate_ms == 0 {
        return Err(eyre!("refresh rate must be greater than 0"));
    }
    let kind = CollectorKind::from_config_str(&config.general.collector).ok_or_else(|| {
        eyre!(
            "unknown collector '{}'; expected 'sysinfo' or 'command'",
            config.general.collector
        )
    })?;

    if cli.once {
        return print_once(kind, cli.json);
    }

    let app = App::new(&config, kind.build()?);

    // ratatui::init also installs a panic hook that restores the terminal.
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, app).await;
    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> Result<()> {
    let mut events = EventHandler::new(app.refresh_interval);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                let action = app.map_key(key);
                app.dispatch(action);
            }
            Event::Tick => {
                let _span = tracing::info_span!("app.tick").entered();
                app.refresh_data();
            }
            Event::Resize => {}
        }
        if !app.running {
            break;
        }
        if app.take_clear_request() {
            terminal.clear()?;
        }
        terminal.draw(|frame| ui::draw(frame, &app))?;
    }

    tracing::info!("exiting monitor");
    Ok(())
}

fn print_once(kind: CollectorKind, json: bool) -> Result<()> {
    let mut collector = kind.build()?;
    let snapshot = collector.collect();
    let recommendations = analysis::analyze(&snapshot);

    if json {
        println!("{}", render_json(&snapshot, &recommendations)?);
    } else {
        print!("{}", render_report(&snapshot, &recommendations));
    }
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref collector) = cli.collector {
        config.general.collector = collector.clone();
    }
    if let Some(ref support) = cli.color {
        config.general.color_support = support.clone();
    }
    if let Some(ref theme) = cli.theme {
        config.general.theme = theme.clone();
    }

    tracing::debug!(path = ?cli.config.clone().or_else(config::config_path), "config resolved");
    config
}
