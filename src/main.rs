mod app;
mod assistant;
mod cli;
mod config;
mod error;
mod logic;
mod models;
mod simulator;
mod ui;

use anyhow::Context;
use app::{App, Screen};
use clap::Parser;
use cli::{Cli, Commands, EvaluateArgs};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use logic::calculations::fmt_one_decimal;
use logic::{DecisionEngine, Evaluation};
use models::{CropProfile, CropType, SensorSnapshot};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use ui::screens::{AssistantScreen, DashboardScreen};

/// Set while the alternate screen is up; log output is discarded meanwhile.
static TUI_ACTIVE: AtomicBool = AtomicBool::new(false);

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Init) => {
            Config::setup_interactive().context("Interactive setup failed")?;
        }
        Some(Commands::Check) => run_check(cli.config)?,
        Some(Commands::Profiles) => {
            let config = load_config(cli.config)?;
            print_profiles(&config)?;
        }
        Some(Commands::Ask { text }) => {
            let question = text.join(" ");
            match assistant::respond(&question) {
                Some(reply) => println!("{}", reply.text),
                None => println!("Ask me something - try \"help\"."),
            }
        }
        Some(Commands::Evaluate(args)) => {
            let config = load_config(cli.config)?;
            run_evaluate(&config, &args)?;
        }
        None => {
            let config = load_config(cli.config)?;
            run_dashboard(&config)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(|| -> Box<dyn io::Write> {
            if TUI_ACTIVE.load(Ordering::Relaxed) {
                Box::new(io::sink())
            } else {
                Box::new(io::stderr())
            }
        })
        .init();
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load(path).context("Failed to load configuration")
}

fn run_check(path: Option<PathBuf>) -> anyhow::Result<()> {
    match Config::resolved_path(path.as_ref()) {
        Some(p) => println!("Config file: {}", p.display()),
        None => println!("Config file: none found, using built-in defaults"),
    }

    let config = load_config(path)?;
    let table = config
        .crop_profile_table()
        .context("Invalid crop profile overrides")?;

    let engine = DecisionEngine::new(table);
    let overrides = config.crop_profiles.as_ref().map_or(0, |m| m.len());
    println!("Farm:      {}", config.farm.name);
    println!("Crop:      {}", config.crop());
    println!("Threshold: {}%", config.farm.moisture_threshold_pct);
    println!(
        "Mode:      {}",
        if config.farm.auto_mode { "auto" } else { "manual" }
    );
    println!(
        "Profiles:  {} crops ({} overridden)",
        engine.profiles().len(),
        overrides
    );
    println!(
        "Simulator: every {}s, seed {}",
        config.simulator.interval_secs,
        config
            .simulator
            .seed
            .map_or_else(|| "random".to_string(), |s| s.to_string())
    );
    let rules: Vec<&str> = engine.alert_rules().into_iter().map(|(_, name)| name).collect();
    println!("Alerts:    {}", rules.join(", "));
    println!();
    println!("Configuration OK");
    Ok(())
}

fn print_profiles(config: &Config) -> anyhow::Result<()> {
    let table = config.crop_profile_table()?;

    println!(
        "{:<10} {:>12} {:>12} {:>15}",
        "Crop", "Temp (°C)", "Humidity (%)", "Soil moist. (%)"
    );
    for (crop, profile) in table.iter() {
        let marker = if *profile != CropProfile::builtin(*crop) {
            " *"
        } else {
            ""
        };
        println!(
            "{:<10} {:>12} {:>12} {:>15}{}",
            crop.as_str(),
            profile.temperature_c.to_string(),
            profile.humidity_pct.to_string(),
            profile.soil_moisture_pct.to_string(),
            marker
        );
    }
    if config.crop_profiles.is_some() {
        println!();
        println!("* overridden in config");
    }
    Ok(())
}

fn read_snapshot(path: &Path) -> anyhow::Result<SensorSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = serde_json::from_str(&content)
        .with_context(|| format!("Invalid snapshot JSON in {}", path.display()))?;
    Ok(snapshot)
}

fn snapshot_from_args(config: &Config, args: &EvaluateArgs) -> anyhow::Result<SensorSnapshot> {
    if let Some(path) = &args.snapshot {
        return read_snapshot(path);
    }

    let (Some(moisture), Some(temperature), Some(humidity)) =
        (args.moisture, args.temperature, args.humidity)
    else {
        anyhow::bail!("--moisture, --temperature and --humidity are required without --snapshot");
    };

    let crop = match &args.crop {
        Some(name) => CropType::from_str_lossy(name),
        None => config.crop(),
    };

    Ok(SensorSnapshot::new(moisture, temperature, humidity)
        .with_crop(crop)
        .with_threshold(
            args.threshold
                .unwrap_or(config.farm.moisture_threshold_pct),
        )
        .with_auto_mode(config.farm.auto_mode && !args.manual)
        .with_history(args.history.clone()))
}

fn run_evaluate(config: &Config, args: &EvaluateArgs) -> anyhow::Result<()> {
    let snapshot = snapshot_from_args(config, args)?;
    let engine = DecisionEngine::new(config.crop_profile_table()?);
    let evaluation = engine.evaluate(&snapshot);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        print_evaluation(&snapshot, &evaluation);
    }
    Ok(())
}

fn print_evaluation(snapshot: &SensorSnapshot, eval: &Evaluation) {
    let health = &eval.health;
    println!(
        "Readings:    soil {}%  air {}°C  humidity {}%  ({})",
        fmt_one_decimal(snapshot.soil_moisture_pct),
        fmt_one_decimal(snapshot.temperature_c),
        fmt_one_decimal(snapshot.humidity_pct),
        snapshot.crop
    );
    println!(
        "Crop health: {} {} ({}/100)",
        health.condition.symbol(),
        health.condition,
        health.score
    );
    println!("             {}", health.description);
    if health.action_required {
        println!("             Action required");
    }
    for suggestion in &health.suggestions {
        println!("             • {}", suggestion);
    }

    println!(
        "Irrigation:  Pump {} - {}",
        eval.irrigation.pump_status, eval.irrigation.reason
    );

    match &eval.prediction {
        Some(p) => println!(
            "Prediction:  {}% {}{}",
            fmt_one_decimal(p.predicted_moisture_pct),
            p.trend,
            if p.needs_irrigation {
                " (irrigation needed)"
            } else {
                ""
            }
        ),
        None => println!("Prediction:  not enough moisture history"),
    }

    if eval.alerts.is_empty() {
        println!("Alerts:      All Clear");
    } else {
        println!("Alerts:");
        for alert in &eval.alerts {
            println!(
                "  {} [{}] {}: {}",
                alert.level.symbol(),
                alert.level,
                alert.alert_type,
                alert.message
            );
            if !alert.action.is_empty() {
                println!("      {}", alert.action);
            }
        }
    }
}

fn run_dashboard(config: &Config) -> anyhow::Result<()> {
    let mut app = App::new(config).context("Failed to start dashboard")?;
    tracing::info!("Starting dashboard for {}", app.farm_name);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    TUI_ACTIVE.store(true, Ordering::Relaxed);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    TUI_ACTIVE.store(false, Ordering::Relaxed);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("Dashboard error")
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Dashboard => {
                    let screen = DashboardScreen::new(&app.farm_name, &app.snapshot, &app.evaluation)
                        .pump_running(app.pump_running())
                        .with_status(app.status_message.as_deref());
                    f.render_widget(screen, area);
                }
                Screen::Assistant => {
                    let screen = AssistantScreen::new(app.assistant.transcript(), &app.chat_input);
                    f.render_widget(screen, area);
                }
            }
        })?;

        let timeout = app.tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(250)))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code, key.modifiers);
                }
            }
        }

        if last_tick.elapsed() >= app.tick_interval {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.screen {
        Screen::Dashboard => handle_dashboard_input(app, code),
        Screen::Assistant => handle_assistant_input(app, code),
    }
}

fn handle_dashboard_input(app: &mut App, code: KeyCode) {
    if let KeyCode::Char(c) = code {
        if let Some(screen) = Screen::from_key(c) {
            app.switch_screen(screen);
            return;
        }
    }

    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('a') => app.toggle_auto_mode(),
        KeyCode::Char('c') => app.cycle_crop(true),
        KeyCode::Char('C') => app.cycle_crop(false),
        KeyCode::Char('+') | KeyCode::Char('=') => app.raise_threshold(),
        KeyCode::Char('-') => app.lower_threshold(),
        KeyCode::Char('p') => app.toggle_manual_pump(),
        KeyCode::Char('r') => {
            app.tick();
            app.set_status("New reading taken");
        }
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
}

// Typed characters belong to the chat line, so screen keys are not bound here.
fn handle_assistant_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.switch_screen(Screen::Dashboard),
        KeyCode::Enter => app.submit_chat(),
        KeyCode::Backspace => {
            app.chat_input.pop();
        }
        KeyCode::Char(c) => app.chat_input.push(c),
        _ => {}
    }
}
