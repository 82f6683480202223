pub mod adapters;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod engine;
pub mod events;
pub mod pack;
pub mod pause;
pub mod rotation;
pub mod router;
pub mod selector;
pub mod session;
pub mod spam;
pub mod state;
pub mod system;

use cli::{Cli, Commands};
use config::{Config, Paths};
use delivery::{Delivery, SystemDelivery};
use engine::{Dispatch, Engine};
use pause::{MarkerFile, PauseGate};
use session::Session;
use std::io::{BufRead, Read};
use std::path::PathBuf;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Handle(args) => handle(args),
        Commands::Listen(args) => listen(args),
        Commands::Pause => set_paused(Some(true)),
        Commands::Resume => set_paused(Some(false)),
        Commands::Toggle => set_paused(None),
        Commands::Status(args) => status(args),
        Commands::Preview(args) => preview(args),
        Commands::Packs(args) => packs(args),
        Commands::Config(args) => config_cmd(args),
        Commands::SystemInfo(args) => system_info(args),
    }
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle(args: cli::HandleArgs) -> anyhow::Result<()> {
    let paths = Paths::discover()?;
    let config = Config::load(&paths);

    let payload = match args.payload.or_else(read_stdin_json) {
        Some(payload) => payload,
        None => {
            tracing::warn!("no payload provided; skipping");
            return Ok(());
        }
    };

    let envelope = match adapters::parse_event(args.session.source, &payload) {
        Ok(Some(envelope)) => envelope,
        Ok(None) => {
            tracing::warn!("event not recognized; skipping");
            return Ok(());
        }
        Err(err) => {
            tracing::warn!(error = ?err, "event payload unreadable; skipping");
            return Ok(());
        }
    };

    let session_id = args
        .session
        .session
        .or(envelope.session_id)
        .unwrap_or_else(session::generate_id);
    let directory = args
        .session
        .directory
        .or_else(|| envelope.directory.map(PathBuf::from));
    let session = Session::new(session_id, project_for(directory));

    let mut engine = Engine::new(config, &paths, session);
    let dispatches = engine.handle(&envelope.event, session::now_seconds());
    delivery::deliver_all(&SystemDelivery::detect(), &dispatches);
    Ok(())
}

fn listen(args: cli::ListenArgs) -> anyhow::Result<()> {
    let paths = Paths::discover()?;
    let config = Config::load(&paths);
    let source = args.session.source;
    let session_id = args.session.session.unwrap_or_else(session::generate_id);
    let session = Session::new(session_id, project_for(args.session.directory));
    tracing::info!(session = %session.id, project = %session.project, "listening for host events");

    let delivery = SystemDelivery::detect();
    let mut engine = Engine::new(config, &paths, session);
    delivery::deliver_all(&delivery, &engine.start(session::now_seconds()));

    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "stdin closed unexpectedly; stopping");
                break;
            }
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::warn!("event line is not valid UTF-8; skipping");
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match adapters::parse_event(source, line) {
            Ok(Some(envelope)) => {
                let dispatches = engine.handle(&envelope.event, session::now_seconds());
                delivery::deliver_all(&delivery, &dispatches);
            }
            Ok(None) => tracing::debug!("event not recognized; skipping"),
            Err(err) => tracing::warn!(error = ?err, "event payload unreadable; skipping"),
        }
    }

    Ok(())
}

fn set_paused(target: Option<bool>) -> anyhow::Result<()> {
    let paths = Paths::discover()?;
    let marker = MarkerFile::new(&paths.pause_marker);
    let paused = match target {
        Some(true) => marker.pause().map(|_| true)?,
        Some(false) => marker.resume().map(|_| false)?,
        None => marker.toggle()?,
    };
    println!("{}", if paused { "paused" } else { "resumed" });
    Ok(())
}

fn status(args: cli::StatusArgs) -> anyhow::Result<()> {
    let paths = Paths::discover()?;
    let config = Config::load(&paths);
    let paused = MarkerFile::new(&paths.pause_marker).is_paused();
    let packs_dir = config.packs_dir(&paths);

    if args.json {
        let value = serde_json::json!({
            "paused": paused,
            "enabled": config.enabled,
            "active_pack": config.active_pack,
            "pack_rotation": config.pack_rotation,
            "config_path": paths.config_file,
            "packs_dir": packs_dir,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Paused: {}", if paused { "yes" } else { "no" });
    println!("Enabled: {}", if config.enabled { "yes" } else { "no" });
    println!("Active pack: {}", config.active_pack);
    if !config.pack_rotation.is_empty() {
        println!("Rotation: {}", config.pack_rotation.join(", "));
    }
    println!("Packs dir: {}", packs_dir.display());
    Ok(())
}

fn preview(args: cli::PreviewArgs) -> anyhow::Result<()> {
    let paths = Paths::discover()?;
    let config = Config::load(&paths);
    let session_id = args.session.unwrap_or_else(session::generate_id);
    let mut engine = Engine::new(config, &paths, Session::new(session_id, "preview"));

    let Some(sound) = engine.preview(args.category) else {
        println!("No sound available for {}", args.category);
        return Ok(());
    };
    if let Dispatch::Sound { path, .. } = &sound {
        println!("Playing {}", path.display());
    }
    SystemDelivery::detect().deliver(&sound)
}

fn packs(args: cli::PacksArgs) -> anyhow::Result<()> {
    let paths = Paths::discover()?;
    let config = Config::load(&paths);
    let packs_dir = config.packs_dir(&paths);
    let packs = pack::list_packs(&packs_dir)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&packs)?);
        return Ok(());
    }

    if packs.is_empty() {
        println!("No packs installed in {}", packs_dir.display());
        return Ok(());
    }

    for summary in packs {
        let active = if summary.name == config.active_pack { "*" } else { " " };
        println!(
            "{active} {} ({:?}, {} categories, {} sounds)",
            summary.name, summary.schema, summary.categories, summary.sounds
        );
    }
    Ok(())
}

fn config_cmd(args: cli::ConfigArgs) -> anyhow::Result<()> {
    let paths = Paths::discover()?;

    if args.init {
        let path = Config::init_default(&paths)?;
        println!("Initialized config at {}", path.display());
        return Ok(());
    }

    if args.show {
        let config = Config::load(&paths);
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.validate {
        let report = Config::load_report(&paths.config_file);
        if !report.issues.is_empty() {
            for issue in &report.issues {
                eprintln!("- {issue}");
            }
            anyhow::bail!("config has {} issue(s)", report.issues.len());
        }
        println!("Config OK");
        return Ok(());
    }

    println!("{}", paths.config_file.display());
    Ok(())
}

fn system_info(args: cli::SystemInfoArgs) -> anyhow::Result<()> {
    let info = system::detect();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("OS: {}", info.os);
    println!("Arch: {}", info.arch);
    println!("Player: {}", info.player.as_deref().unwrap_or("none"));
    println!("Notifier: {}", info.notifier.as_deref().unwrap_or("none"));
    println!("Terminal titles: {}", if info.title_supported { "yes" } else { "no" });
    Ok(())
}

fn project_for(directory: Option<PathBuf>) -> String {
    let directory = directory.or_else(|| std::env::current_dir().ok());
    session::project_name(directory.as_deref())
}

fn read_stdin_json() -> Option<String> {
    let mut input = String::new();
    let mut stdin = std::io::stdin();
    if stdin.read_to_string(&mut input).is_ok() {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    } else {
        None
    }
}
