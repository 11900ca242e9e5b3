mod report;

use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use landalytics_core::{update, AppState, Effect, Msg, ScanView, SessionStatus};
use landalytics_engine::{ClientSettings, EngineEvent, EngineHandle};
use scan_logging::scan_info;

/// Submit a web page to the Landalytics analysis service and print the audit.
#[derive(Debug, Parser)]
#[command(name = "landalytics", version, about)]
struct Cli {
    /// Page to audit.
    url: String,
    /// Marketing goal forwarded to the analysis service (e.g. "cro").
    #[arg(long)]
    goal: Option<String>,
    /// Analysis service base address; defaults to $LANDALYTICS_API_URL.
    #[arg(long)]
    api_url: Option<String>,
    /// Print the final session as JSON instead of a text report.
    #[arg(long)]
    json: bool,
    /// Enable debug logging (shows dropped protocol lines).
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    scan_logging::init_terminal_logger(cli.verbose);

    let settings = match cli.api_url {
        Some(base) => ClientSettings::from_base_url(Some(base)),
        None => ClientSettings::from_env(),
    }
    .context("resolving analysis service configuration")?;
    let engine = EngineHandle::new(settings);

    let (mut state, effects) = update(
        AppState::new(),
        Msg::ScanSubmitted {
            target_url: cli.url,
            goal: cli.goal,
        },
    );
    anyhow::ensure!(!effects.is_empty(), "target URL must not be empty");
    dispatch(&engine, effects);

    // Single consumer loop: poll engine events, fold them into the session,
    // and surface status changes until a terminal state is reached.
    let view = run_to_terminal(&engine, &mut state);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", report::render(&view));
    }

    if view.status == SessionStatus::Failed {
        let message = view.error_message.unwrap_or_else(|| "unknown error".to_string());
        anyhow::bail!("{message}");
    }
    Ok(())
}

fn run_to_terminal(engine: &EngineHandle, state: &mut AppState) -> ScanView {
    announce(state);
    loop {
        match engine.try_recv() {
            Some(event) => {
                let (next, effects) = update(std::mem::take(state), map_event(event));
                *state = next;
                dispatch(engine, effects);
                announce(state);
                if state.session().status.is_terminal() {
                    return state.view();
                }
            }
            None => thread::sleep(Duration::from_millis(20)),
        }
    }
}

fn announce(state: &mut AppState) {
    if state.consume_dirty() {
        eprintln!("{}", state.view().status_line);
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::StreamOpened { scan_id } => Msg::StreamOpened { scan_id },
        EngineEvent::Event { scan_id, event } => Msg::Stream { scan_id, event },
        EngineEvent::StreamClosed { scan_id } => Msg::StreamClosed { scan_id },
        EngineEvent::ScanFailed { scan_id, error } => Msg::TransportFailed {
            scan_id,
            message: error.to_string(),
        },
    }
}

fn dispatch(engine: &EngineHandle, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::BeginScan { scan_id, request } => {
                scan_info!("starting scan {scan_id} for {}", request.target_url);
                engine.start_scan(scan_id, request);
            }
            Effect::AbortScan { scan_id } => engine.cancel(scan_id),
        }
    }
}
