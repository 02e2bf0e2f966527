use std::io;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use wendash::adapters::ReqwestHttpClient;
use wendash::api::DashboardApi;
use wendash::app::{App, AppMessage};
use wendash::cli::{self, CliCommand};
use wendash::config::DashboardConfig;
use wendash::logging;
use wendash::terminal::{setup_panic_hook, TerminalManager};
use wendash::ui;

/// Redraw tick; ages the stream staleness indicator.
const TICK_RATE: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let parsed = match cli::parse_args(std::env::args()) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("wendash: {}\n\n{}", e, cli::usage());
            std::process::exit(2);
        }
    };

    match parsed.command {
        CliCommand::Version => {
            println!("{}", cli::version_line());
            return Ok(());
        }
        CliCommand::Help => {
            print!("{}", cli::usage());
            return Ok(());
        }
        _ => {}
    }

    color_eyre::install()?;

    let config = parsed.apply(DashboardConfig::from_env()?);
    config.validate()?;

    // Logging is best effort; the dashboard works without it
    if let Some(dir) = config.log_directory() {
        if let Err(e) = logging::init_file_logging(&dir) {
            eprintln!("Warning: file logging disabled: {}", e);
        }
    }
    info!(base_url = %config.base_url, "Starting wendash {}", cli::VERSION);

    let runtime = tokio::runtime::Runtime::new()?;
    let api = DashboardApi::new(Arc::new(ReqwestHttpClient::new()), config);

    match parsed.command {
        CliCommand::Status => {
            let online = runtime.block_on(cli::run_status(&api, &mut io::stdout()))?;
            if !online {
                std::process::exit(1);
            }
            Ok(())
        }
        CliCommand::Action { cmd, yes } => {
            let run = runtime.block_on(cli::run_action(
                &api,
                cmd,
                yes,
                &mut io::stdin().lock(),
                &mut io::stdout(),
            ))?;
            if run.is_failure() {
                std::process::exit(1);
            }
            Ok(())
        }
        _ => {
            setup_panic_hook();
            runtime.block_on(run_dashboard(api))
        }
    }
}

async fn run_dashboard(api: DashboardApi) -> Result<()> {
    let mut manager = TerminalManager::new()?;
    let mut app = App::new(api);
    let tasks = app.start_background_tasks();

    let result = run_app(manager.terminal(), &mut app).await;

    for task in tasks {
        task.abort();
    }
    manager.restore();
    info!("Dashboard closed");
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx = app.message_rx.take();
    let mut tick = tokio::time::interval(TICK_RATE);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            _ = tick.tick() => app.tick(),

            event = event_stream.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Some(Ok(Event::Mouse(mouse))) => app.handle_mouse(mouse),
                Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "Terminal event stream failed");
                    return Err(e.into());
                }
                None => return Ok(()),
            },

            Some(msg) = next_message(&mut message_rx) => app.handle_message(msg),
        }
    }
}

async fn next_message(rx: &mut Option<mpsc::UnboundedReceiver<AppMessage>>) -> Option<AppMessage> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
