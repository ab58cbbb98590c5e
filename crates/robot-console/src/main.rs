use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

mod actions;
mod background;
mod dispatcher;
mod logger;
mod middleware;
mod reducers;
mod state;
mod theme;
mod view_models;
mod views;

use actions::{Action, GlobalAction};
use background::spawn_background_worker;
use middleware::{
    keyboard::KeyboardMiddleware, log_tail::LogTailMiddleware, logging::LoggingMiddleware,
    robot_api::RobotApiMiddleware, Middleware,
};
use robot_api_client::HttpRobotApi;
use robot_console_config::AppConfig;
use robot_log_tail::StreamEndpoint;
use state::AppState;

fn main() -> anyhow::Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting robot-console (logging to {})", log_file.display());

    let config = AppConfig::load();
    let endpoint = StreamEndpoint::resolve(&config.origin, &config.api_base)?;
    log::info!("Robot API at {}", endpoint.base_url());

    let api = HttpRobotApi::new(endpoint.base_url().clone(), config.request_timeout())?;
    let initial_state = AppState::new(endpoint.base_url().as_str());

    // Middleware runs in this order
    let middleware: Vec<Box<dyn Middleware + Send>> = vec![
        Box::new(LoggingMiddleware::new()),
        Box::new(KeyboardMiddleware::new()),
        Box::new(LogTailMiddleware::new(endpoint)?),
        Box::new(RobotApiMiddleware::new(
            Arc::new(api),
            config.stats_interval(),
        )?),
    ];

    let (action_tx, action_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();
    let worker = spawn_background_worker(
        action_rx,
        action_tx.clone(),
        result_tx,
        initial_state.clone(),
        middleware,
    )?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    send(&action_tx, Action::Global(GlobalAction::Bootstrap));
    let result = run_app(
        &mut terminal,
        initial_state,
        &action_tx,
        &result_rx,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Already gone if the loop ended through Quit
    send(&action_tx, Action::Global(GlobalAction::Quit));
    if worker.join().is_err() {
        log::error!("Background worker panicked");
    }

    if let Err(err) = &result {
        log::error!("Terminal loop failed: {}", err);
    }
    log::info!("Exiting robot-console");
    result.map_err(Into::into)
}

fn send(action_tx: &Sender<Action>, action: Action) {
    if action_tx.send(action).is_err() {
        log::debug!("Background worker already stopped");
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut state: AppState,
    action_tx: &Sender<Action>,
    result_rx: &Receiver<Action>,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            views::render(&state, area, frame);
        })?;

        if !state.running {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    send(action_tx, Action::Global(GlobalAction::KeyPressed(key)));
                }
            }
        }

        // Reduce everything the middleware chain let through
        for action in result_rx.try_iter() {
            state = reducers::reduce(state, &action);
        }
    }

    Ok(())
}
