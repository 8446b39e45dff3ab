use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::info;

use vhalor_core::asset::{fetcher_for, preload_model, AssetOutcome};
use vhalor_core::carousel::BoundaryEvent;
use vhalor_core::gate::LoadingGate;
use vhalor_core::AppConfig;
use vhalor_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    keymap::Keymap,
    load_theme,
    widgets::{
        HelpWidget, LoadingScreenWidget, NavbarWidget, SectionsWidget, StatusBarWidget,
    },
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);

    let gate = Arc::new(LoadingGate::new());
    let (boundary_tx, mut boundary_rx) = mpsc::unbounded_channel::<BoundaryEvent>();
    let mut app = App::new(config.clone(), theme, gate.subscribe(), Instant::now())?
        .with_boundary_notifier(boundary_tx);
    tokio::spawn(async move {
        while let Some(event) = boundary_rx.recv().await {
            info!("Carousel boundary: {:?}", event);
        }
    });

    let (asset_tx, mut asset_rx) = mpsc::unbounded_channel::<AssetOutcome>();
    spawn_preload(config.clone(), gate.clone(), asset_tx);
    spawn_page_settle(&config, gate.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Vhalór"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::from_config(&config.ui);

    // Checked at the end of each iteration to pick the next poll rate
    let mut needs_fast_update = false;

    info!("Starting TUI");

    loop {
        while let Ok(outcome) = asset_rx.try_recv() {
            app.set_model(outcome);
        }

        app.on_frame(Instant::now());

        terminal.draw(|frame| {
            let size = frame.area();

            if app.is_loading() {
                LoadingScreenWidget::render(frame, size, &app);
                return;
            }

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Navbar
                    Constraint::Min(1),    // Page
                    Constraint::Length(1), // Status bar
                ])
                .split(size);

            app.navbar_area = layout[0];
            app.set_page_area(layout[1]);

            NavbarWidget::render(frame, layout[0], &app);
            SectionsWidget::render(frame, layout[1], &app);
            StatusBarWidget::render(frame, layout[2], &app);

            if app.mode == Mode::Help {
                HelpWidget::render(frame, &app);
            }
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app, &keymap);
                    app.apply(action, now);
                }
                AppEvent::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse, &app);
                    app.apply(action, now);
                }
                AppEvent::Resize(_, _) => {
                    // The next draw picks up the new page area
                }
                AppEvent::Tick => app.tick(now),
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("TUI exited");
    Ok(())
}

/// Preload the product model once, then settle the gate either way
fn spawn_preload(
    config: Arc<AppConfig>,
    gate: Arc<LoadingGate>,
    tx: mpsc::UnboundedSender<AssetOutcome>,
) {
    tokio::spawn(async move {
        let loading = &config.loading;
        let outcome = match fetcher_for(
            loading.model_source.as_deref(),
            Duration::from_secs(loading.request_timeout_secs),
        ) {
            Ok(fetcher) => {
                preload_model(fetcher.as_ref(), Duration::from_secs(loading.asset_timeout_secs))
                    .await
            }
            Err(e) => AssetOutcome::Failed {
                reason: e.to_string(),
            },
        };
        // Hand the model over before the gate can open
        let status = outcome.clone();
        let _ = tx.send(outcome);
        gate.assets_settled(&status);
    });
}

/// The page counts as loaded once the loading screen has had its moment
fn spawn_page_settle(config: &AppConfig, gate: Arc<LoadingGate>) {
    let delay = Duration::from_millis(config.loading.settle_delay_ms);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        gate.page_loaded();
    });
}
