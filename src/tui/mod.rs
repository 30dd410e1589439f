pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;

use crate::app::{AppContext, Result};
use crate::controller::{BrowserNavigator, LoadStart, ScreenController};

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: &AppContext) -> Result<()> {
    let mut tui_app = TuiApp::new(ctx.load_preferences()?);
    let mut screen = ctx.screen();
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let navigator = BrowserNavigator;

    open_screen(&mut screen, &mut tui_app).await;

    loop {
        if screen.poll() {
            tui_app.reset_selection(screen.rows().len());
            if screen.rejected() > 0 {
                tui_app.set_status(format!(
                    "{} results skipped (missing fields)",
                    screen.rejected()
                ));
            }
        }

        terminal
            .draw(|frame| layout::render(frame, &mut tui_app, &screen, &ctx.config.colors))?;

        let key = match event_handler.next()? {
            AppEvent::Key(key) => key,
            AppEvent::Tick => continue,
        };
        let action = Action::from(key);

        if tui_app.settings.is_some() {
            if let Some(next) = handle_settings(&mut tui_app, ctx, action) {
                // New preferences replace the whole screen; the old fetch is dropped.
                screen.close();
                screen = next;
                open_screen(&mut screen, &mut tui_app).await;
            }
            continue;
        }

        tui_app.clear_status();
        match action {
            Action::Quit => tui_app.should_quit = true,
            Action::MoveUp => tui_app.move_up(),
            Action::MoveDown => tui_app.move_down(screen.rows().len()),
            Action::NextPage => tui_app.next_page(screen.rows().len()),
            Action::PrevPage => tui_app.prev_page(),
            Action::Open => {
                if let Err(e) = screen.activate(tui_app.selected, &navigator) {
                    warn!("{}", e);
                    tui_app.set_status(e.to_string());
                }
            }
            Action::Reload => open_screen(&mut screen, &mut tui_app).await,
            Action::Settings => tui_app.open_settings(),
            Action::Left | Action::Right | Action::Cancel | Action::None => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    screen.close();
    Ok(())
}

async fn open_screen(screen: &mut ScreenController, tui_app: &mut TuiApp) {
    match screen.open(&tui_app.prefs).await {
        LoadStart::Started => tui_app.reset_selection(0),
        LoadStart::AlreadyLoading => tui_app.set_status("Already loading".to_string()),
        LoadStart::Offline | LoadStart::InvalidRequest => tui_app.reset_selection(0),
        LoadStart::Closed => {}
    }
}

/// Handle a key while the settings overlay is shown. Returns a fresh screen
/// when new preferences were saved.
fn handle_settings(
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    action: Action,
) -> Option<ScreenController> {
    let draft = tui_app.settings.as_mut()?;

    match action {
        Action::MoveUp | Action::MoveDown => draft.toggle_field(),
        Action::Left => draft.change(false),
        Action::Right => draft.change(true),
        Action::Cancel | Action::Quit => tui_app.settings = None,
        Action::Open => {
            let prefs = draft.prefs.clone();
            tui_app.settings = None;

            if prefs == tui_app.prefs {
                return None;
            }
            if let Err(e) = ctx.save_preferences(&prefs) {
                warn!("Could not save preferences: {}", e);
                tui_app.set_status(format!("Could not save preferences: {}", e));
            }
            tui_app.prefs = prefs;
            return Some(ctx.screen());
        }
        _ => {}
    }

    None
}
