use std::io::{self, Stdout, Write};
use std::time::Instant;

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::cursor::Show;
use ratatui::crossterm::event::{self, Event};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::Terminal;

use crate::app::{Action, App};
use crate::config::{Config, Mode};
use crate::error::Result;
use crate::presenter;
use crate::ui;

pub fn run(config: &Config) -> Result<()> {
    tracing::info!(mode = ?config.mode, scenario = %config.scenario, "starting");
    let out = io::stdout();
    let result = match config.mode {
        Mode::Interactive => run_interactive(config),
        Mode::Snapshot => run_snapshot(config, out.lock()),
        Mode::Json => run_json(config, out.lock()),
    };
    tracing::info!(ok = result.is_ok(), "finished");
    result
}

/// Renders a single frame off-screen and writes it as text.
pub fn run_snapshot<W: Write>(config: &Config, mut out: W) -> Result<()> {
    let app = App::new(config.scenario, config.palette, Instant::now());
    let text = ui::render_to_string(&app, config.width, config.height)?;
    writeln!(out, "{text}")?;
    Ok(())
}

pub fn run_json<W: Write>(config: &Config, mut out: W) -> Result<()> {
    let plan = presenter::project(config.scenario, config.palette);
    let json = serde_json::to_string_pretty(&plan)?;
    writeln!(out, "{json}")?;
    Ok(())
}

fn run_interactive(config: &Config) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    chain_panic_hook(restore_after_panic);
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(e.into());
        }
    };
    if let Err(err) = terminal.hide_cursor() {
        tracing::warn!(?err, "failed to hide cursor");
    }

    let result = event_loop(&mut terminal, config);
    restore(&mut terminal);
    result
}

/// Runs `restore` ahead of whatever panic hook was installed before.
fn chain_panic_hook<F>(restore: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

fn restore_after_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

fn restore(terminal: &mut Terminal<CrosstermBackend<Stdout>>) {
    if let Err(err) = disable_raw_mode() {
        tracing::error!(?err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
        tracing::error!(?err, "failed to leave alternate screen");
    }
    if let Err(err) = terminal.show_cursor() {
        tracing::error!(?err, "failed to show cursor");
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &Config,
) -> Result<()> {
    let mut app = App::new(config.scenario, config.palette, Instant::now());

    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(config.tick)? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key, Instant::now()) == Action::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
