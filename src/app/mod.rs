use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;
use ratatui::Terminal;

use crate::catalog::Catalog;
use crate::config::{AppConfig, Palette};
use crate::ui;

mod actions;
pub mod state;

pub use actions::{action_for_key, confirm_answer, Action, ConfirmAnswer};
pub use state::{ItemView, OverlayState, SectionCount, Summary, TrackerState};

const PAGE_STEP: isize = 5;

pub struct App {
    pub config: Arc<AppConfig>,
    state: TrackerState,
    list_state: ListState,
    palette: Palette,
    should_quit: bool,
    tick_rate: Duration,
}

impl App {
    pub fn new(config: Arc<AppConfig>, catalog: Catalog) -> Self {
        let state = TrackerState::new(catalog, &config);
        let mut list_state = ListState::default();
        if !state.rows().is_empty() {
            list_state.select(Some(state.selected()));
        }
        tracing::info!(
            total = state.catalog().total(),
            filter = %state.filter(),
            "tracker session started"
        );
        Self {
            palette: Palette::for_theme(config.theme),
            tick_rate: config.tick_rate(),
            config,
            state,
            list_state,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        let summary = self.state.summary();
        tracing::info!(
            done = summary.done,
            total = summary.total,
            percent = summary.percent,
            "tracker session ended"
        );
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();
        loop {
            terminal
                .draw(|frame| {
                    if self.state.rows().is_empty() {
                        self.list_state.select(None);
                    } else {
                        self.list_state.select(Some(self.state.selected()));
                    }
                    ui::draw_app(frame, &self.state, &mut self.list_state, &self.palette);
                })
                .context("rendering frame")?;

            if self.should_quit {
                break;
            }

            let timeout = self
                .tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(0));

            if event::poll(timeout).context("polling for terminal events")? {
                match event::read().context("reading terminal event")? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {
                        // next draw adapts to the new size
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                self.on_tick(Instant::now());
                last_tick = Instant::now();
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.state.overlay().is_some() {
            match confirm_answer(&key) {
                Some(ConfirmAnswer::Yes) => {
                    self.state.confirm_reset();
                }
                Some(ConfirmAnswer::No) => self.state.cancel_reset(),
                None => {}
            }
            return;
        }

        if let Some(action) = action_for_key(&key, self.config.keybindings) {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::SelectNext => self.state.move_selection(1),
            Action::SelectPrevious => self.state.move_selection(-1),
            Action::PageDown => self.state.move_selection(PAGE_STEP),
            Action::PageUp => self.state.move_selection(-PAGE_STEP),
            Action::ToggleItem => match self.state.toggle_selected() {
                Some((id, true)) => {
                    self.state
                        .set_status_message(Some(format!("Marked {id} done")));
                }
                Some((id, false)) => {
                    self.state
                        .set_status_message(Some(format!("Marked {id} pending")));
                }
                None => {
                    self.state
                        .set_status_message(Some("Nothing selected; expand a section with 1 or 2"));
                }
            },
            Action::CycleFilter => {
                let mode = self.state.cycle_filter();
                self.state
                    .set_status_message(Some(format!("Showing {}", mode.label())));
            }
            Action::ToggleSection(category) => {
                self.state.toggle_section(category);
                self.state.set_status_message(None::<String>);
            }
            Action::SwitchSection => {
                self.state.switch_section();
                self.state.set_status_message(None::<String>);
            }
            Action::RequestReset => self.state.request_reset(),
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(event) = self.state.tick(now) {
            tracing::trace!(?event, "sync badge reverted");
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("switching to alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal backend")?;
    terminal.hide_cursor().context("hiding cursor")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor().ok();
    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("restoring screen state")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, FilterMode};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Catalog::builtin())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn keys_drive_the_tracker() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.state().is_completed("c1".parse().expect("id")));
        assert_eq!(app.state().status_message.as_deref(), Some("Marked c1 done"));

        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.state().filter(), FilterMode::Pending);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.state().expanded(), Some(Category::Unique));

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn reset_overlay_swallows_other_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().summary().done, 1);

        app.handle_key(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT));
        assert!(app.state().overlay().is_some());

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        assert!(app.state().overlay().is_some());

        press(&mut app, KeyCode::Char('n'));
        assert!(app.state().overlay().is_none());
        assert_eq!(app.state().summary().done, 1);

        app.handle_key(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.state().summary().done, 0);
    }

    #[test]
    fn toggle_with_collapsed_sections_is_a_no_op() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.state().expanded(), None);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.state().progress().is_empty());
    }
}
