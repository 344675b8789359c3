use std::time::Duration;

use blockfall_engine::{GameSession, GameState};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, Tui},
    ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const START_BINDINGS: &[KeyBinding] = &[(&["Enter"], "Start"), (&["Esc", "Q"], "Quit")];
const PLAY_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Down"),
    (&["Esc", "Q"], "Quit"),
];
const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["Esc", "Q"], "Quit")];

/// Player input, decoded from key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    MoveLeft,
    MoveRight,
    MoveDown,
    Confirm,
    Quit,
}

impl Input {
    fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left => Some(Self::MoveLeft),
            KeyCode::Right => Some(Self::MoveRight),
            KeyCode::Down => Some(Self::MoveDown),
            KeyCode::Enter => Some(Self::Confirm),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Self::Quit),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    tick_rate: f64,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, tick_rate: f64) -> Self {
        Self {
            session,
            tick_rate,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate)
    }

    fn apply(&mut self, input: Input) {
        // moves outside of play are refused by the session
        match input {
            Input::MoveLeft => _ = self.session.move_left(),
            Input::MoveRight => _ = self.session.move_right(),
            Input::MoveDown => _ = self.session.move_down(),
            Input::Confirm => _ = self.session.confirm(),
            Input::Quit => self.is_exiting = true,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(self.tick_rate);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting || self.session.is_finished()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
            && let Some(input) = Input::from_key(key.code)
        {
            self.apply(input);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let bindings = match self.session.state() {
            GameState::Start => START_BINDINGS,
            GameState::Play => PLAY_BINDINGS,
            GameState::GameOver => GAME_OVER_BINDINGS,
        };

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(SessionDisplay::height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(
            SessionDisplay::new(&self.session, self.tick_interval()),
            main_area,
        );
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.session.tick();
    }
}
