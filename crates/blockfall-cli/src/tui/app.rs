use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// An application driven by [`Tui::run`].
pub trait App {
    /// Called once before the first event. Configure the tick rate here.
    fn init(&mut self, tui: &mut Tui);

    /// Returns whether the event loop should stop.
    fn should_exit(&self) -> bool;

    /// Handles a terminal event (key press, resize, ...).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the current state.
    fn draw(&self, frame: &mut Frame);

    /// Advances the application by one tick.
    fn update(&mut self, tui: &mut Tui);
}
