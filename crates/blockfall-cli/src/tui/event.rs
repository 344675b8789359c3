use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval has elapsed.
    Tick,
    /// The screen should be redrawn.
    Render,
    /// Terminal input or resize.
    Crossterm(CrosstermEvent),
}
