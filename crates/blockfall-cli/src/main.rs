mod command;
mod high_score;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
