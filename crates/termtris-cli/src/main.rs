mod command;
mod high_score;
mod logging;
mod sound;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
