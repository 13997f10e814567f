mod cli;
mod config;
mod platform;

fn main() -> anyhow::Result<()> {
    cli::run()
}
