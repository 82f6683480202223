use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = agent_chorus::cli::Cli::parse();
    agent_chorus::run(cli)
}
