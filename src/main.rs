mod cli;
mod config;
mod error;
mod handler;
mod render;
mod upstream;

use anyhow::Result;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let cfg = Config::resolve(&args);
    render::run(&cfg).await
}
