use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use forgepage_server::Server;
use tracing_subscriber::EnvFilter;

use crate::cli::{App, Commands, RenderArg, ServeArg};
use crate::config::Config;
use crate::page::PageService;

mod cli;
mod config;
mod page;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app = App::parse();
    let config = Config::load(app.config.as_deref())?;

    match app.cmd {
        Commands::Serve(arg) => serve(config, arg).await,
        Commands::Render(arg) => render(config, arg).await,
    }
}

async fn serve(mut config: Config, arg: ServeArg) -> Result<()> {
    if let Some(listen) = arg.listen {
        config.listen = listen;
    }

    let server = Server::bind(&config.listen).await?;
    tracing::info!(addr = %server.local_addr()?, "serving project pages");

    let service = Arc::new(PageService::new(config)?);
    server.serve(service).await?;
    Ok(())
}

async fn render(config: Config, arg: RenderArg) -> Result<()> {
    let service = PageService::new(config)?;
    let html = if arg.offline {
        service.static_page_for_host(&arg.host)?
    } else {
        service.page_for_host(&arg.host).await?
    };
    print!("{html}");
    Ok(())
}
