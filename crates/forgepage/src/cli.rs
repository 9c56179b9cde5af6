use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(name="forgepage",version=env!("CARGO_PKG_VERSION"),about,long_about=None,propagate_version=true)]
pub struct App {
    /// Path to the configuration file (default: forgepage.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "s", name = "serve", about = "Serve project pages over HTTP")]
    Serve(ServeArg),
    #[command(alias = "r", name = "render", about = "Render one project page to stdout")]
    Render(RenderArg),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArg {
    /// Listen address, overriding the configuration.
    #[arg(short, long)]
    pub listen: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct RenderArg {
    /// Request host to render the page for, e.g. geometry.r-forge.r-project.org.
    #[arg(long)]
    pub host: String,

    /// Skip the fragment fetch and render the static page only.
    #[arg(long)]
    pub offline: bool,
}
