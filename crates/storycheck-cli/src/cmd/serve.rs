use anyhow::Context;
use std::path::Path;
use storycheck_core::config::Config;
use storycheck_server::AppState;

pub fn run(root: &Path, port: Option<u16>) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let port = port.unwrap_or(config.server.port);
    let state = AppState::new(root.to_path_buf())?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(storycheck_server::serve(state, port))
}
