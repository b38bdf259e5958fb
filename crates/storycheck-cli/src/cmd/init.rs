use anyhow::Context;
use std::path::Path;
use storycheck_core::config::Config;
use storycheck_core::paths;

pub fn run(root: &Path, base_url: Option<&str>, email: Option<&str>) -> anyhow::Result<()> {
    println!("Initializing storycheck in: {}", root.display());

    let config_path = paths::config_path(root);
    if config_path.exists() {
        println!("  exists:  {}", paths::CONFIG_FILE);
        return Ok(());
    }

    let cfg = Config::new(base_url.unwrap_or_default(), email.map(str::to_string));
    cfg.save(root)
        .with_context(|| format!("failed to write {}", paths::CONFIG_FILE))?;
    println!("  created: {}", paths::CONFIG_FILE);

    if cfg.tracker.base_url.is_empty() {
        println!("\nSet tracker.base_url in {} before running 'storycheck issue'.", paths::CONFIG_FILE);
    }
    println!(
        "Export your API token as {} to fetch issues.",
        cfg.tracker.token_env
    );
    Ok(())
}
