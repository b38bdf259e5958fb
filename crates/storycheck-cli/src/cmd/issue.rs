use crate::output::{print_analysis, print_json};
use anyhow::Context;
use std::path::Path;
use storycheck_core::config::Config;
use storycheck_core::{IssueId, StoryService, TrackerClient};

pub fn run(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let id = IssueId::parse(id)?;
    let config = Config::load(root).context("failed to load config")?;
    let client =
        TrackerClient::from_config(&config.tracker).context("failed to configure tracker")?;

    let service = StoryService::new(client);
    let analysis = service
        .analyze_issue(&id)
        .with_context(|| format!("failed to analyze issue {id}"))?;

    if json {
        return print_json(&analysis);
    }
    println!("Issue: {id}\n");
    print_analysis(&analysis.result, false)
}
