//! The one-shot render sequence: load both handlers, capture both cards,
//! write both files, report.

use std::fs;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::config::{self, Config};
use crate::handler::{self, Handler, Query};
use crate::upstream::{UpstreamModule, STATS_MODULE, TOP_LANGS_MODULE};

pub const STATS_FILE: &str = "github-stats.svg";
pub const TOP_LANGS_FILE: &str = "top-langs.svg";

pub async fn run(cfg: &Config) -> Result<()> {
    // Both loads happen before anything is rendered or written, so a missing
    // handler leaves the output directory untouched.
    let stats = UpstreamModule::load(&cfg.grs_dir, STATS_MODULE, "stats")?;
    let top_langs = UpstreamModule::load(&cfg.grs_dir, TOP_LANGS_MODULE, "top-langs")?;
    render_pair(cfg, &stats, &top_langs).await
}

/// Renders both cards through the capture adapter and persists them. The two
/// renders are sequential; each is awaited to completion. There is no
/// rollback: a failure on the second card can leave the first file written.
pub async fn render_pair(cfg: &Config, stats: &dyn Handler, top_langs: &dyn Handler) -> Result<()> {
    fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("failed to create {}", cfg.out_dir.display()))?;

    let stats_svg = handler::capture(stats, stats_query(cfg)).await?;
    let langs_svg = handler::capture(top_langs, top_langs_query(cfg)).await?;

    let stats_path = cfg.out_dir.join(STATS_FILE);
    let langs_path = cfg.out_dir.join(TOP_LANGS_FILE);
    fs::write(&stats_path, &stats_svg)
        .with_context(|| format!("failed to write {}", stats_path.display()))?;
    fs::write(&langs_path, &langs_svg)
        .with_context(|| format!("failed to write {}", langs_path.display()))?;

    let shown = cfg
        .out_dir
        .strip_prefix(config::repo_root())
        .unwrap_or(&cfg.out_dir);
    println!(
        "Rendered SVGs for {} -> {}/{}, {}",
        cfg.username.green(),
        shown.display(),
        STATS_FILE,
        TOP_LANGS_FILE
    );
    Ok(())
}

fn stats_query(cfg: &Config) -> Query {
    Query::from([
        ("username".to_string(), cfg.username.clone()),
        ("show_icons".to_string(), "true".to_string()),
        ("theme".to_string(), cfg.theme.clone()),
    ])
}

fn top_langs_query(cfg: &Config) -> Query {
    Query::from([
        ("username".to_string(), cfg.username.clone()),
        ("theme".to_string(), cfg.theme.clone()),
        ("layout".to_string(), cfg.langs_layout.clone()),
    ])
}
