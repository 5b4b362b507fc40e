// SPDX-License-Identifier: MIT OR Apache-2.0

//! `snippet` command: resolve one fragment's source text.

use std::path::Path;

use anyhow::Result;

use cloneclass::cache::{snapshot::default_cache_dir, ContentCache};
use cloneclass::config::Config;
use cloneclass::relation::FragmentId;
use cloneclass::resolve::SnippetResolver;

#[allow(clippy::too_many_arguments)]
pub fn run(
    path: &str,
    start: u32,
    end: u32,
    root: &Path,
    suggestions: Option<usize>,
    force: bool,
    no_snapshot: bool,
    cache_dir: Option<&Path>,
) -> Result<()> {
    let config = Config::load();

    let cache = if no_snapshot || config.no_snapshot {
        ContentCache::load(root)?
    } else {
        let dir = cache_dir
            .map(Path::to_path_buf)
            .or_else(|| config.cache_dir.clone())
            .unwrap_or_else(|| default_cache_dir(root));
        ContentCache::load_with_snapshot(root, &dir, force)?
    };
    tracing::debug!(files = cache.len(), skipped = cache.skipped(), "content cache ready");

    let fragment = FragmentId::new(path, start, end);
    let resolver =
        SnippetResolver::new(&cache).with_suggestions(config.merge_suggestion_count(suggestions));
    let text = resolver.resolve(&fragment).map_err(anyhow::Error::new)?;
    println!("{text}");

    Ok(())
}
