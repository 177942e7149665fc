//! Discovery of index shards inside a generated documentation tree.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use super::category::SymbolCategory;
use crate::config::ScannerConfig;

/// Walks a documentation tree and yields its search index shards.
pub struct Walker {
    root: PathBuf,
    ignore_patterns: Vec<String>,
}

impl Walker {
    pub fn new(root: PathBuf, config: &ScannerConfig) -> Self {
        Self {
            root,
            ignore_patterns: config.ignore_patterns.clone(),
        }
    }

    /// True for files named like an index shard (`functions_8.js`, ...).
    pub fn is_shard(path: &Path) -> bool {
        if path.extension().and_then(|e| e.to_str()) != Some("js") {
            return false;
        }
        path.file_stem()
            .and_then(|s| s.to_str())
            .and_then(SymbolCategory::from_shard_stem)
            .is_some()
    }

    /// Walk the tree and return shard paths.
    ///
    /// Generated trees usually live inside ignored build directories, so
    /// gitignore handling is disabled; hidden directories are still
    /// skipped.
    pub fn walk(&self) -> impl Iterator<Item = PathBuf> {
        let mut builder = WalkBuilder::new(&self.root);
        builder.git_ignore(false);
        builder.git_global(false);
        builder.git_exclude(false);
        builder.hidden(true);

        let ignore_patterns = self.ignore_patterns.clone();

        builder
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .filter(move |entry| {
                let path_str = entry.path().to_string_lossy();
                !ignore_patterns.iter().any(|pattern| path_str.contains(pattern.as_str()))
            })
            .filter(|entry| Self::is_shard(entry.path()))
            .map(|entry| entry.into_path())
    }

    /// Collect shard paths in a stable (sorted) order.
    pub fn collect_shards(&self) -> Vec<PathBuf> {
        let mut shards: Vec<PathBuf> = self.walk().collect();
        shards.sort();
        shards
    }

    /// Number of shards that a scan would load.
    pub fn count_shards(&self) -> usize {
        self.walk().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn test_config() -> ScannerConfig {
        ScannerConfig::default()
    }

    #[test]
    fn test_is_shard() {
        assert!(Walker::is_shard(Path::new("search/functions_8.js")));
        assert!(Walker::is_shard(Path::new("search/enumvalues_b.js")));
        assert!(!Walker::is_shard(Path::new("search/search.js")));
        assert!(!Walker::is_shard(Path::new("search/functions_8.html")));
        assert!(!Walker::is_shard(Path::new("menudata.js")));
    }

    #[test]
    fn test_walker_finds_shards() {
        let dir = tempdir().unwrap();
        let search_dir = dir.path().join("search");
        fs::create_dir_all(&search_dir).unwrap();

        fs::write(search_dir.join("functions_0.js"), "var searchData=[];").unwrap();
        fs::write(search_dir.join("classes_0.js"), "var searchData=[];").unwrap();
        fs::write(search_dir.join("search.js"), "// viewer script").unwrap();
        fs::write(dir.path().join("menudata.js"), "var menudata={};").unwrap();

        let walker = Walker::new(dir.path().to_path_buf(), &test_config());
        let shards = walker.collect_shards();

        assert_eq!(shards.len(), 2);
        assert!(shards.iter().all(|p| Walker::is_shard(p)));
    }

    #[test]
    fn test_walker_respects_ignore_patterns() {
        let dir = tempdir().unwrap();
        let kept = dir.path().join("html/search");
        let skipped = dir.path().join("old/search");
        fs::create_dir_all(&kept).unwrap();
        fs::create_dir_all(&skipped).unwrap();

        fs::write(kept.join("functions_0.js"), "var searchData=[];").unwrap();
        fs::write(skipped.join("functions_0.js"), "var searchData=[];").unwrap();

        let mut config = test_config();
        config.ignore_patterns = vec!["old".to_string()];

        let walker = Walker::new(dir.path().to_path_buf(), &config);
        let shards = walker.collect_shards();

        assert_eq!(shards.len(), 1);
        assert!(shards[0].starts_with(&kept));
    }

    #[test]
    fn test_walker_sorted_order() {
        let dir = tempdir().unwrap();
        let search_dir = dir.path().join("search");
        fs::create_dir_all(&search_dir).unwrap();

        for name in ["variables_0.js", "all_0.js", "functions_0.js"] {
            fs::write(search_dir.join(name), "var searchData=[];").unwrap();
        }

        let walker = Walker::new(dir.path().to_path_buf(), &test_config());
        let shards = walker.collect_shards();
        let names: Vec<_> = shards
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();

        assert_eq!(names, vec!["all_0.js", "functions_0.js", "variables_0.js"]);
    }
}
