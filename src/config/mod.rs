//! Render settings resolved from CLI flags, the environment, and `.grsrc`.

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use crate::cli::Cli;

const RC_FILE: &str = ".grsrc";

/// Repo root used as the anchor for relative paths, so the tool behaves the
/// same no matter which directory it is invoked from.
pub fn repo_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub grs_dir: PathBuf,
    pub out_dir: PathBuf,
    pub username: String,
    pub theme: String,
    pub langs_layout: String,
}

impl Config {
    /// Precedence per setting: CLI flag, then environment variable, then
    /// `.grsrc` entry, then the built-in default. Empty values fall through.
    /// Resolution cannot fail.
    pub fn resolve(cli: &Cli) -> Self {
        let env_vars: HashMap<String, String> = env::vars().collect();
        let rc = read_rc(&repo_root().join(RC_FILE));
        Self::from_sources(cli, &env_vars, &rc, repo_root())
    }

    fn from_sources(
        cli: &Cli,
        env: &HashMap<String, String>,
        rc: &HashMap<String, String>,
        root: &Path,
    ) -> Self {
        let pick = |flag: &Option<String>, key: &str, default: &str| -> String {
            flag.as_deref()
                .into_iter()
                .chain(env.get(key).map(String::as_str))
                .chain(rc.get(key).map(String::as_str))
                .find(|v| !v.trim().is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Self {
            grs_dir: anchor(root, &pick(&cli.grs_dir, "GRS_DIR", "_grs")),
            out_dir: anchor(root, &pick(&cli.out_dir, "OUT_DIR", "assets")),
            username: pick(&cli.username, "GRS_USERNAME", "shadow3aaa"),
            theme: pick(&cli.theme, "GRS_THEME", "radical"),
            langs_layout: pick(&cli.langs_layout, "GRS_LANGS_LAYOUT", "donut"),
        }
    }
}

// `join` keeps absolute values as-is, which is exactly the override we want.
fn anchor(root: &Path, value: &str) -> PathBuf {
    root.join(value)
}

fn read_rc(path: &Path) -> HashMap<String, String> {
    let mut map = HashMap::new();
    if let Ok(text) = fs::read_to_string(path) {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((k, v)) = line.split_once('=') {
                map.insert(k.trim().to_string(), v.trim().to_string());
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::from_sources(&Cli::default(), &empty(), &empty(), Path::new("/repo"));
        assert_eq!(cfg.grs_dir, Path::new("/repo/_grs"));
        assert_eq!(cfg.out_dir, Path::new("/repo/assets"));
        assert_eq!(cfg.username, "shadow3aaa");
        assert_eq!(cfg.theme, "radical");
        assert_eq!(cfg.langs_layout, "donut");
    }

    #[test]
    fn env_beats_rc_file() {
        let env = HashMap::from([("GRS_THEME".to_string(), "dark".to_string())]);
        let rc = HashMap::from([("GRS_THEME".to_string(), "light".to_string())]);
        let cfg = Config::from_sources(&Cli::default(), &env, &rc, Path::new("/repo"));
        assert_eq!(cfg.theme, "dark");
    }

    #[test]
    fn flag_beats_env() {
        let env = HashMap::from([("GRS_USERNAME".to_string(), "from-env".to_string())]);
        let cli = Cli {
            username: Some("from-flag".to_string()),
            ..Cli::default()
        };
        let cfg = Config::from_sources(&cli, &env, &empty(), Path::new("/repo"));
        assert_eq!(cfg.username, "from-flag");
    }

    #[test]
    fn empty_value_falls_through_to_default() {
        let env = HashMap::from([("GRS_LANGS_LAYOUT".to_string(), "  ".to_string())]);
        let cfg = Config::from_sources(&Cli::default(), &env, &empty(), Path::new("/repo"));
        assert_eq!(cfg.langs_layout, "donut");
    }

    #[test]
    fn absolute_paths_are_not_reanchored() {
        let cli = Cli {
            out_dir: Some("/tmp/cards".to_string()),
            ..Cli::default()
        };
        let cfg = Config::from_sources(&cli, &empty(), &empty(), Path::new("/repo"));
        assert_eq!(cfg.out_dir, Path::new("/tmp/cards"));
    }

    #[test]
    fn rc_lines_are_parsed_with_comments_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let rc_path = dir.path().join(".grsrc");
        fs::write(&rc_path, "# local overrides\nGRS_THEME = tokyonight\n\nOUT_DIR=out\n").unwrap();
        let rc = read_rc(&rc_path);
        assert_eq!(rc.get("GRS_THEME").map(String::as_str), Some("tokyonight"));
        assert_eq!(rc.get("OUT_DIR").map(String::as_str), Some("out"));
        assert_eq!(rc.len(), 2);
    }
}
