use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Defaults loadable from a config file, unioned with CLI flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub regex: bool,
    pub no_watch: bool,
    pub log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; booleans are or-ed, valued options prefer
    /// `other` (the CLI side).
    pub fn union(&self, other: &Self) -> Self {
        Self {
            regex: self.regex || other.regex,
            no_watch: self.no_watch || other.no_watch,
            log: other.log.clone().or_else(|| self.log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("etch").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("etch")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("etch").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("etch").join("config");
        }
    }

    PathBuf::from(".etchrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".etchrc")
}

/// Load flag tokens from a config file. A missing file is an empty config.
///
/// # Errors
///
/// Returns an error when an existing file cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Persist flags as raw CLI tokens.
///
/// # Errors
///
/// Returns an error when the config file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# etch defaults (saved with --save)".to_string());
    if flags.regex {
        lines.push("--regex".to_string());
    }
    if flags.no_watch {
        lines.push("--no-watch".to_string());
    }
    if let Some(log) = &flags.log {
        lines.push(format!("--log {}", log.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove the config file, if present.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from raw tokens; everything else is ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--regex" || token == "-r" {
            flags.regex = true;
        } else if token == "--no-watch" {
            flags.no_watch = true;
        } else if token == "--log" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log=") {
            flags.log = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "etch".to_string(),
            "--regex".to_string(),
            "--no-watch".to_string(),
            "--log=etch.log".to_string(),
            "notes.txt".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.regex);
        assert!(flags.no_watch);
        assert_eq!(flags.log, Some(PathBuf::from("etch.log")));
    }

    #[test]
    fn test_config_union_prefers_cli_for_valued_options() {
        let file = ConfigFlags {
            regex: true,
            log: Some(PathBuf::from("file.log")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_watch: true,
            log: Some(PathBuf::from("cli.log")),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.regex);
        assert!(merged.no_watch);
        assert_eq!(merged.log, Some(PathBuf::from("cli.log")));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".etchrc");
        let flags = ConfigFlags {
            regex: true,
            no_watch: true,
            log: Some(PathBuf::from("etch.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let flags = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(flags, ConfigFlags::default());
    }
}
