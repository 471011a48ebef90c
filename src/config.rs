use std::{
    fs::{self, create_dir_all},
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub prompt: Option<String>,
    /// Lines run through the shell before the first prompt.
    pub startup: Vec<String>,
}

const DEFAULT_CONFIG: &str = "#prompt = \"mnesh|> \"\n#startup\n";

//config file
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mnesh").join("mnesh.conf"))
}

pub fn init() -> Config {
    let Some(config_path) = config_file_path() else {
        tracing::warn!("no config directory found, using defaults");
        return Config::default();
    };

    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            let _ = create_dir_all(parent);
        }
        if let Err(e) = fs::write(&config_path, DEFAULT_CONFIG) {
            tracing::debug!(
                path = %config_path.display(),
                error = %e,
                "could not write default config"
            );
        }
    }
    load_config(&config_path)
}

pub fn load_config(path: &Path) -> Config {
    let content = fs::read_to_string(path).unwrap_or_default();
    tracing::debug!(path = %path.display(), "loaded config");
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Config {
    let mut config = Config::default();
    let mut in_startup = false;

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if comment.starts_with("prompt") {
                config.prompt = None;
            } else if comment.eq_ignore_ascii_case("startup") {
                in_startup = true;
            }
            continue;
        }

        if in_startup {
            config.startup.push(line.to_string());
        } else if let Some((key, value)) = line.split_once('=') {
            if key.trim() == "prompt" {
                config.prompt = Some(value.trim().trim_matches('"').to_string());
            }
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_parses_to_defaults() {
        assert_eq!(parse_config(DEFAULT_CONFIG), Config::default());
    }

    #[test]
    fn test_prompt_and_startup() {
        let config = parse_config("prompt = \"lab> \"\n\n#startup\nE ready\n  W  \n");
        assert_eq!(config.prompt.as_deref(), Some("lab> "));
        assert_eq!(config.startup, vec!["E ready", "W"]);
    }

    #[test]
    fn test_commented_prompt_is_ignored() {
        let config = parse_config("prompt = \"a> \"\n#prompt = \"b> \"\n");
        assert_eq!(config.prompt, None);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(&dir.path().join("absent.conf")), Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mnesh.conf");
        fs::write(&path, "#startup\nE hi\n").unwrap();
        assert_eq!(load_config(&path).startup, vec!["E hi"]);
    }
}
