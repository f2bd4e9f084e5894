use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::MovemapConfig;
use crate::errors::{Error, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".movemap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parses and validates config from a TOML string
pub fn parse_config(contents: &str) -> Result<MovemapConfig> {
    let config: MovemapConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Loads a config file the user named explicitly; every failure is an error.
pub fn load_config_from(path: &Path) -> Result<MovemapConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::configuration(format!("cannot read {}: {}", path.display(), e))
    })?;
    let config = parse_config(&contents).map_err(|e| {
        Error::configuration(format!("invalid {}: {}", path.display(), e))
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Discovered config files are best effort: unreadable or invalid ones are
/// logged and skipped.
fn try_load_config_from_path(config_path: &Path) -> Option<MovemapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` followed by its parents, at most `max_depth` directories.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// `<user config dir>/movemap/config.toml`, when the platform has one.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("movemap").join("config.toml"))
}

/// Searches `start` and its ancestors, then the user config directory.
pub fn discover_config(start: PathBuf) -> MovemapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(user_config_path())
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            MovemapConfig::default()
        })
}

pub fn load_config() -> MovemapConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            MovemapConfig::default()
        }
    }
}

/// Contents written by `movemap init`.
pub fn default_config_toml() -> &'static str {
    r#"# Movemap Configuration

[algorithms]
enabled = ["mri", "ari", "rmmr"]
enable_field_refactorings = false

[parallel]
enabled = true
# max_concurrency = 4

[normalization]
# max-scale, min-max, z-score or none
policy = "max-scale"

[output]
min_accuracy = 0.0
"#
}

/// Writes the default config to `path`, refusing to overwrite unless forced.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::configuration(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }
    fs::write(path, default_config_toml())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmKind;
    use crate::entity::NormalizationPolicy;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_default_toml_parses_to_defaults() {
        let config = parse_config(default_config_toml()).unwrap();
        assert_eq!(config, MovemapConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = parse_config(indoc! {r#"
            [algorithms]
            enabled = ["RMMR"]

            [normalization]
            policy = "z-score"
        "#})
        .unwrap();
        assert_eq!(config.algorithms.enabled, vec![AlgorithmKind::Rmmr]);
        assert_eq!(config.normalization.policy, NormalizationPolicy::ZScore);
        assert!(config.parallel.enabled);
        assert_eq!(config.output.min_accuracy, 0.0);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let err = parse_config("[algorithms]\nenabled = [\"hac\"]\n").unwrap_err();
        assert!(err.to_string().contains("unknown algorithm"), "{}", err);
    }

    #[test]
    fn test_out_of_range_accuracy_is_rejected() {
        assert!(parse_config("[output]\nmin_accuracy = 1.5\n").is_err());
    }

    #[test]
    fn test_discovery_walks_up_and_skips_invalid_files() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[parallel]\nenabled = false\n",
        )
        .unwrap();
        fs::write(root.path().join("a").join(CONFIG_FILE_NAME), "not = [valid").unwrap();

        let config = discover_config(nested);
        assert!(!config.parallel.enabled);
    }

    #[test]
    fn test_explicit_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[output]\nmin_accuracy = \"high\"\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(Error::Configuration(_))));
        assert!(load_config_from(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_write_default_config_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        write_default_config(&path, false).unwrap();
        assert!(write_default_config(&path, false).is_err());
        write_default_config(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), default_config_toml());
    }
}
