use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TermbaseConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("termbase.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".termbase").join("termbase.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<TermbaseConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TermbaseConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &TermbaseConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("termbase.toml");

        let config = TermbaseConfig {
            database: Some("graph.db".to_string()),
            port: Some(9000),
        };
        write_config(&path, &config, false).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("graph.db"));
        assert_eq!(loaded.port, Some(9000));

        // a second write without --force is refused
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();
    }

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_config(Some(&path)).unwrap().is_none());
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = default_database_path_in(dir.path());
        ensure_db_dir(&db_path).unwrap();
        assert!(db_path.parent().unwrap().exists());
    }
}
