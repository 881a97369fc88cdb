use anyhow::{Context, Result};
use std::path::PathBuf;

const ENV_DB: &str = "CARDSPLIT_DB";
const ENV_PARTICIPANTS: &str = "CARDSPLIT_PARTICIPANTS";
const ENV_CARDS: &str = "CARDSPLIT_CARDS";
const ENV_BACKUP: &str = "CARDSPLIT_BACKUP";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, Default)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    /// Known participants. Empty means any name is accepted.
    pub(crate) participants: Vec<String>,
    /// Closed set of cards. Empty means free text.
    pub(crate) cards: Vec<String>,
    /// File every deleted purchase is appended to.
    pub(crate) backup_path: Option<PathBuf>,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(ENV_DB).filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path.trim()),
            None => default_db_path()?,
        };
        Ok(Self {
            db_path,
            participants: split_list(lookup(ENV_PARTICIPANTS).as_deref()),
            cards: split_list(lookup(ENV_CARDS).as_deref()),
            backup_path: lookup(ENV_BACKUP)
                .filter(|v| !v.trim().is_empty())
                .map(|v| PathBuf::from(v.trim())),
        })
    }

    pub(crate) fn knows_participant(&self, name: &str) -> bool {
        self.participants.is_empty() || self.participants.iter().any(|p| p == name)
    }

    pub(crate) fn knows_card(&self, card: &str) -> bool {
        self.cards.is_empty() || self.cards.iter().any(|c| c == card)
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "cardsplit", "cardsplit")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("cardsplit.db"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_explicit_db_path() {
        let config = config_from(&[(ENV_DB, "/tmp/ledger.db")]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/ledger.db"));
        assert!(config.backup_path.is_none());
    }

    #[test]
    fn test_participant_roster() {
        let config = config_from(&[(ENV_DB, "x.db"), (ENV_PARTICIPANTS, " Ana, Bruno ,,")]);
        assert_eq!(config.participants, vec!["Ana", "Bruno"]);
        assert!(config.knows_participant("Ana"));
        assert!(!config.knows_participant("ana"));
        assert!(!config.knows_participant("Carla"));
    }

    #[test]
    fn test_open_roster_accepts_anyone() {
        let config = config_from(&[(ENV_DB, "x.db")]);
        assert!(config.participants.is_empty());
        assert!(config.knows_participant("Anyone"));
        assert!(config.knows_card("Any card"));
    }

    #[test]
    fn test_closed_card_set() {
        let config = config_from(&[(ENV_DB, "x.db"), (ENV_CARDS, "Inter,Itau,Nubank")]);
        assert!(config.knows_card("Itau"));
        assert!(!config.knows_card("Amex"));
    }

    #[test]
    fn test_backup_path() {
        let config = config_from(&[(ENV_DB, "x.db"), (ENV_BACKUP, "deleted.csv")]);
        assert_eq!(config.backup_path, Some(PathBuf::from("deleted.csv")));
    }
}
