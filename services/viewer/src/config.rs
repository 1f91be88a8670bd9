use std::path::PathBuf;

use anyhow::{bail, Result};
use dataset::{Choice, FilterState, StatusFlag};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub state_path: PathBuf,
    pub upload: Option<PathBuf>,
    pub filter: FilterState,
    pub select: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let state_path = var("CVDP_STATE_PATH")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "cvdp_state.json".to_string());
        let upload = var("CVDP_UPLOAD").filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        let mut filter = FilterState::default()
            .with_category(Choice::parse(&var("CVDP_CATEGORY").unwrap_or_default()))
            .with_difficulty(Choice::parse(&var("CVDP_DIFFICULTY").unwrap_or_default()));
        for token in var("CVDP_STATUS").unwrap_or_default().split(',') {
            if token.trim().is_empty() {
                continue;
            }
            match token.parse::<StatusFlag>() {
                Ok(flag) => filter = filter.with_status(flag, true),
                Err(e) => bail!("CVDP_STATUS: {e}"),
            }
        }

        let select = var("CVDP_SELECT").filter(|v| !v.trim().is_empty());

        Ok(Self {
            state_path: PathBuf::from(state_path),
            upload,
            filter,
            select,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.state_path, PathBuf::from("cvdp_state.json"));
        assert!(cfg.upload.is_none());
        assert!(cfg.filter.is_default());
        assert!(cfg.select.is_none());
    }

    #[test]
    fn test_filter_from_env() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("CVDP_CATEGORY", "cid002"),
            ("CVDP_DIFFICULTY", "all"),
            ("CVDP_STATUS", "favorite, solved"),
        ]))
        .unwrap();

        assert_eq!(cfg.filter.category, Choice::Only("cid002".into()));
        assert_eq!(cfg.filter.difficulty, Choice::All);
        assert_eq!(cfg.filter.status.len(), 2);
    }

    #[test]
    fn test_unknown_status_fails_fast() {
        let err = AppConfig::from_lookup(lookup(&[("CVDP_STATUS", "starred")])).unwrap_err();
        assert!(err.to_string().contains("starred"));
    }
}
