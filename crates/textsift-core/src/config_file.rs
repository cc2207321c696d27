use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ExtractionConfig;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub limits: Option<LimitsConfig>,
    pub timeouts: Option<TimeoutsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub min_text_chars: Option<usize>,
    pub min_pdf_bytes: Option<usize>,
    pub full_page_cap: Option<usize>,
    pub legacy_page_cap: Option<usize>,
    /// Caller-side ceiling on accepted file size, in megabytes.
    pub max_size_mb: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    pub fast_secs: Option<u64>,
    pub full_secs: Option<u64>,
    pub page_budget_secs: Option<u64>,
    pub legacy_secs: Option<u64>,
}

/// Platform config directory path: `<config_dir>/textsift/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("textsift").join("config.toml"))
}

/// Load config by cascading CWD `.textsift.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".textsift.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let limits = Some(LimitsConfig {
        min_text_chars: pick(&overlay, &base, |l| l.min_text_chars),
        min_pdf_bytes: pick(&overlay, &base, |l| l.min_pdf_bytes),
        full_page_cap: pick(&overlay, &base, |l| l.full_page_cap),
        legacy_page_cap: pick(&overlay, &base, |l| l.legacy_page_cap),
        max_size_mb: pick(&overlay, &base, |l| l.max_size_mb),
    });
    let timeouts = Some(TimeoutsConfig {
        fast_secs: pick_t(&overlay, &base, |t| t.fast_secs),
        full_secs: pick_t(&overlay, &base, |t| t.full_secs),
        page_budget_secs: pick_t(&overlay, &base, |t| t.page_budget_secs),
        legacy_secs: pick_t(&overlay, &base, |t| t.legacy_secs),
    });
    ConfigFile { limits, timeouts }
}

fn pick<T>(
    overlay: &ConfigFile,
    base: &ConfigFile,
    f: impl Fn(&LimitsConfig) -> Option<T>,
) -> Option<T> {
    overlay
        .limits
        .as_ref()
        .and_then(&f)
        .or_else(|| base.limits.as_ref().and_then(&f))
}

fn pick_t<T>(
    overlay: &ConfigFile,
    base: &ConfigFile,
    f: impl Fn(&TimeoutsConfig) -> Option<T>,
) -> Option<T> {
    overlay
        .timeouts
        .as_ref()
        .and_then(&f)
        .or_else(|| base.timeouts.as_ref().and_then(&f))
}

impl ConfigFile {
    /// Overlay this file's values onto an [`ExtractionConfig`].
    pub fn apply(&self, mut config: ExtractionConfig) -> ExtractionConfig {
        if let Some(limits) = &self.limits {
            if let Some(v) = limits.min_text_chars {
                config.min_text_chars = v;
            }
            if let Some(v) = limits.min_pdf_bytes {
                config.min_pdf_bytes = v;
            }
            if let Some(v) = limits.full_page_cap {
                config.full_page_cap = v;
            }
            if let Some(v) = limits.legacy_page_cap {
                config.legacy_page_cap = v;
            }
        }
        if let Some(timeouts) = &self.timeouts {
            if let Some(v) = timeouts.fast_secs {
                config.fast_timeout = Duration::from_secs(v);
            }
            if let Some(v) = timeouts.full_secs {
                config.full_timeout = Duration::from_secs(v);
            }
            if let Some(v) = timeouts.page_budget_secs {
                config.page_budget = Duration::from_secs(v);
            }
            if let Some(v) = timeouts.legacy_secs {
                config.legacy_timeout = Duration::from_secs(v);
            }
        }
        config
    }

    /// Configured file-size ceiling in megabytes, if any.
    pub fn max_size_mb(&self) -> Option<u64> {
        self.limits.as_ref().and_then(|l| l.max_size_mb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_partial_config() {
        let parsed: ConfigFile = toml::from_str(
            r#"
            [limits]
            min_text_chars = 50

            [timeouts]
            legacy_secs = 5
            "#,
        )
        .unwrap();
        let config = parsed.apply(ExtractionConfig::default());
        assert_eq!(config.min_text_chars, 50);
        assert_eq!(config.legacy_timeout, Duration::from_secs(5));
        // untouched fields keep their defaults
        assert_eq!(config.full_page_cap, 25);
    }

    #[test]
    fn overlay_wins_in_merge() {
        let base: ConfigFile = toml::from_str(
            "[limits]\nmin_text_chars = 50\nmax_size_mb = 20\n",
        )
        .unwrap();
        let overlay: ConfigFile = toml::from_str("[limits]\nmin_text_chars = 30\n").unwrap();
        let merged = merge(base, overlay);
        let limits = merged.limits.unwrap();
        assert_eq!(limits.min_text_chars, Some(30));
        assert_eq!(limits.max_size_mb, Some(20));
    }

    #[test]
    fn empty_file_applies_nothing() {
        let parsed: ConfigFile = toml::from_str("").unwrap();
        let config = parsed.apply(ExtractionConfig::default());
        assert_eq!(config.min_text_chars, 20);
        assert_eq!(parsed.max_size_mb(), None);
    }
}
