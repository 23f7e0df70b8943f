use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::interaction::TrackerOptions;
use crate::resolve::{ResolutionPolicy, DEFAULT_CONTAINER_RATIO};
use crate::scanner::{ScanOptions, DEFAULT_MIN_VISIBLE_PX};

/// Scanner settings (`[scan]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Boxes must exceed this many pixels on both axes to count as visible.
    pub min_visible_px: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_visible_px: DEFAULT_MIN_VISIBLE_PX,
        }
    }
}

impl ScanConfig {
    pub fn options(&self) -> ScanOptions {
        ScanOptions {
            min_visible_px: self.min_visible_px,
        }
    }
}

/// Resolution settings (`[resolver]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Max wrapper-to-video size ratio for position-based resolution.
    pub container_ratio: f64,
    /// Rule precedence, first match wins.
    pub policy: ResolutionPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            container_ratio: DEFAULT_CONTAINER_RATIO,
            policy: ResolutionPolicy::default(),
        }
    }
}

/// Batch download settings (`[dispatch]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Delay between successive downloads of a batch, in milliseconds.
    pub stagger_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { stagger_ms: 1000 }
    }
}

impl DispatchConfig {
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

/// On-page UI settings (`[presentation]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Toast lifetime in milliseconds.
    pub toast_ttl_ms: u64,
    /// Period of the decoration re-scan, in milliseconds.
    pub rescan_interval_ms: u64,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            toast_ttl_ms: 5000,
            rescan_interval_ms: 1000,
            thumbnail_width: 120,
            thumbnail_height: 68,
        }
    }
}

impl PresentationConfig {
    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    pub fn rescan_interval(&self) -> Duration {
        Duration::from_millis(self.rescan_interval_ms)
    }
}

/// Global configuration loaded from `~/.config/soradl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoradlConfig {
    /// Hostname fragments the popup actions are enabled on.
    pub compatible_domains: Vec<String>,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub tracker: TrackerOptions,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
}

impl Default for SoradlConfig {
    fn default() -> Self {
        Self {
            compatible_domains: ["openai.com", "oaistatic.com", "chatgpt.com", "sora.com"]
                .into_iter()
                .map(String::from)
                .collect(),
            scan: ScanConfig::default(),
            tracker: TrackerOptions::default(),
            resolver: ResolverConfig::default(),
            dispatch: DispatchConfig::default(),
            presentation: PresentationConfig::default(),
        }
    }
}

impl SoradlConfig {
    /// Whether `hostname` belongs to one of the compatible domains.
    pub fn is_compatible_host(&self, hostname: &str) -> bool {
        self.compatible_domains
            .iter()
            .any(|d| hostname.contains(d.as_str()))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("soradl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SoradlConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<SoradlConfig> {
    if !path.exists() {
        let default_cfg = SoradlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: SoradlConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolutionRule;

    #[test]
    fn default_config_values() {
        let cfg = SoradlConfig::default();
        assert_eq!(cfg.dispatch.stagger_ms, 1000);
        assert_eq!(cfg.presentation.toast_ttl_ms, 5000);
        assert_eq!(cfg.tracker.hover_ancestor_depth, 3);
        assert_eq!(cfg.tracker.context_ancestor_depth, 5);
        assert_eq!(cfg.resolver.policy, ResolutionPolicy::default());
        assert!((cfg.scan.min_visible_px - 50.0).abs() < 1e-9);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = SoradlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SoradlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.compatible_domains, cfg.compatible_domains);
        assert_eq!(parsed.tracker, cfg.tracker);
        assert_eq!(parsed.resolver.policy, cfg.resolver.policy);
    }

    #[test]
    fn config_toml_partial_sections() {
        let toml = r#"
            compatible_domains = ["sora.com"]

            [dispatch]
            stagger_ms = 250

            [resolver.policy]
            order = ["playing", "hovered", "first"]
        "#;
        let cfg: SoradlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.dispatch.stagger(), Duration::from_millis(250));
        assert_eq!(
            cfg.resolver.policy.order,
            vec![
                ResolutionRule::Playing,
                ResolutionRule::Hovered,
                ResolutionRule::First
            ]
        );
        assert!((cfg.resolver.container_ratio - 2.0).abs() < 1e-9);
        assert_eq!(cfg.presentation.rescan_interval_ms, 1000);
    }

    #[test]
    fn compatible_hosts() {
        let cfg = SoradlConfig::default();
        assert!(cfg.is_compatible_host("sora.com"));
        assert!(cfg.is_compatible_host("videos.openai.com"));
        assert!(!cfg.is_compatible_host("example.org"));
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.dispatch.stagger_ms, 1000);
        let again = load_or_init_at(&path).unwrap();
        assert_eq!(again.compatible_domains, cfg.compatible_domains);
    }
}
