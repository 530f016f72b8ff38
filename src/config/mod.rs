//! Configuration management for `issue_desk`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`DESK_*`)
//! 3. Project config (./.issue-desk/config.yaml)
//! 4. User config (~/.config/issue-desk/config.yaml)
//! 5. Defaults
//!
//! Recognized keys: `locale`, `timezone`, `page-size`, `sort`,
//! `sort-direction`, `id-prefix`, `demo.count`, `demo.seed`, `demo.now`.
//!
//! `list` sorts by `created_date`, newest first, unless `sort` says
//! otherwise; `sort: none` keeps snapshot order.

use crate::error::{DeskError, Result};
use crate::query::{DEFAULT_PAGE_SIZE, SortDirection, SortField};
use crate::storage::DEFAULT_DEMO_COUNT;
use crate::util::id::IdConfig;
use crate::util::time::{DEFAULT_LOCALE, DateLabeler, DisplayZone, parse_locale};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-level config directory name.
pub const PROJECT_DIR: &str = ".issue-desk";
/// Config file name inside the user and project directories.
pub const CONFIG_FILENAME: &str = "config.yaml";
/// Prefix for environment overrides.
const ENV_PREFIX: &str = "DESK_";
/// Seed used by the demo dataset when none is configured.
pub const DEFAULT_DEMO_SEED: u64 = 42;

/// A flat map of normalized config keys to raw string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Set a key, normalizing its spelling.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(normalize_key(key), value.into());
    }

    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(layer_from_yaml_value(&value))
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from `DESK_*` variables in `vars`.
    ///
    /// `DESK_DEMO_COUNT` sets both `demo.count` and `demo-count`, so nested
    /// and hyphenated keys can be reached from one variable.
    #[must_use]
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                for variant in env_key_variants(stripped) {
                    layer.set(&variant, value.clone());
                }
            }
        }
        layer
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.values.get(&normalize_key(key))
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub locale: Option<String>,
    pub timezone: Option<String>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();
        if let Some(locale) = &self.locale {
            layer.set("locale", locale.clone());
        }
        if let Some(timezone) = &self.timezone {
            layer.set("timezone", timezone.clone());
        }
        layer
    }
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    layer.set("locale", DEFAULT_LOCALE);
    layer.set("timezone", "utc");
    layer.set("page-size", DEFAULT_PAGE_SIZE.to_string());
    layer.set("sort", "created_date");
    layer.set("sort-direction", "desc");
    layer.set("id-prefix", "iss");
    layer.set("demo.count", DEFAULT_DEMO_COUNT.to_string());
    layer.set("demo.seed", DEFAULT_DEMO_SEED.to_string());
    layer
}

/// Path of the user config file, if `HOME` is set.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    Some(
        Path::new(&home)
            .join(".config")
            .join("issue-desk")
            .join(CONFIG_FILENAME),
    )
}

/// Path of the project config file under `project_root`.
#[must_use]
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR).join(CONFIG_FILENAME)
}

/// Load configuration from every source in precedence order.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn load_config(project_root: &Path, cli: &CliOverrides) -> Result<ConfigLayer> {
    let user = match user_config_path() {
        Some(path) => ConfigLayer::from_yaml(&path)?,
        None => ConfigLayer::default(),
    };
    let project = ConfigLayer::from_yaml(&project_config_path(project_root))?;

    Ok(ConfigLayer::merge_layers(&[
        default_config_layer(),
        user,
        project,
        ConfigLayer::from_env(),
        cli.as_layer(),
    ]))
}

/// Typed view of a merged configuration.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub labeler: DateLabeler,
    pub page_size: usize,
    pub sort: Option<SortField>,
    pub sort_direction: SortDirection,
    pub id: IdConfig,
    pub demo_count: usize,
    pub demo_seed: u64,
    /// Anchor instant for demo timestamps; `None` means the current time.
    pub demo_now: Option<DateTime<Utc>>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            labeler: DateLabeler::default(),
            page_size: DEFAULT_PAGE_SIZE,
            sort: Some(SortField::CreatedDate),
            sort_direction: SortDirection::Descending,
            id: IdConfig::default(),
            demo_count: DEFAULT_DEMO_COUNT,
            demo_seed: DEFAULT_DEMO_SEED,
            demo_now: None,
        }
    }
}

impl DeskConfig {
    /// Resolve typed settings from a merged layer. Missing keys fall back to
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any present value cannot be parsed.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let defaults = Self::default();

        let locale = match layer.get("locale") {
            Some(value) => parse_locale(value)?,
            None => defaults.labeler.locale(),
        };
        let zone = match layer.get("timezone") {
            Some(value) => value.parse::<DisplayZone>()?,
            None => defaults.labeler.zone(),
        };

        let page_size = parse_usize(layer, "page-size")?.unwrap_or(defaults.page_size);
        if page_size == 0 {
            return Err(DeskError::Config("page-size must be at least 1".to_string()));
        }

        let sort = match layer.get("sort") {
            Some(value) => parse_sort_setting(value)?,
            None => defaults.sort,
        };
        let sort_direction = layer
            .get("sort-direction")
            .map(|value| value.parse::<SortDirection>())
            .transpose()?
            .unwrap_or(defaults.sort_direction);

        let id = layer
            .get("id-prefix")
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map_or(defaults.id, IdConfig::with_prefix);

        let demo_count = parse_usize(layer, "demo.count")?.unwrap_or(defaults.demo_count);
        let demo_seed = match layer.get("demo.seed") {
            Some(value) => value.trim().parse::<u64>().map_err(|_| {
                DeskError::Config(format!("demo.seed must be an unsigned integer, got '{value}'"))
            })?,
            None => defaults.demo_seed,
        };
        let demo_now = layer
            .get("demo.now")
            .map(|value| {
                DateTime::parse_from_rfc3339(value.trim())
                    .map(|at| at.with_timezone(&Utc))
                    .map_err(|_| {
                        DeskError::Config(format!(
                            "demo.now must be an RFC 3339 timestamp, got '{value}'"
                        ))
                    })
            })
            .transpose()?;

        Ok(Self {
            labeler: DateLabeler::new(locale, zone),
            page_size,
            sort,
            sort_direction,
            id,
            demo_count,
            demo_seed,
            demo_now,
        })
    }
}

/// Parse a sort setting; blank or `none` means "keep snapshot order".
///
/// # Errors
///
/// Returns `InvalidSortField` if the value names no sortable field.
pub fn parse_sort_setting(value: &str) -> Result<Option<SortField>> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    trimmed.parse::<SortField>().map(Some)
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn env_key_variants(raw: &str) -> Vec<String> {
    let raw_lower = raw.to_lowercase();
    vec![raw_lower.replace('_', "."), raw_lower.replace('_', "-")]
}

fn parse_usize(layer: &ConfigLayer, key: &str) -> Result<Option<usize>> {
    layer
        .get(key)
        .map(|value| {
            value.trim().parse::<usize>().map_err(|_| {
                DeskError::Config(format!("{key} must be a non-negative integer, got '{value}'"))
            })
        })
        .transpose()
}

fn layer_from_yaml_value(value: &serde_yaml::Value) -> ConfigLayer {
    let mut flat = HashMap::new();
    flatten_yaml(value, "", &mut flat);

    let mut layer = ConfigLayer::default();
    for (key, value) in flat {
        layer.set(&key, value);
    }
    layer
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Locale;
    use tempfile::TempDir;

    fn layer(pairs: &[(&str, &str)]) -> ConfigLayer {
        let mut layer = ConfigLayer::default();
        for (key, value) in pairs {
            layer.set(key, *value);
        }
        layer
    }

    #[test]
    fn defaults_resolve_to_default_config() {
        let config = DeskConfig::from_layer(&default_config_layer()).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.sort, Some(SortField::CreatedDate));
        assert_eq!(config.sort_direction, SortDirection::Descending);
        assert_eq!(config.demo_now, None);
        assert_eq!(config.id.prefix, "iss");
        assert_eq!(config.demo_count, 50);
        assert_eq!(config.demo_seed, DEFAULT_DEMO_SEED);
        assert_eq!(config.labeler.locale(), Locale::en_US);
        assert_eq!(config.labeler.zone(), DisplayZone::Utc);
    }

    #[test]
    fn merge_precedence_order() {
        let defaults = default_config_layer();
        let user = layer(&[("locale", "fr_FR"), ("page-size", "20")]);
        let project = layer(&[("locale", "de_DE")]);
        let env_layer =
            ConfigLayer::from_env_vars(vec![("DESK_PAGE_SIZE".to_string(), "25".to_string())]);
        let cli = CliOverrides {
            locale: Some("es_ES".to_string()),
            timezone: None,
        }
        .as_layer();

        let merged = ConfigLayer::merge_layers(&[defaults, user, project, env_layer, cli]);
        assert_eq!(merged.get("locale").unwrap(), "es_ES");
        assert_eq!(merged.get("page-size").unwrap(), "25");
        assert_eq!(merged.get("timezone").unwrap(), "utc");
    }

    #[test]
    fn env_vars_reach_nested_and_hyphenated_keys() {
        let vars = vec![
            ("DESK_DEMO_SEED".to_string(), "7".to_string()),
            ("DESK_SORT_DIRECTION".to_string(), "desc".to_string()),
            ("OTHER_VAR".to_string(), "ignored".to_string()),
        ];
        let env_layer = ConfigLayer::from_env_vars(vars);
        assert_eq!(env_layer.get("demo.seed").unwrap(), "7");
        assert_eq!(env_layer.get("sort-direction").unwrap(), "desc");
        assert!(env_layer.get("other-var").is_none());

        let config = DeskConfig::from_layer(&env_layer).unwrap();
        assert_eq!(config.demo_seed, 7);
        assert_eq!(config.sort_direction, SortDirection::Descending);
    }

    #[test]
    fn yaml_file_flattens_nested_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "locale: de_DE\ntimezone: \"+02:00\"\npage_size: 25\nsort: priority\ndemo:\n  count: 12\n",
        )
        .expect("write config");

        let layer = ConfigLayer::from_yaml(&path).unwrap();
        assert_eq!(layer.get("page-size").unwrap(), "25");
        assert_eq!(layer.get("demo.count").unwrap(), "12");

        let config = DeskConfig::from_layer(&layer).unwrap();
        assert_eq!(config.labeler.locale(), Locale::de_DE);
        assert!(matches!(config.labeler.zone(), DisplayZone::Fixed(_)));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.sort, Some(SortField::Priority));
        assert_eq!(config.demo_count, 12);
    }

    #[test]
    fn sort_none_keeps_snapshot_order() {
        let config = DeskConfig::from_layer(&layer(&[("sort", "none")])).unwrap();
        assert_eq!(config.sort, None);
        let config = DeskConfig::from_layer(&layer(&[("sort", " ")])).unwrap();
        assert_eq!(config.sort, None);
        let config = DeskConfig::from_layer(&layer(&[])).unwrap();
        assert_eq!(config.sort, Some(SortField::CreatedDate));
    }

    #[test]
    fn demo_now_pins_the_demo_clock() {
        let config =
            DeskConfig::from_layer(&layer(&[("demo.now", "2025-03-01T12:00:00+02:00")])).unwrap();
        assert_eq!(
            config.demo_now.map(|at| at.to_rfc3339()),
            Some("2025-03-01T10:00:00+00:00".to_string())
        );
        assert!(matches!(
            DeskConfig::from_layer(&layer(&[("demo.now", "yesterday")])),
            Err(DeskError::Config(_))
        ));
    }

    #[test]
    fn missing_yaml_is_empty_layer() {
        let temp = TempDir::new().expect("tempdir");
        let layer = ConfigLayer::from_yaml(&temp.path().join("absent.yaml")).unwrap();
        assert!(layer.values.is_empty());
    }

    #[test]
    fn load_config_reads_project_file() {
        let temp = TempDir::new().expect("tempdir");
        let dir = temp.path().join(PROJECT_DIR);
        fs::create_dir_all(&dir).expect("create project dir");
        fs::write(dir.join(CONFIG_FILENAME), "id-prefix: desk\n").expect("write config");

        let merged = load_config(temp.path(), &CliOverrides::default()).unwrap();
        let config = DeskConfig::from_layer(&merged).unwrap();
        assert_eq!(config.id.prefix, "desk");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "locale: [unclosed\n").expect("write config");
        assert!(matches!(
            ConfigLayer::from_yaml(&path),
            Err(DeskError::Yaml(_))
        ));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            DeskConfig::from_layer(&layer(&[("page-size", "0")])),
            Err(DeskError::Config(_))
        ));
        assert!(matches!(
            DeskConfig::from_layer(&layer(&[("page-size", "ten")])),
            Err(DeskError::Config(_))
        ));
        assert!(matches!(
            DeskConfig::from_layer(&layer(&[("locale", "xx_YY")])),
            Err(DeskError::InvalidLocale { .. })
        ));
        assert!(matches!(
            DeskConfig::from_layer(&layer(&[("timezone", "mars")])),
            Err(DeskError::Config(_))
        ));
        assert!(matches!(
            DeskConfig::from_layer(&layer(&[("sort", "owner")])),
            Err(DeskError::InvalidSortField { .. })
        ));
    }
}
