use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SearchError};
use crate::types::Trigger;

// Options of one search bar instance. Set at construction, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawOptions")]
pub struct Configuration {
    url: String,
    path: String,
    field: String,
    trigger: String,
}

// The widget's option object as hosts write it. `null` counts as absent and
// the legacy names (`filterProperty`, `triggerWhen`) are read too; when both
// spellings are present the current name wins. Unknown keys like `styles`
// are ignored.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawOptions {
    url: Option<String>,
    filter: Option<String>,
    path: Option<String>,
    field: Option<String>,
    filter_property: Option<String>,
    trigger: Option<String>,
    trigger_when: Option<String>,
}

impl From<RawOptions> for Configuration {
    fn from(raw: RawOptions) -> Self {
        Self {
            url: raw.url.unwrap_or_default(),
            path: raw.filter.or(raw.path).unwrap_or_default(),
            field: raw.field.or(raw.filter_property).unwrap_or_default(),
            trigger: raw
                .trigger
                .or(raw.trigger_when)
                .unwrap_or_else(|| Trigger::Click.as_str().to_string()),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            url: String::new(),
            path: String::new(),
            field: String::new(),
            trigger: Trigger::Click.as_str().to_string(),
        }
    }
}

impl Configuration {
    pub fn new(url: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            field: field.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger.as_str().to_string();
        self
    }

    // Unrecognized names only surface when the bar is mounted.
    pub fn with_trigger_name(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = trigger.into();
        self
    }

    pub fn from_options(options: Value) -> Result<Self> {
        serde_json::from_value(options)
            .map_err(|e| SearchError::configuration(format!("malformed options: {e}")))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| SearchError::configuration(format!("malformed options: {e}")))
    }

    // Same keys as `from_options`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SearchError::configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    // An empty trigger falls back to click, anything unrecognized is an error.
    pub fn trigger(&self) -> Result<Trigger> {
        if self.trigger.is_empty() {
            return Ok(Trigger::Click);
        }
        Trigger::parse(&self.trigger).ok_or_else(|| {
            SearchError::configuration(format!("invalid trigger event: {:?}", self.trigger))
        })
    }

    // Checked before every search, ahead of any I/O.
    pub fn ensure_searchable(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(SearchError::configuration("URL is required"));
        }
        if self.field.is_empty() {
            return Err(SearchError::configuration("filter property is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_legacy_option_names() {
        let config = Configuration::from_options(json!({
            "url": "https://example.com/data.json",
            "filter": "items.list",
            "filterProperty": "name",
            "triggerWhen": "keyup",
            "styles": { "iconColor": "red" }
        }))
        .unwrap();

        assert_eq!(config.url(), "https://example.com/data.json");
        assert_eq!(config.path(), "items.list");
        assert_eq!(config.field(), "name");
        assert_eq!(config.trigger().unwrap(), Trigger::Keyup);
    }

    #[test]
    fn defaults_to_root_path_and_click_trigger() {
        let config = Configuration::from_options(json!({
            "url": "https://example.com/data.json",
            "field": "name"
        }))
        .unwrap();

        assert_eq!(config.path(), "");
        assert_eq!(config.trigger().unwrap(), Trigger::Click);
        assert!(config.ensure_searchable().is_ok());
    }

    #[test]
    fn unknown_trigger_is_a_configuration_failure() {
        let config = Configuration::from_options(json!({
            "url": "https://example.com/data.json",
            "field": "name",
            "trigger": "hover"
        }))
        .unwrap();

        assert!(matches!(config.trigger(), Err(SearchError::Configuration(_))));
    }

    #[test]
    fn missing_url_or_field_is_not_searchable() {
        let no_url = Configuration::new("", "name");
        let no_field = Configuration::new("https://example.com", "");

        assert!(matches!(no_url.ensure_searchable(), Err(SearchError::Configuration(_))));
        assert!(matches!(no_field.ensure_searchable(), Err(SearchError::Configuration(_))));
    }

    #[test]
    fn builder_matches_deserialized_options() {
        let built = Configuration::new("https://example.com", "n")
            .with_path("a.b")
            .with_trigger(Trigger::Keyup);
        let parsed = Configuration::from_json_str(
            r#"{"url":"https://example.com","path":"a.b","field":"n","trigger":"keyup"}"#,
        )
        .unwrap();

        assert_eq!(built, parsed);
    }

    #[test]
    fn overrides_replace_loaded_values() {
        let config = Configuration::from_options(json!({
            "url": "https://old.example.com",
            "filterProperty": "title",
            "triggerWhen": "keyup"
        }))
        .unwrap()
        .with_url("https://new.example.com")
        .with_field("name")
        .with_trigger_name("click");

        assert_eq!(config.url(), "https://new.example.com");
        assert_eq!(config.field(), "name");
        assert_eq!(config.trigger().unwrap(), Trigger::Click);
    }

    #[test]
    fn load_reports_unreadable_file() {
        let missing = std::env::temp_dir().join("search-bar-options-that-do-not-exist.json");

        assert!(matches!(
            Configuration::load(&missing),
            Err(SearchError::Configuration(_))
        ));
    }

    #[test]
    fn load_reads_options_file() {
        let path = std::env::temp_dir().join(format!("search-bar-options-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"url":"https://example.com","filter":"data","field":"name"}"#).unwrap();

        let config = Configuration::load(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.path(), "data");
        assert_eq!(config.field(), "name");
    }

    #[test]
    fn null_options_fall_back_to_defaults() {
        let config = Configuration::from_options(json!({
            "url": null,
            "filter": null,
            "filterProperty": "name",
            "triggerWhen": null
        }))
        .unwrap();

        assert_eq!(config.url(), "");
        assert_eq!(config.path(), "");
        assert_eq!(config.trigger().unwrap(), Trigger::Click);
        assert!(matches!(config.ensure_searchable(), Err(SearchError::Configuration(_))));
    }

    #[test]
    fn empty_trigger_means_click() {
        let config = Configuration::from_options(json!({
            "url": "https://example.com",
            "field": "name",
            "triggerWhen": ""
        }))
        .unwrap();

        assert_eq!(config.trigger().unwrap(), Trigger::Click);
    }

    #[test]
    fn current_names_win_over_legacy_ones() {
        let config = Configuration::from_options(json!({
            "url": "https://example.com",
            "filter": "items",
            "path": "rows",
            "field": "name",
            "filterProperty": "title",
            "trigger": "keyup",
            "triggerWhen": "click"
        }))
        .unwrap();

        assert_eq!(config.path(), "items");
        assert_eq!(config.field(), "name");
        assert_eq!(config.trigger().unwrap(), Trigger::Keyup);
    }

    #[test]
    fn non_object_options_are_rejected() {
        assert!(matches!(
            Configuration::from_options(json!("https://example.com")),
            Err(SearchError::Configuration(_))
        ));
    }
}
