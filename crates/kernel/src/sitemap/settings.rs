//! Generator settings decoded from the `sitemap_generator` option.

use std::fmt;

use serde_json::Value;

use crate::exclusion::{RawOptions, is_enabled};

/// Protocol limit on `<url>` entries per sitemap document.
pub const MAX_URLS_PER_SITEMAP: usize = 50_000;

const DEFAULT_PRIORITY: f32 = 0.5;

/// `<changefreq>` values allowed by the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeFreq {
    Always,
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" => Some(Self::Always),
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed generator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    /// List taxonomy sitemaps in the index and serve them.
    pub enable_sitemap_taxonomy: bool,

    /// Cache rendered documents.
    pub enable_cache: bool,

    /// Maximum `<url>` entries per module (1..=50000).
    pub item_limit: usize,

    /// `<changefreq>` written for every entry.
    pub default_freq: ChangeFreq,

    /// `<priority>` written for every entry (0.0..=1.0).
    pub default_priority: f32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            enable_sitemap_taxonomy: false,
            enable_cache: false,
            item_limit: MAX_URLS_PER_SITEMAP,
            default_freq: ChangeFreq::default(),
            default_priority: DEFAULT_PRIORITY,
        }
    }
}

impl GeneratorSettings {
    /// Decode settings; invalid values fall back to defaults.
    pub fn from_raw(raw: &RawOptions) -> Self {
        let defaults = Self::default();

        let flag = |field: &str| raw.generator_field(field).is_some_and(is_enabled);

        let item_limit = raw
            .generator_field("input_item_limit")
            .and_then(value_as_u64)
            .filter(|n| *n > 0)
            .map_or(defaults.item_limit, |n| {
                usize::try_from(n).map_or(MAX_URLS_PER_SITEMAP, |n| n.min(MAX_URLS_PER_SITEMAP))
            });

        let default_freq = raw
            .generator_field("input_default_freq")
            .and_then(Value::as_str)
            .and_then(ChangeFreq::parse)
            .unwrap_or(defaults.default_freq);

        let default_priority = raw
            .generator_field("input_default_priority")
            .and_then(value_as_f64)
            .filter(|p| p.is_finite())
            .map_or(defaults.default_priority, quantize_priority);

        Self {
            enable_sitemap_taxonomy: flag("enable_sitemap_taxonomy"),
            enable_cache: flag("enable_cache"),
            item_limit,
            default_freq,
            default_priority,
        }
    }
}

fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Clamp to 0.0..=1.0 and round to the one decimal the writer emits.
fn quantize_priority(priority: f64) -> f32 {
    ((priority.clamp(0.0, 1.0) * 10.0).round() / 10.0) as f32
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(generator: Value) -> GeneratorSettings {
        GeneratorSettings::from_raw(&RawOptions {
            generator: Some(generator),
            ..Default::default()
        })
    }

    #[test]
    fn defaults_when_missing() {
        assert_eq!(
            GeneratorSettings::from_raw(&RawOptions::default()),
            GeneratorSettings::default()
        );
    }

    #[test]
    fn flags_and_values() {
        let s = settings(json!({
            "enable_sitemap_taxonomy": "yes",
            "enable_cache": "",
            "input_item_limit": "100",
            "input_default_freq": "Weekly",
            "input_default_priority": 0.8,
        }));

        assert!(s.enable_sitemap_taxonomy);
        assert!(!s.enable_cache);
        assert_eq!(s.item_limit, 100);
        assert_eq!(s.default_freq, ChangeFreq::Weekly);
        assert!((s.default_priority - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn out_of_range_values_are_bounded() {
        let s = settings(json!({
            "input_item_limit": 1_000_000,
            "input_default_freq": "sometimes",
            "input_default_priority": "7",
        }));

        assert_eq!(s.item_limit, MAX_URLS_PER_SITEMAP);
        assert_eq!(s.default_freq, ChangeFreq::Daily);
        assert!((s.default_priority - 1.0).abs() < f32::EPSILON);

        assert_eq!(settings(json!({"input_item_limit": 0})).item_limit, MAX_URLS_PER_SITEMAP);
        assert_eq!(settings(json!({"input_item_limit": "-5"})).item_limit, MAX_URLS_PER_SITEMAP);
    }

    #[test]
    fn priority_matches_written_precision() {
        let s = settings(json!({"input_default_priority": "0.25"}));
        assert!((s.default_priority - 0.3).abs() < f32::EPSILON);
        assert_eq!(format!("{:.1}", s.default_priority), "0.3");

        let s = settings(json!({"input_default_priority": 0.44}));
        assert!((s.default_priority - 0.4).abs() < f32::EPSILON);
    }
}
