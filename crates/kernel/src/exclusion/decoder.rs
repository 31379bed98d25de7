//! Decoding exclusion rules from the option bag.
//!
//! Options are stringly typed: comma lists, "yes"/empty flags, maps of
//! name to comma list. All coercion lives here. Nothing in this module
//! fails: a malformed value means "no exclusion" for that dimension, and
//! an unparseable ID is skipped.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};

use super::rules::{ExclusionRules, TermExclusion};
use crate::option_storage::{OptionStorage, option_keys};

/// Generator fields that feed the rule set.
const FIELD_EXCLUDE_POST_TYPE: &str = "input_exclude_post_type";
const FIELD_EXCLUDE_TAXONOMY: &str = "input_exclude_taxonomy";
const FIELD_EXCLUDE_POSTS_BY_TERMS: &str = "enable_exclude_posts_by_terms";

/// Raw option values read for one render.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub generator: Option<Value>,
    pub excluded_posts: Option<Value>,
    pub excluded_terms: Option<Value>,
    pub exclude_terms_by_slugs: Option<Value>,
}

impl RawOptions {
    /// Read every option the sitemap kernel uses.
    pub async fn load(storage: &dyn OptionStorage) -> Result<Self> {
        Ok(Self {
            generator: storage.load(option_keys::GENERATOR).await?,
            excluded_posts: storage.load(option_keys::EXCLUDED_POSTS).await?,
            excluded_terms: storage.load(option_keys::EXCLUDED_TERMS).await?,
            exclude_terms_by_slugs: storage
                .load(option_keys::EXCLUDE_TERMS_BY_SLUGS)
                .await?,
        })
    }

    /// Read options, treating a storage failure as "nothing set".
    pub async fn load_or_default(storage: &dyn OptionStorage) -> Self {
        match Self::load(storage).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to read sitemap options, applying defaults");
                Self::default()
            }
        }
    }

    /// Look up a field of the generator settings object.
    pub fn generator_field(&self, field: &str) -> Option<&Value> {
        self.generator.as_ref().and_then(|g| g.get(field))
    }
}

/// Builds [`ExclusionRules`] from raw options.
pub struct RulesDecoder;

impl RulesDecoder {
    pub fn decode(raw: &RawOptions) -> ExclusionRules {
        let excluded_post_types = raw
            .generator_field(FIELD_EXCLUDE_POST_TYPE)
            .map(split_list)
            .unwrap_or_default()
            .into_iter()
            .collect();

        let excluded_taxonomies = raw
            .generator_field(FIELD_EXCLUDE_TAXONOMY)
            .map(split_list)
            .unwrap_or_default()
            .into_iter()
            .collect();

        let excluded_item_ids = decode_id_map(raw.excluded_posts.as_ref());

        let slug_mode = raw.exclude_terms_by_slugs.as_ref().is_some_and(is_enabled);
        let term_exclusion = if slug_mode {
            TermExclusion::Slugs(decode_slug_map(raw.excluded_terms.as_ref()))
        } else {
            TermExclusion::Ids(decode_id_map(raw.excluded_terms.as_ref()))
        };

        let cascade_post_exclusion_by_terms = raw
            .generator_field(FIELD_EXCLUDE_POSTS_BY_TERMS)
            .is_some_and(is_enabled);

        ExclusionRules {
            excluded_post_types,
            excluded_taxonomies,
            excluded_item_ids,
            term_exclusion,
            cascade_post_exclusion_by_terms,
        }
    }
}

/// Interpret an option flag.
///
/// `"yes"` (any case), `"1"`, `"on"`, `true` and non-zero numbers are
/// enabled; everything else, including the empty string, is disabled.
pub fn is_enabled(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("yes") || s == "1" || s.eq_ignore_ascii_case("on")
        }
        _ => false,
    }
}

/// Split a comma list into trimmed, non-empty entries.
///
/// Arrays are accepted as already-split lists; numbers become one entry.
pub fn split_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Number(n) => vec![n.to_string()],
        Value::Array(values) => values.iter().flat_map(split_list).collect(),
        _ => Vec::new(),
    }
}

/// Parse a comma list of positive integer IDs, skipping invalid entries.
pub fn parse_id_list(value: &Value) -> BTreeSet<i64> {
    split_list(value)
        .into_iter()
        .filter_map(|entry| match entry.parse::<i64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                debug!(entry = %entry, "ignoring invalid id in exclusion list");
                None
            }
        })
        .collect()
}

fn decode_id_map(value: Option<&Value>) -> BTreeMap<String, BTreeSet<i64>> {
    let Some(Value::Object(map)) = value else {
        return BTreeMap::new();
    };

    map.iter()
        .map(|(name, list)| (name.clone(), parse_id_list(list)))
        .filter(|(_, ids)| !ids.is_empty())
        .collect()
}

fn decode_slug_map(value: Option<&Value>) -> BTreeMap<String, BTreeSet<String>> {
    let Some(Value::Object(map)) = value else {
        return BTreeMap::new();
    };

    map.iter()
        .map(|(name, list)| (name.clone(), split_list(list).into_iter().collect()))
        .filter(|(_, slugs): &(String, BTreeSet<String>)| !slugs.is_empty())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::option_storage::MemoryOptionStorage;
    use serde_json::json;

    fn set(items: &[i64]) -> BTreeSet<i64> {
        items.iter().copied().collect()
    }

    #[test]
    fn empty_options_decode_to_no_rules() {
        let rules = RulesDecoder::decode(&RawOptions::default());

        assert!(rules.is_empty());
        assert!(!rules.cascade_post_exclusion_by_terms);
        assert!(!rules.term_exclusion.is_slug_mode());
    }

    #[test]
    fn comma_lists_are_trimmed() {
        let raw = RawOptions {
            generator: Some(json!({
                "input_exclude_post_type": " movie, ,book ",
                "input_exclude_taxonomy": "post_tag",
            })),
            ..Default::default()
        };

        let rules = RulesDecoder::decode(&raw);

        assert_eq!(
            rules.excluded_post_types.iter().collect::<Vec<_>>(),
            vec!["book", "movie"]
        );
        assert!(rules.is_taxonomy_excluded("post_tag"));
    }

    #[test]
    fn per_kind_ids_skip_garbage() {
        let raw = RawOptions {
            excluded_posts: Some(json!({
                "post": "1,2,3",
                "movie": "8, nine, 10, -4, 0",
                "page": "",
                "book": 12,
            })),
            ..Default::default()
        };

        let rules = RulesDecoder::decode(&raw);

        assert_eq!(rules.excluded_item_ids["post"], set(&[1, 2, 3]));
        assert_eq!(rules.excluded_item_ids["movie"], set(&[8, 10]));
        assert_eq!(rules.excluded_item_ids["book"], set(&[12]));
        assert!(!rules.excluded_item_ids.contains_key("page"));
    }

    #[test]
    fn term_lists_follow_slug_flag() {
        let excluded_terms = json!({"category": "1,2,news"});

        let by_id = RulesDecoder::decode(&RawOptions {
            excluded_terms: Some(excluded_terms.clone()),
            exclude_terms_by_slugs: Some(json!("")),
            ..Default::default()
        });
        let by_slug = RulesDecoder::decode(&RawOptions {
            excluded_terms: Some(excluded_terms),
            exclude_terms_by_slugs: Some(json!("yes")),
            ..Default::default()
        });

        match by_id.term_exclusion {
            TermExclusion::Ids(map) => assert_eq!(map["category"], set(&[1, 2])),
            TermExclusion::Slugs(_) => panic!("expected id mode"),
        }
        match by_slug.term_exclusion {
            TermExclusion::Slugs(map) => assert_eq!(map["category"].len(), 3),
            TermExclusion::Ids(_) => panic!("expected slug mode"),
        }
    }

    #[test]
    fn malformed_shapes_degrade_to_no_exclusion() {
        let raw = RawOptions {
            generator: Some(json!("not an object")),
            excluded_posts: Some(json!(["1", "2"])),
            excluded_terms: Some(json!(null)),
            exclude_terms_by_slugs: Some(json!({"nested": true})),
        };

        let rules = RulesDecoder::decode(&raw);

        assert!(rules.is_empty());
        assert!(!rules.term_exclusion.is_slug_mode());
    }

    #[test]
    fn flag_values() {
        assert!(is_enabled(&json!("yes")));
        assert!(is_enabled(&json!("YES")));
        assert!(is_enabled(&json!("1")));
        assert!(is_enabled(&json!(true)));
        assert!(is_enabled(&json!(1)));
        assert!(!is_enabled(&json!("")));
        assert!(!is_enabled(&json!("no")));
        assert!(!is_enabled(&json!(0)));
        assert!(!is_enabled(&json!(null)));
    }

    #[test]
    fn split_list_accepts_arrays() {
        assert_eq!(split_list(&json!(["a", "b,c", 4])), vec!["a", "b", "c", "4"]);
        assert!(split_list(&json!({})).is_empty());
    }

    #[tokio::test]
    async fn load_reads_all_option_keys() {
        let storage = MemoryOptionStorage::new();
        storage
            .save(
                option_keys::GENERATOR,
                &json!({"enable_exclude_posts_by_terms": "yes"}),
            )
            .await
            .unwrap();
        storage
            .save(option_keys::EXCLUDED_TERMS, &json!({"genre": "8,9,10"}))
            .await
            .unwrap();

        let rules = RulesDecoder::decode(&RawOptions::load_or_default(&storage).await);

        assert!(rules.cascade_post_exclusion_by_terms);
        assert_eq!(
            rules.term_exclusion,
            TermExclusion::Ids(BTreeMap::from([("genre".to_string(), set(&[8, 9, 10]))]))
        );
    }

    struct UnreadableOptions;

    #[async_trait::async_trait]
    impl OptionStorage for UnreadableOptions {
        async fn load(&self, _key: &str) -> Result<Option<Value>> {
            anyhow::bail!("options file locked")
        }
        async fn save(&self, _key: &str, _value: &Value) -> Result<()> {
            anyhow::bail!("options file locked")
        }
        async fn delete(&self, _key: &str) -> Result<bool> {
            anyhow::bail!("options file locked")
        }
        async fn keys(&self) -> Result<Vec<String>> {
            anyhow::bail!("options file locked")
        }
    }

    #[tokio::test]
    async fn unreadable_storage_decodes_to_no_rules() {
        let raw = RawOptions::load_or_default(&UnreadableOptions).await;

        assert!(raw.generator.is_none());
        assert!(RulesDecoder::decode(&raw).is_empty());
    }
}
