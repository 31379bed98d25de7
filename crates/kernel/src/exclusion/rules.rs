//! Typed exclusion rule set.

use std::collections::{BTreeMap, BTreeSet};

use crate::content::TermIndex;
use crate::models::{Term, TermRef};

/// How excluded terms are identified for one render.
///
/// Exactly one mode is active; the two never combine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermExclusion {
    /// Excluded term IDs per taxonomy.
    Ids(BTreeMap<String, BTreeSet<i64>>),

    /// Excluded term slugs per taxonomy.
    Slugs(BTreeMap<String, BTreeSet<String>>),
}

impl Default for TermExclusion {
    fn default() -> Self {
        Self::Ids(BTreeMap::new())
    }
}

impl TermExclusion {
    pub fn is_slug_mode(&self) -> bool {
        matches!(self, Self::Slugs(_))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Ids(map) => map.values().all(BTreeSet::is_empty),
            Self::Slugs(map) => map.values().all(BTreeSet::is_empty),
        }
    }

    /// Check a catalog term against the exclusion lists.
    pub fn matches_term(&self, term: &Term) -> bool {
        match self {
            Self::Ids(map) => map
                .get(&term.taxonomy)
                .is_some_and(|ids| ids.contains(&term.id)),
            Self::Slugs(map) => map
                .get(&term.taxonomy)
                .is_some_and(|slugs| slugs.contains(&term.slug)),
        }
    }

    /// Check an item's term reference against the exclusion lists.
    ///
    /// In slug mode the slug comes from the term index; a reference to a
    /// term missing from the catalog never matches.
    pub fn matches_ref(&self, term: &TermRef, index: &TermIndex<'_>) -> bool {
        match self {
            Self::Ids(map) => map
                .get(&term.taxonomy)
                .is_some_and(|ids| ids.contains(&term.id)),
            Self::Slugs(_) => index
                .get(&term.taxonomy, term.id)
                .is_some_and(|t| self.matches_term(t)),
        }
    }
}

/// Exclusion rules for one sitemap render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionRules {
    /// Content kinds dropped entirely.
    pub excluded_post_types: BTreeSet<String>,

    /// Taxonomies dropped entirely (and ignored for cascading).
    pub excluded_taxonomies: BTreeSet<String>,

    /// Excluded item IDs per content kind.
    pub excluded_item_ids: BTreeMap<String, BTreeSet<i64>>,

    /// Excluded terms, by ID or by slug.
    pub term_exclusion: TermExclusion,

    /// Drop items associated with any excluded term.
    pub cascade_post_exclusion_by_terms: bool,
}

impl ExclusionRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude a content kind.
    pub fn exclude_post_type(mut self, item_type: impl Into<String>) -> Self {
        self.excluded_post_types.insert(item_type.into());
        self
    }

    /// Exclude a taxonomy.
    pub fn exclude_taxonomy(mut self, taxonomy: impl Into<String>) -> Self {
        self.excluded_taxonomies.insert(taxonomy.into());
        self
    }

    /// Exclude items of a content kind by ID.
    pub fn exclude_items(mut self, item_type: impl Into<String>, ids: &[i64]) -> Self {
        self.excluded_item_ids
            .entry(item_type.into())
            .or_default()
            .extend(ids.iter().copied());
        self
    }

    /// Exclude terms by ID. Discards any slug lists.
    pub fn exclude_term_ids(mut self, taxonomy: impl Into<String>, ids: &[i64]) -> Self {
        if self.term_exclusion.is_slug_mode() {
            self.term_exclusion = TermExclusion::Ids(BTreeMap::new());
        }
        if let TermExclusion::Ids(map) = &mut self.term_exclusion {
            map.entry(taxonomy.into())
                .or_default()
                .extend(ids.iter().copied());
        }
        self
    }

    /// Exclude terms by slug. Discards any ID lists.
    pub fn exclude_term_slugs(mut self, taxonomy: impl Into<String>, slugs: &[&str]) -> Self {
        if !self.term_exclusion.is_slug_mode() {
            self.term_exclusion = TermExclusion::Slugs(BTreeMap::new());
        }
        if let TermExclusion::Slugs(map) = &mut self.term_exclusion {
            map.entry(taxonomy.into())
                .or_default()
                .extend(slugs.iter().map(|s| (*s).to_string()));
        }
        self
    }

    /// Enable or disable cascading exclusion from terms to items.
    pub fn cascade_by_terms(mut self, enabled: bool) -> Self {
        self.cascade_post_exclusion_by_terms = enabled;
        self
    }

    pub fn is_post_type_excluded(&self, item_type: &str) -> bool {
        self.excluded_post_types.contains(item_type)
    }

    pub fn is_taxonomy_excluded(&self, taxonomy: &str) -> bool {
        self.excluded_taxonomies.contains(taxonomy)
    }

    /// Check the explicit per-kind ID list.
    pub fn is_item_id_excluded(&self, item_type: &str, id: i64) -> bool {
        self.excluded_item_ids
            .get(item_type)
            .is_some_and(|ids| ids.contains(&id))
    }

    /// True when no rule would drop anything.
    pub fn is_empty(&self) -> bool {
        self.excluded_post_types.is_empty()
            && self.excluded_taxonomies.is_empty()
            && self.excluded_item_ids.values().all(BTreeSet::is_empty)
            && self.term_exclusion.is_empty()
    }
}
