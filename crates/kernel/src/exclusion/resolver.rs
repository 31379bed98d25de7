//! Exclusion resolution.
//!
//! Pure functions over a catalog snapshot and a rule set. Order of the
//! input is preserved; excluding is monotonic, so adding a rule can only
//! shrink the output.
//!
//! An item is dropped when, in this order:
//! 1. its content kind is excluded,
//! 2. its ID is listed for its kind (regardless of cascading),
//! 3. cascading is on and any of its terms outside excluded taxonomies is
//!    an excluded term. One matching term is enough.

use std::fmt;

use crate::content::TermIndex;
use crate::models::{ContentItem, Term, TermRef};

use super::rules::ExclusionRules;

/// Why an item was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Content kind is excluded.
    PostType,

    /// Item ID is listed for its kind.
    ItemId,

    /// Item carries an excluded term.
    Term(TermRef),
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PostType => write!(f, "post type excluded"),
            Self::ItemId => write!(f, "item id excluded"),
            Self::Term(t) => write!(f, "term {}:{} excluded", t.taxonomy, t.id),
        }
    }
}

/// Find the first rule that drops an item, if any.
pub fn item_exclusion(
    item: &ContentItem,
    index: &TermIndex<'_>,
    rules: &ExclusionRules,
) -> Option<ExclusionReason> {
    if rules.is_post_type_excluded(&item.item_type) {
        return Some(ExclusionReason::PostType);
    }

    if rules.is_item_id_excluded(&item.item_type, item.id) {
        return Some(ExclusionReason::ItemId);
    }

    if !rules.cascade_post_exclusion_by_terms {
        return None;
    }

    item.terms
        .iter()
        .filter(|t| !rules.is_taxonomy_excluded(&t.taxonomy))
        .find(|t| rules.term_exclusion.matches_ref(t, index))
        .map(|t| ExclusionReason::Term(t.clone()))
}

/// Check whether an item is dropped from the sitemap.
pub fn is_item_excluded(item: &ContentItem, index: &TermIndex<'_>, rules: &ExclusionRules) -> bool {
    item_exclusion(item, index, rules).is_some()
}

/// Check whether a term is dropped from its taxonomy sitemap.
pub fn is_term_excluded(term: &Term, rules: &ExclusionRules) -> bool {
    rules.is_taxonomy_excluded(&term.taxonomy) || rules.term_exclusion.matches_term(term)
}

/// Items eligible for the sitemap, in catalog order.
pub fn resolve(items: &[ContentItem], terms: &[Term], rules: &ExclusionRules) -> Vec<ContentItem> {
    let index = TermIndex::new(terms);

    items
        .iter()
        .filter(|item| !is_item_excluded(item, &index, rules))
        .cloned()
        .collect()
}

/// Terms eligible for taxonomy sitemaps, in catalog order.
pub fn resolve_terms(terms: &[Term], rules: &ExclusionRules) -> Vec<Term> {
    terms
        .iter()
        .filter(|term| !is_term_excluded(term, rules))
        .cloned()
        .collect()
}
