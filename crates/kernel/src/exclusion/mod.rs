//! Sitemap exclusion rules.
//!
//! - [`ExclusionRules`]: the typed rule set for one render
//! - [`RulesDecoder`]: builds rules from the option bag, owning all coercion
//! - [`resolve`] / [`resolve_terms`]: filter catalogs down to eligible entries

mod decoder;
mod resolver;
mod rules;

pub use decoder::{RawOptions, RulesDecoder, is_enabled, parse_id_list, split_list};
pub use resolver::{
    ExclusionReason, item_exclusion, is_item_excluded, is_term_excluded, resolve, resolve_terms,
};
pub use rules::{ExclusionRules, TermExclusion};
