//! Content models.

pub mod item;
pub mod item_type;
pub mod taxonomy;
pub mod term;

pub use item::{ContentItem, TermRef};
pub use item_type::ItemType;
pub use taxonomy::Taxonomy;
pub use term::Term;
