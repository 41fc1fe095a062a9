pub(crate) mod cache;
pub(crate) mod model;

pub use cache::DocumentCache;
pub use model::{DocumentModel, word_at};
