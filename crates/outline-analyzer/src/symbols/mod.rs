pub(crate) mod builder;
pub(crate) mod classifier;
pub(crate) mod provider;
pub(crate) mod types;
pub(crate) mod walker;

pub use provider::OutlineProvider;
pub use types::{OutlineError, OutlineMode};
