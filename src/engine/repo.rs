//! Repository layer: all SQL lives under here.

pub mod areas;
pub mod completions;
pub mod tasks;

pub use areas::AreaRepo;
pub use completions::CompletionRepo;
pub use tasks::TaskRepo;
