// region:    --- Modules

mod accumulator;
mod applier;
mod document;
mod engine;
mod error;
mod extract;
mod locator;
mod match_guard;
mod normalize;
mod operation;
mod store;
mod suggestion;

pub use accumulator::*;
pub use applier::*;
pub use document::*;
pub use engine::*;
pub use error::*;
pub use extract::*;
pub use locator::*;
pub use match_guard::*;
pub use normalize::*;
pub use operation::*;
pub use store::*;
pub use suggestion::*;

// endregion: --- Modules
