mod category;
mod constants;
mod face;
mod phase;
mod rules;
mod snapshot;

pub use category::*;
pub use constants::*;
pub use face::*;
pub use phase::*;
pub use rules::*;
pub use snapshot::*;
