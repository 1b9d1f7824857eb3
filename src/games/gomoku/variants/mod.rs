//! Concrete rulesets.

mod freestyle;
mod pro;
mod tiny;

pub use freestyle::Freestyle;
pub use pro::Pro;
pub use tiny::Tiny;
