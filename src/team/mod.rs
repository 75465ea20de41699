//! Team compositions and the text forms users type them in

pub mod composition;
pub mod parser;

pub use composition::TeamComposition;
pub use parser::{format_team, parse_slots, parse_team};
