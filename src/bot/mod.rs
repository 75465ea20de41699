//! Chat front-end: command parsing, routing and reply formatting
//!
//! Chat line -> Command -> CommandRouter -> Reply

pub mod command;
pub mod format;
pub mod reply;
pub mod router;

pub use command::Command;
pub use reply::{Reply, ReplyField, Tone};
pub use router::{error_reply, CommandRouter, User};
