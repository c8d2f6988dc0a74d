//! CLI commands

mod authorize;
mod exchange;

pub use authorize::{authorize, AuthorizeArgs};
pub use exchange::{exchange, render, ExchangeArgs};
