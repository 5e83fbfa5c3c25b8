// HTTP handlers, one module per API surface.

pub mod account;
pub mod admin;
pub mod challenges;
pub mod competition;
pub mod content;
