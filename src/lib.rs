//! Vault Arena - wagered duel engine for a chat-bot economy

pub mod core;
pub mod duel;
pub mod economy;
pub mod games;
pub mod ledger;
