//! Shared UI crate for Mood Tracker: components, pages and the platform-neutral
//! logic behind them. The web, desktop and mobile shells only add routing and
//! a backend.

pub mod components;
pub mod core;
pub mod entry;
pub mod history;
pub mod i18n;
pub mod views;

#[cfg(test)]
mod tests;
