//! Read-through caching for data consulted on hot request paths.

mod settings;

pub use settings::SettingsCache;
