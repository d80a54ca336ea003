/// Shared modules used across the application
pub mod config;
pub mod i18n;
pub mod logging;
pub mod storage;
pub mod theme;

// Re-export commonly used items
pub use config::{Config, ThemeMode};
pub use i18n::I18n;
pub use storage::{FileStorage, KeyValueStorage};
#[cfg(test)]
pub use storage::MemoryStorage;
pub use theme::ModernTheme;
