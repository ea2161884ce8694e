// Public modules
pub mod classify;
pub mod collector;
pub mod config;
pub mod digest;
pub mod document;
pub mod io;
pub mod models;
pub mod script;

// Re-export commonly used types
pub use classify::{Buckets, ReportCategory, ScriptCategory, Taxonomy, REPORT_TAXONOMY, SCRIPT_TAXONOMY};
pub use collector::NewsCollector;
pub use config::Config;
pub use digest::DigestRenderer;
pub use document::{Block, DocumentRenderer, ReportDocument};
pub use models::{Article, Priority};
pub use script::ScriptRenderer;
