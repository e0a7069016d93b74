mod config;
mod store;

pub use config::EditorConfig;
pub use store::EditorStore;
