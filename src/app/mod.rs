pub mod app;
pub mod handler;

pub use app::AssetPaths;
pub use handler::{AppHandler, LaunchOptions};
