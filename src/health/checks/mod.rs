//! Built-in health checks for core systems

pub mod build_info;
pub mod config;
pub mod egui_context;
pub mod system_info;
pub mod track;
pub mod world;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use egui_context::EguiContextCheck;
pub use system_info::SystemInfoCheck;
pub use track::TrackCheck;
pub use world::WorldCheck;
