pub mod color;
pub mod color_cycle;
pub mod config;
pub mod constants;
pub mod controls;
pub mod effects;
pub mod error;
pub mod frame_rate;
pub mod layers;
pub mod params;
pub mod point_cloud;
pub mod quality;
pub mod smoothing;
pub mod visualizer;
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

pub use color_cycle::*;
pub use config::*;
pub use constants::*;
pub use controls::*;
pub use effects::*;
pub use error::*;
pub use frame_rate::*;
pub use layers::*;
pub use params::*;
pub use point_cloud::*;
pub use quality::*;
pub use smoothing::*;
pub use visualizer::*;
