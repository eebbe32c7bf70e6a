pub mod config;
pub mod czml;
pub mod geojson;

pub use config::*;
pub use czml::*;
pub use geojson::*;
