pub mod components;
pub mod entity;
pub mod picking;
pub mod selection;
pub mod world;

pub use components::*;
pub use entity::*;
pub use selection::*;
pub use world::*;
