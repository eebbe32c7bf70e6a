//! Selection and camera synchronization for the travel map viewer.
//!
//! The controller keeps four independently rendered views consistent: the 3D
//! camera, the clock/time slider, the photo filmstrip and the info panel. The
//! render engine and the page are reached only through the traits in [`host`].

pub mod camera_sync;
pub mod config;
pub mod headless;
pub mod host;
pub mod info_panel;
pub mod router;
pub mod state;
pub mod timeline;
pub mod viewer;

pub use camera_sync::*;
pub use config::*;
pub use host::*;
pub use info_panel::*;
pub use router::*;
pub use state::*;
pub use timeline::*;
pub use viewer::*;
