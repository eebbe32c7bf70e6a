pub mod throttle;
pub mod time_source;

pub use throttle::*;
pub use time_source::*;
