mod easing;
mod flip;
mod tilt;

pub use flip::*;
pub use tilt::*;
