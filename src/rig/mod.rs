//! Rig module: logical axes and the three-stepper chair platform.

mod axis;
mod platform;

pub use axis::Axis;
pub use platform::ChairRig;
