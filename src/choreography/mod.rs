//! Choreography module: motion primitives and the rides composed from them.

mod primitives;
mod routines;

pub use primitives::{
    fast_climb, fast_fall, gentle_dip, level_out, leveling_factor, rumble, sharp_left_turn,
    sharp_right_turn, slow_climb, small_hill, sudden_twist, RumbleRun,
};
pub use routines::{full_experience, roller_coaster};
