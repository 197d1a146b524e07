pub mod arithmetic;
pub mod comparison;
pub mod functions;

pub use arithmetic::pow;
pub use comparison::Comparison;
pub use functions::{
    apply, clip, dist_ceil, dist_floor, dist_max, dist_min, dist_round, lclip, rclip,
};
