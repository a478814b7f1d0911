pub mod hit_testing;

pub use hit_testing::{Shape, distance_to_line_segment};
