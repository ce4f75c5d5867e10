// Domain layer: stage vocabulary and the codec port. No codec crates here beyond std.

pub mod model;
pub mod ports;
