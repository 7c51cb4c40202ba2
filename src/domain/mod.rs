// Domain layer: inventory model, rank ladder and the ports the engine drives.

pub mod model;
pub mod ports;
pub mod rank;
