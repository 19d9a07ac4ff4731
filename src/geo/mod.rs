mod geo;

pub use geo::*;
