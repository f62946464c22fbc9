//! Grid model: layout, teleporters, liquid occupancy and supply

pub mod liquid_grid;

pub use liquid_grid::*;
