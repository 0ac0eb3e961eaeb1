/// Composition parameters and their valid ranges.
pub mod params;
