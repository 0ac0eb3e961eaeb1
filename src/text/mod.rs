/// Caption layout and rasterization.
pub mod caption;
/// Font database construction.
pub mod fonts;
