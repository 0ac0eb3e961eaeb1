/// Premultiplied source-over blending.
pub mod composite;
/// Cover-fit scaling and centre crop.
pub mod cover;
/// Luma desaturation.
pub mod desaturate;
/// Radial alpha feathering.
pub mod feather;
