/// The card compositing pipeline.
pub mod compositor;
/// Slot and caption geometry.
pub mod layout;
