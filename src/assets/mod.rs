/// Photo and template decoding.
pub mod decode;
