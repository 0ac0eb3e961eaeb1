//! Output encoding.
//!
//! Cards are always written losslessly; the download name is derived from the caption.

/// PNG encoding and output file naming.
pub mod png;
