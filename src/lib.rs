// lib.rs      gifsplice crate.
//
// Copyright (c) 2026  gifsplice developers
//
//! Split animated GIF images into independently valid single-frame
//! GIFs, and splice such frames back into one animated GIF.
//!
//! The container structure (blocks, extensions, color tables) is
//! parsed exactly; the LZW-compressed image data is treated as an
//! opaque byte span which is copied, never interpreted.  Both
//! operations are pure functions over in-memory byte buffers and
//! never perform I/O.
//!
//! ## Example
//! ```
//! # fn main() -> Result<(), gifsplice::Error> {
//! # let gif = &[
//! #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
//! #   0x02, 0x00, 0x80, 0x01, 0x00, 0x00, 0x00, 0x00,
//! #   0xff, 0xff, 0xff, 0x2c, 0x00, 0x00, 0x00, 0x00,
//! #   0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x03, 0x0c,
//! #   0x10, 0x05, 0x00, 0x3b,
//! # ][..];
//! let animation = gifsplice::decode(gif)?;
//! let merged = gifsplice::encode(
//!     animation.frames(),
//!     animation.transparent_color(),
//!     animation.loop_count(),
//! )?;
//! assert_eq!(gifsplice::decode(&merged)?.frame_count(),
//!     animation.frame_count());
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#[macro_use]
extern crate log;

mod block;
mod decode;
mod encode;
mod error;
#[cfg(test)]
mod fixtures;

pub use crate::block::{DisposalMethod, Frame};
pub use crate::decode::{decode, Animation};
pub use crate::encode::encode;
pub use crate::error::{Error, Result};
