// error.rs
//
// Copyright (c) 2026  gifsplice developers
//

use std::fmt;

/// Errors encountered while splitting or splicing a GIF stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Stream does not begin with the ASCII signature `GIF`.
    NotAGif,
    /// Stream ends in the middle of a block or sub-block.
    TruncatedStream,
    /// Encoder was given an empty frame list.
    EmptyFrameList,
    /// Encoder frame does not begin with `GIF87a` or `GIF89a`,
    /// or is not a well-formed single-image GIF.
    NotAGifFrame,
    /// Encoder frame already contains a looping application
    /// extension; merging animated sources is unsupported.
    AlreadyAnimated,
}

/// Gifsplice result type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotAGif => write!(fmt, "not a GIF stream"),
            Error::TruncatedStream => write!(fmt, "truncated GIF stream"),
            Error::EmptyFrameList => write!(fmt, "empty frame list"),
            Error::NotAGifFrame => write!(fmt, "frame is not a GIF image"),
            Error::AlreadyAnimated => write!(fmt, "frame is already animated"),
        }
    }
}

impl std::error::Error for Error {}
