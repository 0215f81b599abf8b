// encode.rs
//
// Copyright (c) 2026  gifsplice developers
//
//! Splicing single-frame GIF images back into one animated GIF.

use crate::block::*;
use crate::error::{Error, Result};
use pix::rgb::SRgb8;

/// Merge an ordered list of single-frame GIFs into one animated GIF.
///
/// Frame 0 donates the global color table; later frames keep a local
/// table only when theirs differs from it.  Disposal method and delay
/// come from each [Frame](struct.Frame.html) record.  The compressed
/// image data is copied byte-for-byte, never re-encoded.
///
/// Fails with `AlreadyAnimated` when a frame already carries a
/// looping application extension: merging animated sources is
/// unsupported by design, not silently handled.
pub fn encode(
    frames: &[Frame],
    transparent_color: Option<SRgb8>,
    loop_count: u16,
) -> Result<Vec<u8>> {
    FrameMerger::new(frames, transparent_color, loop_count)?.encode()
}

/// One-shot builder holding all encode-pass state.
struct FrameMerger<'a> {
    frames: &'a [Frame],
    transparent_color: Option<SRgb8>,
    loop_count: u16,
    merged: Vec<u8>,
}

impl<'a> FrameMerger<'a> {
    fn new(
        frames: &'a [Frame],
        transparent_color: Option<SRgb8>,
        loop_count: u16,
    ) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::EmptyFrameList);
        }
        for frame in frames {
            let buf = frame.bytes();
            if !(buf.starts_with(b"GIF87a") || buf.starts_with(b"GIF89a")) {
                return Err(Error::NotAGifFrame);
            }
            check_not_animated(buf)?;
        }
        Ok(FrameMerger {
            frames,
            transparent_color,
            loop_count,
            merged: vec![],
        })
    }

    fn encode(mut self) -> Result<Vec<u8>> {
        let first = self.frames[0].bytes();
        self.merged.extend_from_slice(b"GIF89a");
        // logical screen descriptor and global table from frame 0
        self.merged.extend_from_slice(slice(first, 6, 7)?);
        self.merged.extend_from_slice(palette(first)?);
        Application::with_loop_count(self.loop_count).put(&mut self.merged);
        for i in 0..self.frames.len() {
            self.add_frame(i)?;
        }
        self.merged.push(BlockCode::Trailer_.signature());
        Ok(self.merged)
    }

    /// Append one frame: graphic control, image descriptor, optional
    /// local color table, raw image data.
    fn add_frame(&mut self, i: usize) -> Result<()> {
        let frame = &self.frames[i];
        let buf = frame.bytes();
        let global_rgb = palette(self.frames[0].bytes())?;
        let local_rgb = palette(buf)?;
        // header + palette region ends here; trailer byte dropped
        let boundary = 13 + local_rgb.len();
        if buf.len() <= boundary {
            return Err(Error::TruncatedStream);
        }
        let body = &buf[boundary..buf.len() - 1];
        let mut control = GraphicControl::default();
        control.set_disposal_method(frame.disposal_method());
        control.set_delay_time_cs(frame.delay_time_cs());
        if let Some(color) = self.transparent_color {
            if let Some(idx) = find_color(local_rgb, color) {
                control.set_transparent_color(Some(idx));
            }
        }
        control.put(&mut self.merged);
        // skip any graphic control the frame buffer itself carries
        let (desc, data) = match body.first() {
            Some(&b'!') => (slice(body, 8, 10)?, &body[18..]),
            Some(&b',') => (slice(body, 0, 10)?, &body[10..]),
            _ => return Err(Error::NotAGifFrame),
        };
        if desc[0] != b',' {
            return Err(Error::NotAGifFrame);
        }
        let has_local = !local_rgb.is_empty();
        if has_local && i > 0 && local_rgb != global_rgb {
            let mut desc = desc.to_vec();
            desc[9] = (desc[9] | ImageDesc::COLOR_TABLE_PRESENT)
                & !ImageDesc::COLOR_TABLE_SIZE
                | (buf[10] & ImageDesc::COLOR_TABLE_SIZE);
            self.merged.extend_from_slice(&desc);
            self.merged.extend_from_slice(local_rgb);
        } else {
            // frame 0 rides on the global table it donated
            self.merged.extend_from_slice(desc);
        }
        self.merged.extend_from_slice(data);
        debug!("frame {}: {} bytes merged", i, self.merged.len());
        Ok(())
    }
}

/// Get `len` bytes starting at `start`, or fail as truncated
fn slice(buf: &[u8], start: usize, len: usize) -> Result<&[u8]> {
    buf.get(start..start + len).ok_or(Error::TruncatedStream)
}

/// Get a frame's own color table (empty when the packed flag is off)
fn palette(buf: &[u8]) -> Result<&[u8]> {
    let flags = *buf.get(10).ok_or(Error::TruncatedStream)?;
    if flags & 0x80 != 0 {
        slice(buf, 13, color_table_size_bytes(flags))
    } else {
        Ok(&[])
    }
}

/// Scan a frame buffer for an embedded looping extension
fn check_not_animated(buf: &[u8]) -> Result<()> {
    let mut j = 13 + palette(buf)?.len();
    loop {
        match buf.get(j) {
            Some(&b'!') => {
                if let Some(id) = buf.get(j + 3..j + 11) {
                    if id == b"NETSCAPE" {
                        return Err(Error::AlreadyAnimated);
                    }
                }
            }
            Some(&b';') => return Ok(()),
            Some(_) => {}
            None => return Err(Error::TruncatedStream),
        }
        j += 1;
    }
}

/// Find the index of an exact RGB match in a color table
fn find_color(table: &[u8], color: SRgb8) -> Option<u8> {
    table
        .chunks_exact(3)
        .position(|c| SRgb8::new(c[0], c[1], c[2]) == color)
        .map(|i| i as u8)
}
