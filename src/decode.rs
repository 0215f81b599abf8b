// decode.rs
//
// Copyright (c) 2026  gifsplice developers
//
//! Splitting an animated GIF stream into single-frame GIF images.

use crate::block::*;
use crate::error::{Error, Result};
use pix::rgb::SRgb8;

/// Everything split out of one animated GIF stream: the ordered frame
/// list plus stream-level metadata.
///
/// ## Example
/// ```
/// # fn main() -> Result<(), gifsplice::Error> {
/// # let gif = &[
/// #   0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x02, 0x00,
/// #   0x02, 0x00, 0x80, 0x01, 0x00, 0x00, 0x00, 0x00,
/// #   0xff, 0xff, 0xff, 0x2c, 0x00, 0x00, 0x00, 0x00,
/// #   0x02, 0x00, 0x02, 0x00, 0x00, 0x02, 0x03, 0x0c,
/// #   0x10, 0x05, 0x00, 0x3b,
/// # ][..];
/// let animation = gifsplice::decode(gif)?;
/// for frame in animation.frames() {
///     println!("delay: {:?} cs", frame.delay_time_cs());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<Frame>,
    loop_count: u16,
    transparent_color: Option<SRgb8>,
}

impl Animation {
    /// Get the frames, in stream encounter order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
    /// Get the number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
    /// Get the animation loop count (zero means loop forever)
    pub fn loop_count(&self) -> u16 {
        self.loop_count
    }
    /// Get the transparent color, if one was declared
    pub fn transparent_color(&self) -> Option<SRgb8> {
        self.transparent_color
    }
    /// Consume the animation, returning its frames
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

/// Split a GIF byte stream into its frames.
///
/// Walks the block structure in a single forward pass and synthesizes
/// one independently valid single-image GIF per image descriptor.
/// The compressed image data is copied byte-for-byte, never decoded.
pub fn decode(stream: &[u8]) -> Result<Animation> {
    FrameSplitter::new(stream)?.decode()
}

/// Read position into the source stream; never rewound.
struct Cursor<'a> {
    stream: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(stream: &'a [u8]) -> Self {
        Cursor { stream, pos: 0 }
    }
    /// Check whether the stream is exhausted
    fn is_empty(&self) -> bool {
        self.pos >= self.stream.len()
    }
    /// Read the next `len` bytes
    fn read(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(Error::TruncatedStream)?;
        if end > self.stream.len() {
            return Err(Error::TruncatedStream);
        }
        let buf = &self.stream[self.pos..end];
        self.pos = end;
        Ok(buf)
    }
    /// Read the next byte
    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read(1)?[0])
    }
}

/// One-shot builder holding all decode-pass state, so concurrent
/// decode calls cannot interfere.
struct FrameSplitter<'a> {
    cursor: Cursor<'a>,
    screen: ScreenDesc,
    global_table: Vec<u8>,
    /// Most recently observed graphic control values
    control: GraphicControl,
    /// Transparent color index, once observed
    transparent_idx: Option<u8>,
    transparent_color: Option<SRgb8>,
    loop_count: u16,
    frames: Vec<Frame>,
}

impl<'a> FrameSplitter<'a> {
    fn new(stream: &'a [u8]) -> Result<Self> {
        if stream.len() < 3 || &stream[..3] != b"GIF" {
            return Err(Error::NotAGif);
        }
        let mut cursor = Cursor::new(stream);
        cursor.read(6)?; // magic + version
        let screen = ScreenDesc::from_buf(cursor.read(7)?);
        debug!("screen: {}x{}", screen.screen_width(), screen.screen_height());
        let global_table = if screen.color_table_present() {
            cursor.read(screen.color_table_size_bytes())?.to_vec()
        } else {
            vec![]
        };
        Ok(FrameSplitter {
            cursor,
            screen,
            global_table,
            control: GraphicControl::default(),
            transparent_idx: None,
            transparent_color: None,
            loop_count: 0,
            frames: vec![],
        })
    }

    fn decode(mut self) -> Result<Animation> {
        loop {
            if self.cursor.is_empty() {
                // missing trailer; tolerated
                warn!("stream ended without trailer");
                break;
            }
            let introducer = self.cursor.read_u8()?;
            match BlockCode::from_u8(introducer) {
                Some(BlockCode::Extension_) => self.read_extension()?,
                Some(BlockCode::ImageDesc_) => self.read_image()?,
                Some(BlockCode::Trailer_) => break,
                None => {
                    warn!("unknown block introducer: {:#04X}", introducer);
                    break;
                }
            }
        }
        Ok(Animation {
            frames: self.frames,
            loop_count: self.loop_count,
            transparent_color: self.transparent_color,
        })
    }

    /// Read an extension block (all sub-blocks)
    fn read_extension(&mut self) -> Result<()> {
        let label = self.cursor.read_u8()?;
        debug!("extension: {:#04X}", label);
        if label == 0xFF {
            let mut app = Application::default();
            loop {
                let len = self.cursor.read_u8()?;
                if len == 0 {
                    break;
                }
                app.add_app_data(self.cursor.read(len as usize)?);
            }
            if let Some(count) = app.loop_count() {
                debug!("loop count: {:?}", count);
                self.loop_count = count;
            }
        } else {
            // graphic control path: any sub-block of length 4 carries
            // disposal / delay / transparency
            loop {
                let len = self.cursor.read_u8()?;
                if len == 0 {
                    break;
                }
                let buf = self.cursor.read(len as usize)?;
                if let Some(control) = GraphicControl::from_sub_block(buf) {
                    self.control = control;
                    if let Some(idx) = control.transparent_color() {
                        self.transparent_idx = Some(idx);
                    }
                }
            }
        }
        Ok(())
    }

    /// Read an image descriptor and synthesize one single-frame GIF
    fn read_image(&mut self) -> Result<()> {
        let desc = ImageDesc::from_buf(self.cursor.read(9)?);
        let (size_bits, sorted) = if desc.color_table_present() {
            (desc.color_table_size_bits(), desc.color_table_sorted())
        } else {
            (
                self.screen.color_table_size_bits(),
                self.screen.color_table_sorted(),
            )
        };
        let table = if desc.color_table_present() {
            self.cursor.read(desc.color_table_size_bytes())?.to_vec()
        } else {
            self.global_table.clone()
        };
        if let Some(idx) = self.transparent_idx {
            if let Some(color) = table_color(&table, idx) {
                self.transparent_color = Some(color);
            }
        }
        let mut bytes = Vec::with_capacity(table.len() + 64);
        // a frame with transparency needs an 89a graphic control ext
        if self.transparent_idx.is_some() {
            bytes.extend_from_slice(b"GIF89a");
        } else {
            bytes.extend_from_slice(b"GIF87a");
        }
        bytes.extend_from_slice(&self.screen.patched(size_bits, sorted));
        bytes.extend_from_slice(&table);
        if let Some(idx) = self.transparent_idx {
            let mut control = GraphicControl::default();
            control.set_transparent_color(Some(idx));
            control.put(&mut bytes);
        }
        bytes.push(BlockCode::ImageDesc_.signature());
        bytes.extend_from_slice(&desc.without_color_table());
        // LZW minimum code size
        bytes.push(self.cursor.read_u8()?);
        // copy raw image data sub-blocks, terminator included
        loop {
            let len = self.cursor.read_u8()?;
            bytes.push(len);
            if len == 0 {
                break;
            }
            bytes.extend_from_slice(self.cursor.read(len as usize)?);
        }
        bytes.push(BlockCode::Trailer_.signature());
        debug!("frame {}: {} bytes", self.frames.len(), bytes.len());
        self.frames.push(Frame::new(
            bytes,
            self.control.disposal_method(),
            self.control.delay_time_cs(),
        ));
        Ok(())
    }
}

/// Look up an RGB entry in a color table
fn table_color(table: &[u8], idx: u8) -> Option<SRgb8> {
    let i = idx as usize * 3;
    if i + 3 <= table.len() {
        Some(SRgb8::new(table[i], table[i + 1], table[i + 2]))
    } else {
        None
    }
}
