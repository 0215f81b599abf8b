// block.rs
//
// Copyright (c) 2026  gifsplice developers
//
//! Block-level types shared by the decoder and encoder.
//!
//! Only the container structure is modeled here; the LZW image data
//! is an opaque byte span which is copied, never interpreted.

/// Channels per color table entry (RGB)
const CHANNELS: usize = 3;

/// Number of color table entries for packed size bits (0-7)
pub(crate) fn color_table_len(size_bits: u8) -> usize {
    2 << (size_bits & 0b0111) as usize
}

/// Number of color table bytes for packed size bits (0-7)
pub(crate) fn color_table_size_bytes(size_bits: u8) -> usize {
    color_table_len(size_bits) * CHANNELS
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum BlockCode {
    Extension_,
    ImageDesc_,
    Trailer_,
}

impl BlockCode {
    pub fn from_u8(t: u8) -> Option<Self> {
        use self::BlockCode::*;
        match t {
            b'!' => Some(Extension_), // (0x21) Extension introducer
            b',' => Some(ImageDesc_), // (0x2C) Image separator
            b';' => Some(Trailer_),   // (0x3B) GIF trailer
            _ => None,
        }
    }
    pub fn signature(self) -> u8 {
        use self::BlockCode::*;
        match self {
            Extension_ => b'!',
            ImageDesc_ => b',',
            Trailer_ => b';',
        }
    }
}

/// Method of disposing a frame before displaying the next one
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisposalMethod {
    /// Not specified
    NoAction,
    /// Keep the current image
    Keep,
    /// Restore to background color
    Background,
    /// Restore to previous frame
    Previous,
    /// Reserved methods (4-7)
    Reserved(u8),
}

impl Default for DisposalMethod {
    fn default() -> Self {
        DisposalMethod::NoAction
    }
}

impl From<u8> for DisposalMethod {
    fn from(n: u8) -> Self {
        use self::DisposalMethod::*;
        match n & 0b0111 {
            0 => NoAction,
            1 => Keep,
            2 => Background,
            3 => Previous,
            _ => Reserved(n & 0b0111),
        }
    }
}

impl From<DisposalMethod> for u8 {
    fn from(d: DisposalMethod) -> Self {
        use self::DisposalMethod::*;
        match d {
            NoAction => 0,
            Keep => 1,
            Background => 2,
            Previous => 3,
            Reserved(n) => n & 0b0111,
        }
    }
}

/// Logical Screen Descriptor, captured verbatim as its 7 raw bytes.
///
/// Reused as the template for every synthesized single-frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScreenDesc {
    bytes: [u8; 7],
}

impl ScreenDesc {
    const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const COLOR_RESOLUTION: u8 = 0b0111_0000;
    const COLOR_TABLE_ORDERING: u8 = 0b0000_1000;
    const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    pub fn from_buf(buf: &[u8]) -> Self {
        assert_eq!(buf.len(), 7);
        let mut bytes = [0; 7];
        bytes.copy_from_slice(buf);
        ScreenDesc { bytes }
    }
    pub fn screen_width(&self) -> u16 {
        (self.bytes[1] as u16) << 8 | self.bytes[0] as u16
    }
    pub fn screen_height(&self) -> u16 {
        (self.bytes[3] as u16) << 8 | self.bytes[2] as u16
    }
    pub fn color_table_present(&self) -> bool {
        self.bytes[4] & Self::COLOR_TABLE_PRESENT != 0
    }
    pub fn color_table_sorted(&self) -> bool {
        self.bytes[4] & Self::COLOR_TABLE_ORDERING != 0
    }
    pub fn color_table_size_bits(&self) -> u8 {
        self.bytes[4] & Self::COLOR_TABLE_SIZE
    }
    pub fn color_table_size_bytes(&self) -> usize {
        color_table_size_bytes(self.color_table_size_bits())
    }
    /// Copy patched for a synthesized frame header: color table
    /// forced present, size bits and sort flag from the frame's own
    /// table, color resolution bits preserved.
    pub fn patched(&self, size_bits: u8, sorted: bool) -> [u8; 7] {
        let mut bytes = self.bytes;
        bytes[4] &= Self::COLOR_RESOLUTION;
        bytes[4] |= Self::COLOR_TABLE_PRESENT;
        bytes[4] |= size_bits & Self::COLOR_TABLE_SIZE;
        if sorted {
            bytes[4] |= Self::COLOR_TABLE_ORDERING;
        }
        bytes
    }
}

/// Image Descriptor body: the 9 bytes following the 0x2C separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ImageDesc {
    bytes: [u8; 9],
}

impl ImageDesc {
    pub(crate) const COLOR_TABLE_PRESENT: u8 = 0b1000_0000;
    const INTERLACED: u8 = 0b0100_0000;
    const COLOR_TABLE_ORDERING: u8 = 0b0010_0000;
    pub(crate) const COLOR_TABLE_SIZE: u8 = 0b0000_0111;

    pub fn from_buf(buf: &[u8]) -> Self {
        assert_eq!(buf.len(), 9);
        let mut bytes = [0; 9];
        bytes.copy_from_slice(buf);
        ImageDesc { bytes }
    }
    pub fn color_table_present(&self) -> bool {
        self.bytes[8] & Self::COLOR_TABLE_PRESENT != 0
    }
    pub fn color_table_sorted(&self) -> bool {
        self.bytes[8] & Self::COLOR_TABLE_ORDERING != 0
    }
    pub fn color_table_size_bits(&self) -> u8 {
        self.bytes[8] & Self::COLOR_TABLE_SIZE
    }
    pub fn color_table_size_bytes(&self) -> usize {
        color_table_size_bytes(self.color_table_size_bits())
    }
    /// Copy with the color table cleared from the packed byte; only
    /// the interlace flag survives (the palette is emitted at the
    /// top level of a synthesized frame instead).
    pub fn without_color_table(&self) -> [u8; 9] {
        let mut bytes = self.bytes;
        bytes[8] &= Self::INTERLACED;
        bytes
    }
}

/// Graphic Control Extension: per-frame delay, disposal method and
/// optional transparent color index.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GraphicControl {
    flags: u8,
    delay_time_cs: u16, // delay in centiseconds
    transparent_color_idx: u8,
}

impl GraphicControl {
    const DISPOSAL_METHOD: u8 = 0b0001_1100;
    const TRANSPARENT_COLOR: u8 = 0b0000_0001;

    /// Sub-block length on the wire
    pub const SUB_BLOCK_LEN: usize = 4;

    /// Parse from a 4-byte extension sub-block
    pub fn from_sub_block(buf: &[u8]) -> Option<Self> {
        if buf.len() == Self::SUB_BLOCK_LEN {
            let flags = buf[0];
            let delay_time_cs = (buf[2] as u16) << 8 | buf[1] as u16;
            let transparent_color_idx = buf[3];
            Some(GraphicControl {
                flags,
                delay_time_cs,
                transparent_color_idx,
            })
        } else {
            None
        }
    }
    pub fn disposal_method(&self) -> DisposalMethod {
        ((self.flags & Self::DISPOSAL_METHOD) >> 2).into()
    }
    pub fn set_disposal_method(&mut self, disposal_method: DisposalMethod) {
        let d: u8 = disposal_method.into();
        self.flags = (self.flags & !Self::DISPOSAL_METHOD) | (d << 2);
    }
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }
    pub fn set_delay_time_cs(&mut self, delay_time_cs: u16) {
        self.delay_time_cs = delay_time_cs;
    }
    pub fn transparent_color(&self) -> Option<u8> {
        if self.flags & Self::TRANSPARENT_COLOR != 0 {
            Some(self.transparent_color_idx)
        } else {
            None
        }
    }
    pub fn set_transparent_color(&mut self, transparent_color: Option<u8>) {
        match transparent_color {
            Some(t) => {
                self.flags |= Self::TRANSPARENT_COLOR;
                self.transparent_color_idx = t;
            }
            None => {
                self.flags &= !Self::TRANSPARENT_COLOR;
                self.transparent_color_idx = 0;
            }
        }
    }
    /// Append the full 8-byte extension block to a buffer
    pub fn put(&self, buf: &mut Vec<u8>) {
        buf.push(BlockCode::Extension_.signature());
        buf.push(0xF9);
        buf.push(Self::SUB_BLOCK_LEN as u8);
        buf.push(self.flags);
        buf.push(self.delay_time_cs as u8);
        buf.push((self.delay_time_cs >> 8) as u8);
        buf.push(self.transparent_color_idx);
        buf.push(0); // block terminator
    }
}

/// Application Extension (0xFF); only looping identifiers matter here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Application {
    app_data: Vec<Vec<u8>>, // sequence of sub-blocks (first has app ID)
}

impl Application {
    fn is_looping(app_id: &[u8]) -> bool {
        app_id == b"NETSCAPE2.0" || app_id == b"ANIMEXTS1.0"
    }
    /// Build a NETSCAPE2.0 block for an animation loop count
    pub fn with_loop_count(loop_count: u16) -> Self {
        let app_data = vec![
            b"NETSCAPE2.0".to_vec(),
            vec![1, loop_count as u8, (loop_count >> 8) as u8],
        ];
        Application { app_data }
    }
    pub fn add_app_data(&mut self, b: &[u8]) {
        assert!(b.len() < 256);
        self.app_data.push(b.to_vec());
    }
    /// Animation loop count, if this is a looping extension
    /// (zero means loop forever).
    pub fn loop_count(&self) -> Option<u16> {
        let d = &self.app_data;
        let exists = d.len() == 2 &&            // 2 sub-blocks
                     Self::is_looping(&d[0]) && // app ID / auth code
                     d[1].len() == 3 &&         // app data sub-block length
                     d[1][0] == 1; // sub-block ID
        if exists {
            let c = (d[1][2] as u16) << 8 | d[1][1] as u16;
            Some(c)
        } else {
            None
        }
    }
    /// Append the full extension block to a buffer
    pub fn put(&self, buf: &mut Vec<u8>) {
        buf.push(BlockCode::Extension_.signature());
        buf.push(0xFF);
        for b in &self.app_data {
            assert!(b.len() < 256);
            buf.push(b.len() as u8);
            buf.extend_from_slice(b);
        }
        buf.push(0); // block terminator
    }
}

/// One frame split out of an animated GIF.
///
/// The bytes form a complete, independently valid single-image GIF;
/// disposal method and delay travel on the record, not in the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
    disposal: DisposalMethod,
    delay_cs: u16,
}

impl Frame {
    /// Create a frame from a single-image GIF buffer
    pub fn new(bytes: Vec<u8>, disposal: DisposalMethod, delay_cs: u16) -> Self {
        Frame {
            bytes,
            disposal,
            delay_cs,
        }
    }
    /// Get a view of the frame's GIF bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
    /// Get the disposal method
    pub fn disposal_method(&self) -> DisposalMethod {
        self.disposal
    }
    /// Get the display delay, in centiseconds
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_cs
    }
    /// Consume the frame, returning its GIF bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn disposal_method() {
        for n in 0..4 {
            let d = DisposalMethod::from(n);
            assert_eq!(u8::from(d), n);
        }
        assert_eq!(DisposalMethod::from(2), DisposalMethod::Background);
        assert_eq!(DisposalMethod::default(), DisposalMethod::NoAction);
    }

    #[test]
    fn table_sizes() {
        assert_eq!(color_table_len(0), 2);
        assert_eq!(color_table_len(1), 4);
        assert_eq!(color_table_len(7), 256);
        assert_eq!(color_table_size_bytes(7), 768);
    }

    #[test]
    fn loop_count() {
        let b = Application::default();
        assert_eq!(b.loop_count(), None);
        let b = Application::with_loop_count(0);
        assert_eq!(b.loop_count(), Some(0));
        let b = Application::with_loop_count(260);
        assert_eq!(b.loop_count(), Some(260));
        // little-endian on the wire
        let mut b = Application::default();
        b.add_app_data(b"NETSCAPE2.0");
        b.add_app_data(&[1, 0x05, 0x01]);
        assert_eq!(b.loop_count(), Some(0x0105));
        // ANIMEXTS1.0 is an accepted looping identifier too
        let mut b = Application::default();
        b.add_app_data(b"ANIMEXTS1.0");
        b.add_app_data(&[1, 9, 0]);
        assert_eq!(b.loop_count(), Some(9));
        // other application identifiers carry no loop count
        let mut b = Application::default();
        b.add_app_data(b"XMP DataXMP");
        b.add_app_data(&[1, 9, 0]);
        assert_eq!(b.loop_count(), None);
    }

    #[test]
    fn screen_patching() {
        // 4x2 screen, GCT present, res bits 001, sorted, size bits 010
        let sd = ScreenDesc::from_buf(&[4, 0, 2, 0, 0x9A, 0, 0]);
        assert_eq!(sd.screen_width(), 4);
        assert_eq!(sd.screen_height(), 2);
        assert!(sd.color_table_present());
        assert!(sd.color_table_sorted());
        assert_eq!(sd.color_table_size_bits(), 2);
        assert_eq!(sd.color_table_size_bytes(), 24);
        let patched = sd.patched(4, false);
        assert_eq!(patched[4], 0x80 | 0x10 | 4);
        let patched = sd.patched(1, true);
        assert_eq!(patched[4], 0x80 | 0x10 | 0x08 | 1);
    }

    #[test]
    fn image_desc_flags() {
        let buf = [0, 0, 0, 0, 8, 0, 8, 0, 0xC3];
        let id = ImageDesc::from_buf(&buf);
        assert!(id.color_table_present());
        assert_eq!(id.color_table_size_bits(), 3);
        assert_eq!(id.color_table_size_bytes(), 48);
        // only the interlace flag survives the patch
        assert_eq!(id.without_color_table()[8], 0x40);
    }

    #[test]
    fn graphic_control() {
        let gc = GraphicControl::from_sub_block(&[0x09, 0x2C, 0x01, 7]).unwrap();
        assert_eq!(gc.disposal_method(), DisposalMethod::Background);
        assert_eq!(gc.delay_time_cs(), 0x012C);
        assert_eq!(gc.transparent_color(), Some(7));
        assert_eq!(GraphicControl::from_sub_block(&[0, 0, 0]), None);
        let mut gc = GraphicControl::default();
        gc.set_disposal_method(DisposalMethod::Previous);
        gc.set_delay_time_cs(10);
        assert_eq!(gc.transparent_color(), None);
        gc.set_transparent_color(Some(3));
        let mut buf = vec![];
        gc.put(&mut buf);
        assert_eq!(buf, [0x21, 0xF9, 0x04, 0x0D, 10, 0, 3, 0]);
    }
}
