// fixtures.rs
//
// Copyright (c) 2026  gifsplice developers
//
//! Synthetic GIF streams for tests.
//!
//! The image data payload is opaque to the codec, so the "LZW" bytes
//! here are arbitrary; only the container structure matters.

/// Global color table: black, red, green, blue (size bits 1)
const PALETTE: [u8; 12] = [
    0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0xFF,
];

fn push_u16(gif: &mut Vec<u8>, val: u16) {
    gif.push(val as u8);
    gif.push((val >> 8) as u8);
}

fn push_header(gif: &mut Vec<u8>, width: u16, height: u16) {
    push_u16(gif, width);
    push_u16(gif, height);
    gif.push(0x91); // GCT present, color resolution 1, size bits 1
    gif.push(0); // background color index
    gif.push(0); // pixel aspect ratio
    gif.extend_from_slice(&PALETTE);
}

fn push_image(gif: &mut Vec<u8>, width: u16, height: u16) {
    gif.push(0x2C);
    push_u16(gif, 0); // left
    push_u16(gif, 0); // top
    push_u16(gif, width);
    push_u16(gif, height);
    gif.push(0); // no local color table
    gif.push(0x02); // LZW minimum code size
    gif.extend_from_slice(&[2, 0x4C, 0x01]); // opaque payload
    gif.push(0); // sub-block terminator
}

/// Build a plain single-frame GIF
pub(crate) fn single(width: u16, height: u16) -> Vec<u8> {
    let mut gif = b"GIF87a".to_vec();
    push_header(&mut gif, width, height);
    push_image(&mut gif, width, height);
    gif.push(0x3B);
    gif
}

/// Build an animated GIF with a NETSCAPE2.0 loop block and one
/// graphic control extension per frame: disposal `Background`,
/// delay `10 + i` cs, transparent color index 2 (green).
pub(crate) fn animated(
    width: u16,
    height: u16,
    frame_count: usize,
    loop_count: u16,
) -> Vec<u8> {
    let mut gif = b"GIF89a".to_vec();
    push_header(&mut gif, width, height);
    gif.extend_from_slice(b"\x21\xFF\x0BNETSCAPE2.0\x03\x01");
    push_u16(&mut gif, loop_count);
    gif.push(0); // block terminator
    for i in 0..frame_count {
        gif.extend_from_slice(&[0x21, 0xF9, 0x04, 0x09]); // background + transparent
        push_u16(&mut gif, 10 + i as u16);
        gif.push(2); // transparent color index
        gif.push(0); // block terminator
        push_image(&mut gif, width, height);
    }
    gif.push(0x3B);
    gif
}

/// Build a two-frame animation whose second frame carries a local
/// color table differing from the global one.
pub(crate) fn with_local_table(width: u16, height: u16) -> Vec<u8> {
    let mut gif = b"GIF89a".to_vec();
    push_header(&mut gif, width, height);
    gif.extend_from_slice(b"\x21\xFF\x0BNETSCAPE2.0\x03\x01\x00\x00\x00");
    push_image(&mut gif, width, height);
    // second frame: local table of 4 gray shades
    gif.push(0x2C);
    push_u16(&mut gif, 0);
    push_u16(&mut gif, 0);
    push_u16(&mut gif, width);
    push_u16(&mut gif, height);
    gif.push(0x81); // local color table, size bits 1
    for shade in &[0x00, 0x55, 0xAA, 0xFF] {
        gif.extend_from_slice(&[*shade, *shade, *shade]);
    }
    gif.push(0x02);
    gif.extend_from_slice(&[2, 0x4C, 0x01]);
    gif.push(0);
    gif.push(0x3B);
    gif
}
