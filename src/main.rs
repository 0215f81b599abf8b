// main.rs      gifsplice command
//
// Copyright (c) 2026  gifsplice developers
//
#![forbid(unsafe_code)]

use gifsplice::{decode, encode, DisposalMethod, Frame};
use std::env;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Default delay for merged frames, in centiseconds
const MERGE_DELAY_CS: u16 = 10;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let mut out = StandardStream::stdout(ColorChoice::Always);
    let args: Vec<String> = env::args().collect();
    match args.get(1).map(|a| a.as_str()) {
        Some("split") => {
            if let Some(path) = args.get(2) {
                split(&mut out, path)?;
            } else {
                usage(&mut out)?;
            }
        }
        Some("merge") => {
            if args.len() >= 4 {
                merge(&mut out, &args[2], &args[3..])?;
            } else {
                usage(&mut out)?;
            }
        }
        Some(path) => show(&mut out, path)?,
        None => usage(&mut out)?,
    }
    out.reset()?;
    Ok(())
}

fn usage(out: &mut StandardStream) -> Result<(), Box<dyn Error>> {
    let mut red = ColorSpec::new();
    red.set_fg(Some(Color::Red)).set_intense(true);
    out.set_color(&red)?;
    writeln!(out, "usage: gifsplice [filename]")?;
    writeln!(out, "       gifsplice split [filename]")?;
    writeln!(out, "       gifsplice merge [out] [frame]...")?;
    Ok(())
}

/// Show per-frame details of an animated GIF
fn show(out: &mut StandardStream, path: &str) -> Result<(), Box<dyn Error>> {
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(Color::Magenta));
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    let mut cyan = ColorSpec::new();
    cyan.set_fg(Some(Color::Cyan)).set_intense(true);
    let gif = fs::read(path)?;
    let animation = decode(&gif)?;
    out.set_color(&magenta)?;
    writeln!(out, "{}", path)?;
    out.set_color(&bold)?;
    write!(out, "frames: {}", animation.frame_count())?;
    write!(out, ", loop: ")?;
    match animation.loop_count() {
        0 => write!(out, "forever")?,
        n => write!(out, "{}", n)?,
    }
    if let Some(color) = animation.transparent_color() {
        write!(out, ", transparent: {:?}", color)?;
    }
    writeln!(out)?;
    out.set_color(&cyan)?;
    for (i, frame) in animation.frames().iter().enumerate() {
        writeln!(
            out,
            "  frame {:3}: {:6} bytes, delay {:4} cs, {:?}",
            i,
            frame.bytes().len(),
            frame.delay_time_cs(),
            frame.disposal_method()
        )?;
    }
    Ok(())
}

/// Split an animated GIF into one file per frame
fn split(out: &mut StandardStream, path: &str) -> Result<(), Box<dyn Error>> {
    let mut cyan = ColorSpec::new();
    cyan.set_fg(Some(Color::Cyan)).set_intense(true);
    let gif = fs::read(path)?;
    let animation = decode(&gif)?;
    let stem = Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "frame".to_string());
    out.set_color(&cyan)?;
    for (i, frame) in animation.frames().iter().enumerate() {
        let name = format!("{}-{:03}.gif", stem, i);
        fs::write(&name, frame.bytes())?;
        writeln!(out, "wrote {}", name)?;
    }
    Ok(())
}

/// Merge single-frame GIF files into one animated GIF
fn merge(
    out: &mut StandardStream,
    dest: &str,
    paths: &[String],
) -> Result<(), Box<dyn Error>> {
    let mut cyan = ColorSpec::new();
    cyan.set_fg(Some(Color::Cyan)).set_intense(true);
    let mut frames = vec![];
    for path in paths {
        let bytes = fs::read(path)?;
        frames.push(Frame::new(bytes, DisposalMethod::Keep, MERGE_DELAY_CS));
    }
    let merged = encode(&frames, None, 0)?;
    fs::write(dest, &merged)?;
    out.set_color(&cyan)?;
    writeln!(out, "wrote {} ({} frames)", dest, frames.len())?;
    Ok(())
}
