#![cfg(feature = "host")]
#![allow(missing_docs)]

use std::error::Error;
use std::fs::File;

use png::{BitDepth, ColorType, Decoder};
use strip_clock::clock_face::ClockFace;
use strip_clock::clock_config::{ClockColors, ClockConfig};
use strip_clock::clock_time::ClockTime;
use strip_clock::led_strip::{Frame1d, colors};
use strip_clock::to_png::{led_origin, write_strip_png, write_strip_rows_png};

const CELL_SIZE: u32 = 8;

struct Decoded {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl Decoded {
    fn read(path: &std::path::Path) -> Result<Self, Box<dyn Error>> {
        let decoder = Decoder::new(File::open(path)?);
        let mut reader = decoder.read_info()?;
        let mut bytes = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut bytes)?;
        assert_eq!(info.color_type, ColorType::Rgb);
        assert_eq!(info.bit_depth, BitDepth::Eight);
        bytes.truncate(info.buffer_size());
        Ok(Self {
            width: info.width,
            height: info.height,
            bytes,
        })
    }

    // Color at the middle of LED `index` in row `row`.
    fn led_center(&self, index: usize, row: usize) -> [u8; 3] {
        let (x, y) = led_origin(index, row, CELL_SIZE);
        let (x, y) = (x + CELL_SIZE / 2 - 1, y + CELL_SIZE / 2 - 1);
        let offset = ((y * self.width + x) * 3) as usize;
        [self.bytes[offset], self.bytes[offset + 1], self.bytes[offset + 2]]
    }
}

#[test]
fn single_frame_is_one_row_of_leds() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("strip.png");
    let mut frame = Frame1d::<4>::new();
    frame[0] = colors::RED;
    frame[2] = colors::WHITE;

    write_strip_png(&frame, &path, CELL_SIZE)?;
    let decoded = Decoded::read(&path)?;

    assert_eq!(decoded.width, 4 * CELL_SIZE + CELL_SIZE / 2);
    assert_eq!(decoded.height, CELL_SIZE + CELL_SIZE / 2);
    assert_eq!(decoded.led_center(0, 0), [255, 0, 0]);
    assert_eq!(decoded.led_center(1, 0), [0, 0, 0]);
    assert_eq!(decoded.led_center(2, 0), [255, 255, 255]);
    // corner of the border stays black
    assert_eq!(&decoded.bytes[..3], &[0, 0, 0]);
    Ok(())
}

#[test]
fn clock_day_preview_has_one_row_per_hour() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("day.png");
    let mut face = ClockFace::<165>::new(&ClockConfig::DEFAULT)?;
    let frames: Vec<Frame1d<165>> = (6..19)
        .map(|hour| {
            face.update(ClockTime::new(hour, 0, 0));
            *face.frame()
        })
        .collect();

    write_strip_rows_png(&frames, &path, CELL_SIZE)?;
    let decoded = Decoded::read(&path)?;

    assert_eq!(decoded.height, 13 * CELL_SIZE + CELL_SIZE / 2);
    // 06:00 has nothing elapsed; pixel 0 is an hour tick
    let yellow = ClockColors::DEFAULT.hour_tick;
    assert_eq!(decoded.led_center(0, 0), [yellow.r, yellow.g, yellow.b]);
    // 07:00 has the first hour elapsed
    let past = ClockColors::DEFAULT.past;
    assert_eq!(decoded.led_center(0, 1), [past.r, past.g, past.b]);
    assert_eq!(decoded.led_center(12, 1), [yellow.r, yellow.g, yellow.b]);
    Ok(())
}
