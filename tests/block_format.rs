
//! Tests the byte layout of compressed blocks against
//! frozen reference vectors, and the failure behavior
//! on damaged input.

use piz::error::Error;
use piz::prelude::*;


fn single_half_channel() -> ChannelList {
    ChannelList::new(smallvec![
        ChannelDescription::new("G", SampleType::F16, (1, 1)),
    ])
}

fn codec_for(channels: ChannelList, window: IntegerBounds) -> PizCodec {
    let max_scan_line_size = window.size.x() * channels.bytes_per_pixel;
    PizCodec::new(channels, window, max_scan_line_size, window.size.y())
}

fn native_bytes(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|sample| sample.to_ne_bytes()).collect()
}


/// A single sample with the value 0x1234 produces a fixed 32-byte block:
/// the five header bytes (bitmap slice start, end, and one bitmap byte),
/// the payload length, and a minimal Huffman payload whose table holds
/// two one-bit codes, one for the value and one for the run marker.
#[test]
fn frozen_single_sample_block(){
    let window = IntegerBounds::from_dimensions(Vec2(1, 1));
    let mut codec = codec_for(single_half_channel(), window);

    let pixel_bytes = native_bytes(&[0x1234]);
    let compressed = codec.compress_tile(&pixel_bytes, window).unwrap().to_vec();

    assert_eq!(compressed, [
        0x46, 0x02, // first non-zero bitmap byte: 0x1234 >> 3
        0x46, 0x02, // last non-zero bitmap byte
        0x10,       // the bitmap byte: bit 0x1234 & 7
        0x17, 0x00, 0x00, 0x00, // 23 bytes of huffman data follow

        // huffman header
        0x01, 0x00, 0x00, 0x00, // smallest code index: the dense value 1
        0x02, 0x00, 0x00, 0x00, // largest code index: the run marker
        0x02, 0x00, 0x00, 0x00, // two bytes of packed code lengths
        0x01, 0x00, 0x00, 0x00, // one payload bit
        0x00, 0x00, 0x00, 0x00, // reserved

        0x04, 0x10, // packed code lengths: 000001 000001, padded
        0x00,       // the payload: the single one-bit code
    ]);

    let decompressed = codec.decompress_tile(&compressed, window).unwrap();
    assert_eq!(decompressed, pixel_bytes);
}

/// An all-zero block transmits no bitmap bytes at all:
/// the slice start is 8191 and the slice end 0.
/// The payload collapses into runs of the dense value zero.
#[test]
fn frozen_all_zero_block(){
    let window = IntegerBounds::from_dimensions(Vec2(32, 32));
    let mut codec = codec_for(single_half_channel(), window);

    let pixel_bytes = native_bytes(&[0; 32 * 32]);
    let compressed = codec.compress_tile(&pixel_bytes, window).unwrap().to_vec();

    assert_eq!(compressed, [
        0xFF, 0x1F, // bitmap slice start: 8191
        0x00, 0x00, // bitmap slice end: 0, the slice is empty
        0x1B, 0x00, 0x00, 0x00, // 27 bytes of huffman data follow

        // huffman header
        0x00, 0x00, 0x00, 0x00, // smallest code index: the dense value 0
        0x01, 0x00, 0x00, 0x00, // largest code index: the run marker
        0x02, 0x00, 0x00, 0x00, // two bytes of packed code lengths
        0x28, 0x00, 0x00, 0x00, // forty payload bits
        0x00, 0x00, 0x00, 0x00, // reserved

        0x04, 0x10, // packed code lengths: 000001 000001, padded

        // four times: the zero code, the run marker, a count of 255
        0x7F, 0xDF, 0xF7, 0xFD, 0xFF,
    ]);

    let decompressed = codec.decompress_tile(&compressed, window).unwrap();
    assert_eq!(decompressed, pixel_bytes);
}

/// The 16x16 gradient block of half floats round-trips exactly.
#[test]
fn roundtrip_gradient_block(){
    let window = IntegerBounds::from_dimensions(Vec2(16, 16));
    let mut codec = codec_for(single_half_channel(), window);
    assert!(codec.uses_native_format());

    let samples: Vec<u16> = (0 .. 16 * 16).map(|index| (index % 2049) as u16).collect();
    let pixel_bytes = native_bytes(&samples);

    let compressed = codec.compress_tile(&pixel_bytes, window).unwrap().to_vec();
    let decompressed = codec.decompress_tile(&compressed, window).unwrap();

    assert_eq!(decompressed, pixel_bytes);
}

/// A vertically subsampled channel contributes only its own rows,
/// placed behind the previous channel without a gap.
#[test]
fn roundtrip_subsampled_rows(){
    let channels = ChannelList::new(smallvec![
        ChannelDescription::new("Y", SampleType::F16, (1, 1)),
        ChannelDescription::new("BY", SampleType::F16, (1, 2)),
    ]);

    let window = IntegerBounds::from_dimensions(Vec2(4, 4));
    let mut codec = codec_for(channels, window);

    // rows interleave as: Y row, BY row (y = 0), Y row (y = 1), ...
    let mut samples = Vec::new();
    for y in 0 .. 4_u16 {
        samples.extend((0 .. 4).map(|x| 0x0100 + y * 16 + x)); // channel Y
        if y % 2 == 0 {
            samples.extend((0 .. 4).map(|x| 0x0200 + y * 16 + x)); // channel BY
        }
    }

    assert_eq!(samples.len(), 16 + 8);

    let pixel_bytes = native_bytes(&samples);
    let compressed = codec.compress_tile(&pixel_bytes, window).unwrap().to_vec();
    let decompressed = codec.decompress_tile(&compressed, window).unwrap();

    assert_eq!(decompressed, pixel_bytes);
}

#[test]
fn negative_payload_length_is_rejected(){
    let window = IntegerBounds::from_dimensions(Vec2(1, 1));
    let mut codec = codec_for(single_half_channel(), window);

    let block = [
        0x46, 0x02, 0x46, 0x02, 0x10, // valid bitmap header
        0xFF, 0xFF, 0xFF, 0xFF, // payload length -1
    ];

    assert!(matches!(
        codec.decompress_tile(&block, window),
        Err(Error::CorruptBlock(_))
    ));
}

#[test]
fn bitmap_end_out_of_range_is_rejected(){
    let window = IntegerBounds::from_dimensions(Vec2(1, 1));
    let mut codec = codec_for(single_half_channel(), window);

    let block = [
        0x00, 0x00, // bitmap slice start: 0
        0x00, 0x20, // bitmap slice end: 8192, one beyond the bitmap
    ];

    assert!(matches!(
        codec.decompress_tile(&block, window),
        Err(Error::CorruptBlock(_))
    ));
}

/// Truncating a compressed block anywhere yields an error,
/// never a silently wrong decode. The empty prefix is the exception:
/// an empty input is defined to be an empty block.
#[test]
fn truncated_blocks_never_decode(){
    let window = IntegerBounds::from_dimensions(Vec2(16, 16));
    let mut codec = codec_for(single_half_channel(), window);

    let samples: Vec<u16> = (0 .. 16 * 16).map(|index| (index * 37 % 2049) as u16).collect();
    let compressed = codec.compress_tile(&native_bytes(&samples), window).unwrap().to_vec();

    for length in 1 .. compressed.len() {
        let result = codec.decompress_tile(&compressed[.. length], window);

        assert!(
            result.is_err(),
            "a truncated block of {} of {} bytes decoded silently",
            length, compressed.len()
        );
    }
}

#[test]
fn empty_block_decodes_to_empty_output(){
    let window = IntegerBounds::from_dimensions(Vec2(8, 8));
    let mut codec = codec_for(single_half_channel(), window);

    assert!(codec.decompress_tile(&[], window).unwrap().is_empty());
    assert!(codec.compress_tile(&[], window).unwrap().is_empty());
}
