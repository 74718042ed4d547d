#[macro_use]
extern crate bencher;

extern crate piz;

use bencher::Bencher;
use piz::prelude::*;


fn rgba_half_channels() -> ChannelList {
    ChannelList::new(smallvec![
        ChannelDescription::new("A", SampleType::F16, (1, 1)),
        ChannelDescription::new("B", SampleType::F16, (1, 1)),
        ChannelDescription::new("G", SampleType::F16, (1, 1)),
        ChannelDescription::new("R", SampleType::F16, (1, 1)),
    ])
}

fn codec_and_block(noisy: bool) -> (PizCodec, IntegerBounds, Vec<u8>) {
    let channels = rgba_half_channels();
    let window = IntegerBounds::from_dimensions(Vec2(512, 512));
    let max_scan_line_size = window.size.x() * channels.bytes_per_pixel;
    let byte_count = window.size.area() * channels.bytes_per_pixel;

    // film-grain-like data in the lower value range, or a flat gradient
    let pixel_bytes: Vec<u8> = (0 .. byte_count)
        .map(|index|
            if noisy { index.wrapping_mul(2654435761) as u8 }
            else { (index / 4096) as u8 }
        )
        .collect();

    let codec = PizCodec::new(channels, window, max_scan_line_size, window.size.y());
    (codec, window, pixel_bytes)
}

fn compress_noisy_block(bench: &mut Bencher) {
    let (mut codec, window, pixel_bytes) = codec_and_block(true);

    bench.iter(||{
        let compressed = codec.compress_tile(&pixel_bytes, window).unwrap();
        bencher::black_box(compressed.len());
    })
}

fn compress_flat_block(bench: &mut Bencher) {
    let (mut codec, window, pixel_bytes) = codec_and_block(false);

    bench.iter(||{
        let compressed = codec.compress_tile(&pixel_bytes, window).unwrap();
        bencher::black_box(compressed.len());
    })
}

fn decompress_noisy_block(bench: &mut Bencher) {
    let (mut codec, window, pixel_bytes) = codec_and_block(true);
    let compressed = codec.compress_tile(&pixel_bytes, window).unwrap().to_vec();

    bench.iter(||{
        let decompressed = codec.decompress_tile(&compressed, window).unwrap();
        bencher::black_box(decompressed.len());
    })
}

fn decompress_flat_block(bench: &mut Bencher) {
    let (mut codec, window, pixel_bytes) = codec_and_block(false);
    let compressed = codec.compress_tile(&pixel_bytes, window).unwrap().to_vec();

    bench.iter(||{
        let decompressed = codec.decompress_tile(&compressed, window).unwrap();
        bencher::black_box(decompressed.len());
    })
}

benchmark_group!(blocks,
    compress_noisy_block,
    compress_flat_block,
    decompress_noisy_block,
    decompress_flat_block
);

benchmark_main!(blocks);
