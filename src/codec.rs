
//! The PIZ block codec.
//! Compression deinterleaves the pixel bytes into per-channel sample
//! regions, compacts the sample value range, wavelet-transforms each
//! channel plane and Huffman-codes the whole scratch buffer in one go.
//! Decompression runs the exact inverse chain.

use crate::error::{Error, Result, usize_to_i32, usize_to_u16};
use crate::huffman;
use crate::io::Data;
use crate::lut;
use crate::lut::{BITMAP_SIZE, U16_RANGE};
use crate::math::{mod_p, subsampled_count, Vec2};
use crate::meta::{ChannelList, IntegerBounds, SampleType};
use crate::wavelet;
use lebe::io::{ReadEndian, WriteEndian};


/// The number of scan lines the container packs into one block
/// for this codec, unless the block is a tile.
pub const SCAN_LINES_PER_BLOCK: usize = 32;


/// How the sample bytes are laid out in the uncompressed buffers
/// exchanged with the caller. Decided once at construction:
/// the native memory layout applies iff every channel stores 16-bit
/// floats, whose portable and native representations have the same size.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Format { Portable, Native }


/// The region of one channel within the shared scratch buffer.
/// All regions are physically adjacent in channel order,
/// so the Huffman coder can treat the entire scratch
/// as a single symbol sequence.
#[derive(Debug, Clone)]
struct ChannelRegion {
    start_index: usize,

    /// Grows line by line while interleaving or deinterleaving.
    end_index: usize,

    resolution: Vec2<usize>,
    y_sampling: usize,

    /// 32-bit channels are compressed as two interleaved 16-bit planes.
    samples_per_pixel: usize,
}

impl ChannelRegion {

    /// The number of 16-bit samples this channel contributes to the block.
    fn sample_count(&self) -> usize {
        self.resolution.area() * self.samples_per_pixel
    }
}


/// Compresses and decompresses pixel blocks of one image.
/// The instance owns pre-sized scratch and output buffers,
/// reused across calls; each call is a single atomic transition
/// and no state carries over between calls.
/// Create one instance per concurrent worker.
#[derive(Debug)]
pub struct PizCodec {
    channels: ChannelList,
    data_window: IntegerBounds,
    scan_lines_per_block: usize,
    format: Format,

    scratch: Vec<u16>,
    bitmap: Vec<u8>,
    lookup_table: Vec<u16>,
    output: Vec<u8>,
}

impl PizCodec {

    /// Create a codec for the given channel schema and data window.
    /// `max_scan_line_size` is the largest byte count of one scan line
    /// of all channels, an upper bound supplied by the container.
    pub fn new(
        channels: ChannelList,
        data_window: IntegerBounds,
        max_scan_line_size: usize,
        scan_lines_per_block: usize,
    ) -> Self
    {
        debug_assert!(
            channels.list.iter().all(|channel|
                channel.sample_type.bytes_per_sample() % SampleType::F16.bytes_per_sample() == 0
            ),
            "sample type size must be a multiple of 16 bit"
        );

        let format =
            if channels.uniform_sample_type == Some(SampleType::F16) { Format::Native }
            else { Format::Portable };

        let scratch_sample_count = max_scan_line_size * scan_lines_per_block / 2;
        let output_byte_count = max_scan_line_size * scan_lines_per_block + U16_RANGE + BITMAP_SIZE;

        Self {
            format,
            scratch: vec![0; scratch_sample_count],
            bitmap: vec![0; BITMAP_SIZE],
            lookup_table: vec![0; U16_RANGE],
            output: Vec::with_capacity(output_byte_count),
            channels, data_window, scan_lines_per_block,
        }
    }

    /// Whether buffers exchanged with the caller use the native memory
    /// layout of 16-bit samples instead of the portable little-endian form.
    pub fn uses_native_format(&self) -> bool {
        self.format == Format::Native
    }

    /// Compress one scan line block, starting at the given absolute line.
    /// The returned bytes borrow the codec-owned output buffer.
    /// An empty input produces an empty block.
    pub fn compress(&mut self, uncompressed: &[u8], first_line: i32) -> Result<&[u8]> {
        let bounds = self.scan_line_block_bounds(first_line);
        self.compress_block(uncompressed, bounds)
    }

    /// Compress one tile.
    /// The returned bytes borrow the codec-owned output buffer.
    pub fn compress_tile(&mut self, uncompressed: &[u8], tile: IntegerBounds) -> Result<&[u8]> {
        self.compress_block(uncompressed, tile)
    }

    /// Decompress one scan line block, starting at the given absolute line.
    /// The returned bytes borrow the codec-owned output buffer.
    /// On error, the output buffer is left in an unspecified state.
    pub fn decompress(&mut self, compressed: &[u8], first_line: i32) -> Result<&[u8]> {
        let bounds = self.scan_line_block_bounds(first_line);
        self.decompress_block(compressed, bounds)
    }

    /// Decompress one tile.
    /// The returned bytes borrow the codec-owned output buffer.
    pub fn decompress_tile(&mut self, compressed: &[u8], tile: IntegerBounds) -> Result<&[u8]> {
        self.decompress_block(compressed, tile)
    }


    fn scan_line_block_bounds(&self, first_line: i32) -> IntegerBounds {
        IntegerBounds::new(
            Vec2(self.data_window.position.x(), first_line),
            Vec2(self.data_window.size.x(), self.scan_lines_per_block),
        )
    }

    /// The requested rectangle with its max corner truncated
    /// to the data window, as inclusive sample coordinates.
    fn clamp_to_data_window(&self, bounds: IntegerBounds) -> (Vec2<i32>, Vec2<i32>) {
        let min = bounds.position;
        let mut max = bounds.max();
        let window_max = self.data_window.max();

        if max.x() > window_max.x() { max = Vec2(window_max.x(), max.y()); }
        if max.y() > window_max.y() { max = Vec2(max.x(), window_max.y()); }

        (min, max)
    }

    /// Partition the scratch buffer into adjacent per-channel regions,
    /// in channel order. Returns the regions and the total sample count.
    fn channel_regions(&self, min: Vec2<i32>, max: Vec2<i32>) -> (Vec<ChannelRegion>, usize) {
        let mut regions = Vec::with_capacity(self.channels.list.len());
        let mut next_start_index = 0;

        for channel in &self.channels.list {
            let region = ChannelRegion {
                start_index: next_start_index,
                end_index: next_start_index,

                resolution: Vec2(
                    subsampled_count(channel.sampling.x(), min.x(), max.x()),
                    subsampled_count(channel.sampling.y(), min.y(), max.y()),
                ),

                y_sampling: channel.sampling.y(),
                samples_per_pixel: channel.sample_type.samples_per_pixel(),
            };

            next_start_index += region.sample_count();
            regions.push(region);
        }

        (regions, next_start_index)
    }


    fn compress_block(&mut self, uncompressed: &[u8], requested: IntegerBounds) -> Result<&[u8]> {
        self.output.clear();

        if uncompressed.is_empty() {
            return Ok(&self.output);
        }

        let (min, max) = self.clamp_to_data_window(requested);
        let (mut regions, sample_count) = self.channel_regions(min, max);

        debug_assert_eq!(sample_count * 2, uncompressed.len(), "pixel byte count mismatch");
        debug_assert!(sample_count <= self.scratch.len(), "block exceeds the scratch buffer");
        let scratch = &mut self.scratch[.. sample_count];

        // deinterleave rows, channels within each row;
        // this iteration order is part of the on-wire contract
        let mut remaining_input = uncompressed;
        for y in min.y() ..= max.y() {
            for region in regions.iter_mut() {
                if mod_p(y, usize_to_i32(region.y_sampling)) != 0 { continue; }

                let samples_per_line = region.resolution.x() * region.samples_per_pixel;
                let line = &mut scratch[region.end_index .. region.end_index + samples_per_line];
                region.end_index += samples_per_line;

                match self.format {
                    Format::Native => remaining_input
                        .read_from_native_endian_into(line)
                        .expect("in-memory read failed"),

                    Format::Portable => u16::read_slice(&mut remaining_input, line)
                        .expect("in-memory read failed"),
                }
            }
        }

        for index in 1 .. regions.len() {
            debug_assert_eq!(
                regions[index - 1].end_index, regions[index].start_index,
                "scratch regions must be adjacent"
            );
        }

        debug_assert_eq!(regions.last().expect("no channels").end_index, sample_count);

        // compact the range of the sample values
        let (min_byte_index, max_byte_index) = lut::bitmap_from_data(scratch, &mut self.bitmap);
        let max_value = lut::forward_lookup_table_from_bitmap(&self.bitmap, &mut self.lookup_table);
        lut::apply_lookup_table(scratch, &self.lookup_table);

        usize_to_u16(min_byte_index)?.write(&mut self.output).expect("in-memory write failed");
        usize_to_u16(max_byte_index)?.write(&mut self.output).expect("in-memory write failed");

        if min_byte_index <= max_byte_index {
            self.output.extend_from_slice(&self.bitmap[min_byte_index ..= max_byte_index]);
        }

        // wavelet-encode each interleaved sub-plane of each channel
        for region in &regions {
            for plane in 0 .. region.samples_per_pixel {
                wavelet::encode(
                    &mut scratch[region.start_index + plane .. region.start_index + region.sample_count()],
                    region.resolution,
                    Vec2(region.samples_per_pixel, region.resolution.x() * region.samples_per_pixel),
                    max_value,
                )?;
            }
        }

        // append the huffman payload behind its length slot
        let length_position = self.output.len();
        0_i32.write(&mut self.output).expect("in-memory write failed");

        let payload_start = self.output.len();
        huffman::compress(scratch, &mut self.output)?;
        let payload_length = self.output.len() - payload_start;

        let mut length_slot = &mut self.output[length_position .. payload_start];
        usize_to_i32(payload_length).write(&mut length_slot).expect("in-memory write failed");

        Ok(&self.output)
    }


    fn decompress_block(&mut self, compressed: &[u8], requested: IntegerBounds) -> Result<&[u8]> {
        self.output.clear();

        if compressed.is_empty() {
            return Ok(&self.output);
        }

        let (min, max) = self.clamp_to_data_window(requested);
        let (mut regions, sample_count) = self.channel_regions(min, max);

        debug_assert!(sample_count <= self.scratch.len(), "block exceeds the scratch buffer");
        let scratch = &mut self.scratch[.. sample_count];

        let mut remaining_input = compressed;
        let min_byte_index = u16::read(&mut remaining_input)? as usize;
        let max_byte_index = u16::read(&mut remaining_input)? as usize;

        if max_byte_index >= BITMAP_SIZE {
            return Err(Error::corrupt_block("bitmap end out of range"));
        }

        for byte in self.bitmap.iter_mut() { *byte = 0; }

        if min_byte_index <= max_byte_index {
            u8::read_slice(&mut remaining_input, &mut self.bitmap[min_byte_index ..= max_byte_index])?;
        }

        let max_value = lut::reverse_lookup_table_from_bitmap(&self.bitmap, &mut self.lookup_table);

        let payload_length = i32::read(&mut remaining_input)?;
        if payload_length < 0 || payload_length as usize > remaining_input.len() {
            return Err(Error::corrupt_block("huffman payload length out of range"));
        }

        huffman::decompress(&remaining_input[.. payload_length as usize], scratch)?;

        // wavelet-decode each interleaved sub-plane of each channel
        for region in &regions {
            for plane in 0 .. region.samples_per_pixel {
                wavelet::decode(
                    &mut scratch[region.start_index + plane .. region.start_index + region.sample_count()],
                    region.resolution,
                    Vec2(region.samples_per_pixel, region.resolution.x() * region.samples_per_pixel),
                    max_value,
                )?;
            }
        }

        // expand the samples back to their original values
        lut::apply_lookup_table(scratch, &self.lookup_table);

        // reinterleave rows, channels within each row
        for y in min.y() ..= max.y() {
            for region in regions.iter_mut() {
                if mod_p(y, usize_to_i32(region.y_sampling)) != 0 { continue; }

                let samples_per_line = region.resolution.x() * region.samples_per_pixel;
                let line = &scratch[region.end_index .. region.end_index + samples_per_line];
                region.end_index += samples_per_line;

                match self.format {
                    Format::Native => self.output
                        .write_as_native_endian(line)
                        .expect("in-memory write failed"),

                    Format::Portable => u16::write_slice(&mut self.output, line)
                        .expect("in-memory write failed"),
                }
            }
        }

        for index in 1 .. regions.len() {
            debug_assert_eq!(
                regions[index - 1].end_index, regions[index].start_index,
                "scratch regions must be adjacent"
            );
        }

        debug_assert_eq!(regions.last().expect("no channels").end_index, sample_count);

        Ok(&self.output)
    }
}
