
//! 16-bit Huffman compression and decompression.
//! The encoded byte string is self-describing:
//! a fixed header and a run-length-packed table of code lengths precede
//! the payload, and the decoder rebuilds the canonical codes
//! from the lengths alone.

use crate::error::{Error, Result, UnitResult, u64_to_usize, usize_to_u32};
use crate::io::Data;
use crate::math::RoundingMode;
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::collections::BinaryHeap;


const ENCODE_BITS: usize = 16; // literal (value) bit length
const DECODE_BITS: usize = 14; // decoding bit size (>= 8)

const ENCODE_SIZE: usize = (1 << ENCODE_BITS) + 1; // encoding table size
const DECODE_SIZE: usize = 1 << DECODE_BITS;       // decoding table size
const DECODE_MASK: u64 = DECODE_SIZE as u64 - 1;

/// The longest allowed code. A code of this length and its six length bits
/// exactly fill one of the `u64` code words the tables are made of.
const MAX_CODE_LENGTH: u64 = 58;

// The packed table alphabet: values 0..=58 are literal code lengths,
// 59..=62 stand for short runs of zero-length entries,
// and 63 is followed by an 8-bit count of a long zero run.
const SHORT_ZERO_RUN: u64 = 59;
const LONG_ZERO_RUN: u64 = 63;
const SHORTEST_LONG_RUN: u64 = 2 + LONG_ZERO_RUN - SHORT_ZERO_RUN;
const LONGEST_LONG_RUN: u64 = 255 + SHORTEST_LONG_RUN;

const HEADER_BYTE_SIZE: usize = 5 * u32::BYTE_SIZE;

const MISSING_HEADER: &str = "compressed data ended within the header";
const INVALID_TABLE_SIZE: &str = "invalid code table size";
const TABLE_TOO_SHORT: &str = "code table ended unexpectedly";
const TABLE_TOO_LONG: &str = "code table run exceeds its declared size";
const INVALID_TABLE_ENTRY: &str = "code table entry is not a prefix code";
const INVALID_CODE: &str = "invalid code in compressed data";
const INVALID_BIT_COUNT: &str = "bit count exceeds compressed data";
const MISSING_RUN_COUNT: &str = "repetition count ended unexpectedly";
const ORPHAN_RUN_CODE: &str = "repetition without a preceding value";


// A code word stores the code bits in the upper bits
// and the code length in the lower six bits.
#[inline] fn code_bits(word: u64) -> u64 { word >> 6 }
#[inline] fn code_length(word: u64) -> u64 { word & 63 }


/// Huffman-encode the samples into a self-describing byte string,
/// appended to the output vector. An empty input appends nothing.
pub fn compress(uncompressed: &[u16], compressed: &mut Vec<u8>) -> UnitResult {
    if uncompressed.is_empty() { return Ok(()); }

    let mut code_table = count_frequencies(uncompressed);
    let (min_code_index, max_code_index) = build_encoding_table(&mut code_table);

    let header_start = compressed.len();
    for _ in 0 .. HEADER_BYTE_SIZE / u32::BYTE_SIZE {
        0_u32.write(compressed).expect("in-memory write failed");
    }

    let table_start = compressed.len();
    pack_encoding_table(&code_table, min_code_index, max_code_index, compressed);

    let data_start = compressed.len();
    let bit_count = encode_symbols(&code_table, uncompressed, max_code_index, compressed);
    let table_byte_count = data_start - table_start;

    let mut header = &mut compressed[header_start .. table_start];
    usize_to_u32(min_code_index).write(&mut header).expect("in-memory write failed");
    usize_to_u32(max_code_index).write(&mut header).expect("in-memory write failed");
    usize_to_u32(table_byte_count).write(&mut header).expect("in-memory write failed");
    bit_count.write(&mut header).expect("in-memory write failed");
    // the fifth header word is reserved and remains zero

    Ok(())
}

/// Reproduce the exact sample sequence from a compressed byte string.
/// The output slice must have the expected sample count;
/// any disagreement with the stream is an error.
pub fn decompress(compressed: &[u8], uncompressed: &mut [u16]) -> UnitResult {
    if compressed.is_empty() {
        if uncompressed.is_empty() { return Ok(()); }
        return Err(Error::LengthMismatch { expected: uncompressed.len(), actual: 0 });
    }

    if compressed.len() < HEADER_BYTE_SIZE {
        return Err(Error::corrupt_stream(MISSING_HEADER));
    }

    let mut remaining = compressed;
    let min_code_index = u32::read(&mut remaining)? as usize;
    let max_code_index = u32::read(&mut remaining)? as usize;
    let _table_byte_count = u32::read(&mut remaining)? as usize; // the table end is derived from the code indices instead
    let bit_count = u32::read(&mut remaining)? as usize;
    let _reserved = u32::read(&mut remaining)?;

    if min_code_index >= ENCODE_SIZE || max_code_index >= ENCODE_SIZE || min_code_index > max_code_index {
        return Err(Error::corrupt_stream(INVALID_TABLE_SIZE));
    }

    let encoding_table = unpack_encoding_table(&mut remaining, min_code_index, max_code_index)?;

    if bit_count > 8 * remaining.len() {
        return Err(Error::corrupt_stream(INVALID_BIT_COUNT));
    }

    let decoding_table = build_decoding_table(&encoding_table, min_code_index, max_code_index)?;

    decode_symbols(
        &encoding_table, &decoding_table,
        remaining, bit_count,
        max_code_index, uncompressed,
    )
}


fn count_frequencies(data: &[u16]) -> Vec<u64> {
    let mut frequencies = vec![0_u64; ENCODE_SIZE];

    for &sample in data {
        frequencies[sample as usize] += 1;
    }

    frequencies
}


/// Replace the frequencies with canonical code words and return the
/// smallest and largest index that received a code. The largest index
/// is a pseudo-symbol with frequency one, appended behind the real
/// symbols, which the encoder emits to mark repetition counts.
fn build_encoding_table(frequencies: &mut [u64]) -> (usize, usize) {
    debug_assert_eq!(frequencies.len(), ENCODE_SIZE);

    // Ordered such that the max-heap yields the least frequent symbol
    // first, ties broken towards the smaller symbol index. The tie rule
    // makes the code assignment identical on every platform.
    #[derive(Eq, PartialEq)]
    struct LeastFrequent { frequency: u64, symbol: usize }

    impl Ord for LeastFrequent {
        fn cmp(&self, other: &Self) -> Ordering {
            other.frequency.cmp(&self.frequency)
                .then_with(|| other.symbol.cmp(&self.symbol))
        }
    }

    impl PartialOrd for LeastFrequent {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
    }

    let min_code_index = frequencies.iter()
        .position(|&frequency| frequency != 0)
        .expect("frequency table is empty");

    let mut max_code_index = 0;
    let mut heap = BinaryHeap::with_capacity(ENCODE_SIZE);

    for (symbol, &frequency) in frequencies.iter().enumerate() {
        if frequency != 0 {
            heap.push(LeastFrequent { frequency, symbol });
            max_code_index = symbol;
        }
    }

    // append the pseudo-symbol used for run length encoding
    max_code_index += 1;
    frequencies[max_code_index] = 1;
    heap.push(LeastFrequent { frequency: 1, symbol: max_code_index });

    // Count the leaf depths without building the tree: every symbol
    // chains the symbols of its subtree, and merging the two least
    // frequent subtrees adds one bit to each chained code length.
    let mut code_lengths = vec![0_u64; ENCODE_SIZE];
    let mut chain_links: Vec<usize> = (0 .. ENCODE_SIZE).collect();

    while heap.len() > 1 {
        let least = heap.pop().expect("heap is empty");
        let merged = heap.pop().expect("heap is empty");

        heap.push(LeastFrequent {
            frequency: least.frequency + merged.frequency,
            symbol: merged.symbol,
        });

        let mut link = merged.symbol;
        loop {
            code_lengths[link] += 1;
            debug_assert!(code_lengths[link] <= MAX_CODE_LENGTH);

            if chain_links[link] == link {
                chain_links[link] = least.symbol; // join the two chains
                break;
            }

            link = chain_links[link];
        }

        let mut link = least.symbol;
        loop {
            code_lengths[link] += 1;
            debug_assert!(code_lengths[link] <= MAX_CODE_LENGTH);

            if chain_links[link] == link { break; }
            link = chain_links[link];
        }
    }

    canonical_code_table(&mut code_lengths);
    frequencies.copy_from_slice(&code_lengths);

    (min_code_index, max_code_index)
}


/// Turn code lengths into canonical code words.
/// Shorter codes, filled with zeroes to the right, are numerically
/// higher than longer codes, and codes of the same length increase
/// with their symbol value. Because of these two rules, transmitting
/// the lengths suffices to rebuild the exact codes.
fn canonical_code_table(code_table: &mut [u64]) {
    debug_assert_eq!(code_table.len(), ENCODE_SIZE);

    // count the codes of each length, then replace each count
    // with the numerically smallest code of that length
    let mut next_code_of_length = [0_u64; MAX_CODE_LENGTH as usize + 1];

    for &length in code_table.iter() {
        next_code_of_length[length as usize] += 1;
    }

    let mut code = 0_u64;
    for count in next_code_of_length.iter_mut().skip(1).rev() {
        let next_code = (code + *count) >> 1;
        *count = code;
        code = next_code;
    }

    for word in code_table.iter_mut() {
        let length = *word;

        if length > 0 {
            *word = length | (next_code_of_length[length as usize] << 6);
            next_code_of_length[length as usize] += 1;
        }
    }
}


/// Run-length-pack the code lengths of all symbols
/// between the two indices, inclusive.
fn pack_encoding_table(
    code_table: &[u64],
    min_code_index: usize, max_code_index: usize,
    packed: &mut Vec<u8>,
){
    let mut writer = BitWriter::new(packed);
    let mut symbol = min_code_index;

    while symbol <= max_code_index {
        let length = code_length(code_table[symbol]);

        if length == 0 {
            let mut run = 1_u64;

            while symbol + run as usize <= max_code_index && run < LONGEST_LONG_RUN {
                if code_length(code_table[symbol + run as usize]) > 0 { break; }
                run += 1;
            }

            if run >= 2 {
                if run >= SHORTEST_LONG_RUN {
                    writer.write_bits(6, LONG_ZERO_RUN);
                    writer.write_bits(8, run - SHORTEST_LONG_RUN);
                }
                else {
                    writer.write_bits(6, SHORT_ZERO_RUN + run - 2);
                }

                symbol += run as usize;
                continue;
            }
        }

        writer.write_bits(6, length);
        symbol += 1;
    }

    writer.flush();
}

/// Read the run-length-packed code lengths and rebuild the canonical
/// code words. Advances the cursor to the byte after the table.
fn unpack_encoding_table(
    packed: &mut &[u8],
    min_code_index: usize, max_code_index: usize,
) -> Result<Vec<u64>>
{
    let input = *packed;
    let mut code_table = vec![0_u64; ENCODE_SIZE];
    let mut reader = BitReader::new(input);

    let mut symbol = min_code_index;
    while symbol <= max_code_index {
        let length = reader.read_bits(6)?;

        if length == LONG_ZERO_RUN {
            let run = reader.read_bits(8)? + SHORTEST_LONG_RUN;

            if symbol + run as usize > max_code_index + 1 {
                return Err(Error::corrupt_stream(TABLE_TOO_LONG));
            }

            symbol += run as usize; // the entries of the run are already zero
        }
        else if length >= SHORT_ZERO_RUN {
            let run = length - SHORT_ZERO_RUN + 2;

            if symbol + run as usize > max_code_index + 1 {
                return Err(Error::corrupt_stream(TABLE_TOO_LONG));
            }

            symbol += run as usize;
        }
        else {
            code_table[symbol] = length;
            symbol += 1;
        }
    }

    *packed = &input[reader.consumed_byte_count() ..];

    canonical_code_table(&mut code_table);
    Ok(code_table)
}


/// One slot of the flat decoding table, addressed by the next
/// `DECODE_BITS` bits of the stream.
#[derive(Clone, Debug, Eq, PartialEq)]
enum CodeEntry {
    /// No code starts with the slot index.
    Empty,

    /// A code of at most `DECODE_BITS` bits, identified directly.
    Short { length: u8, symbol: u32 },

    /// The symbols of all longer codes starting with the slot index,
    /// in ascending order, searched linearly.
    Long(SmallVec<[u32; 2]>),
}

fn build_decoding_table(
    encoding_table: &[u64],
    min_code_index: usize, max_code_index: usize,
) -> Result<Vec<CodeEntry>>
{
    let mut table = vec![CodeEntry::Empty; DECODE_SIZE];

    for symbol in min_code_index ..= max_code_index {
        let word = encoding_table[symbol];
        let code = code_bits(word);
        let length = code_length(word) as usize;

        if code >> length != 0 {
            // the code has more bits than its stated length
            return Err(Error::corrupt_stream(INVALID_TABLE_ENTRY));
        }

        if length > DECODE_BITS {
            let slot = &mut table[u64_to_usize(code >> (length - DECODE_BITS))];

            match slot {
                CodeEntry::Empty => *slot = CodeEntry::Long(smallvec![usize_to_u32(symbol)]),
                CodeEntry::Long(symbols) => symbols.push(usize_to_u32(symbol)),
                CodeEntry::Short { .. } => return Err(Error::corrupt_stream(INVALID_TABLE_ENTRY)),
            }
        }
        else if length != 0 {
            // a short code owns every slot it prefixes
            let first_slot = u64_to_usize(code << (DECODE_BITS - length));
            let slot_count = 1_usize << (DECODE_BITS - length);

            for slot in &mut table[first_slot .. first_slot + slot_count] {
                if *slot != CodeEntry::Empty {
                    return Err(Error::corrupt_stream(INVALID_TABLE_ENTRY));
                }

                *slot = CodeEntry::Short { length: length as u8, symbol: usize_to_u32(symbol) };
            }
        }
    }

    Ok(table)
}


/// Encode the samples, collapsing runs of up to 255 repetitions
/// through the pseudo-symbol. Returns the exact number of payload bits,
/// excluding the zero padding of the last byte.
fn encode_symbols(
    code_table: &[u64],
    data: &[u16],
    run_length_code: usize,
    out: &mut Vec<u8>,
) -> u32
{
    let mut writer = BitWriter::new(out);

    let mut current = data[0];
    let mut run = 0_u64; // repetitions beyond the first occurrence

    for &sample in &data[1 ..] {
        if sample == current && run < 255 {
            run += 1;
        }
        else {
            send_code(&mut writer, code_table[current as usize], run, code_table[run_length_code]);
            run = 0;
        }

        current = sample;
    }

    send_code(&mut writer, code_table[current as usize], run, code_table[run_length_code]);

    let bit_count = writer.written_bit_count();
    writer.flush();

    usize_to_u32(u64_to_usize(bit_count))
}

/// Emit one symbol and its repetition count: either the symbol code,
/// the run marker and an 8-bit count, or the symbol code repeated,
/// whichever is shorter.
fn send_code(writer: &mut BitWriter<'_>, symbol_code: u64, run: u64, run_length_code: u64) {
    if code_length(symbol_code) + code_length(run_length_code) + 8 < code_length(symbol_code) * run {
        writer.write_code(symbol_code);
        writer.write_code(run_length_code);
        writer.write_bits(8, run);
    }
    else {
        for _ in 0 ..= run {
            writer.write_code(symbol_code);
        }
    }
}


/// Decode the payload into the output slice.
/// After the last whole byte, the remaining short codes are drained
/// from the accumulator, reading absent bits as zero; trailing padding
/// is thereby ignored, never rejected.
fn decode_symbols(
    encoding_table: &[u64],
    decoding_table: &[CodeEntry],
    input: &[u8],
    bit_count: usize,
    run_length_code: usize,
    output: &mut [u16],
) -> UnitResult
{
    let byte_count = RoundingMode::Up.divide(bit_count, 8);
    debug_assert!(byte_count <= input.len(), "bit count not validated");

    let mut accumulator = 0_u64;
    let mut available = 0_i64; // may go below zero while consuming padding
    let mut position = 0_usize;
    let mut written = 0_usize;

    while position < byte_count {
        accumulator = (accumulator << 8) | input[position] as u64;
        position += 1;
        available += 8;

        while available >= DECODE_BITS as i64 {
            let slot = ((accumulator >> (available - DECODE_BITS as i64)) & DECODE_MASK) as usize;

            match &decoding_table[slot] {
                CodeEntry::Short { length, symbol } => {
                    available -= *length as i64;

                    write_symbol_or_run(
                        *symbol as usize, run_length_code,
                        &mut accumulator, &mut available,
                        input, byte_count, &mut position,
                        output, &mut written,
                    )?;
                }

                CodeEntry::Long(symbols) => {
                    let mut matched = false;

                    for &candidate in symbols {
                        let word = encoding_table[candidate as usize];
                        let length = code_length(word) as i64;

                        while available < length && position < byte_count {
                            accumulator = (accumulator << 8) | input[position] as u64;
                            position += 1;
                            available += 8;
                        }

                        if available >= length {
                            let bits = (accumulator >> (available - length)) & ((1_u64 << length) - 1);

                            if code_bits(word) == bits {
                                available -= length;

                                write_symbol_or_run(
                                    candidate as usize, run_length_code,
                                    &mut accumulator, &mut available,
                                    input, byte_count, &mut position,
                                    output, &mut written,
                                )?;

                                matched = true;
                                break;
                            }
                        }
                    }

                    if !matched { return Err(Error::corrupt_stream(INVALID_CODE)); }
                }

                CodeEntry::Empty => return Err(Error::corrupt_stream(INVALID_CODE)),
            }
        }
    }

    // skip the padding of the last byte, then drain the remaining short codes
    let padding = (8 - bit_count as i64) & 7;
    accumulator >>= padding;
    available -= padding;

    while available > 0 {
        let slot = ((accumulator << (DECODE_BITS as i64 - available)) & DECODE_MASK) as usize;

        match &decoding_table[slot] {
            CodeEntry::Short { length, symbol } => {
                available -= *length as i64;

                write_symbol_or_run(
                    *symbol as usize, run_length_code,
                    &mut accumulator, &mut available,
                    input, byte_count, &mut position,
                    output, &mut written,
                )?;
            }

            _ => return Err(Error::corrupt_stream(INVALID_CODE)),
        }
    }

    if written != output.len() {
        return Err(Error::LengthMismatch { expected: output.len(), actual: written });
    }

    Ok(())
}

/// Append one decoded symbol, or, for the run marker,
/// read the 8-bit count and repeat the previous symbol.
fn write_symbol_or_run(
    symbol: usize,
    run_length_code: usize,
    accumulator: &mut u64,
    available: &mut i64,
    input: &[u8],
    byte_count: usize,
    position: &mut usize,
    output: &mut [u16],
    written: &mut usize,
) -> UnitResult
{
    if symbol == run_length_code {
        while *available < 8 {
            if *position >= byte_count {
                return Err(Error::corrupt_stream(MISSING_RUN_COUNT));
            }

            *accumulator = (*accumulator << 8) | input[*position] as u64;
            *position += 1;
            *available += 8;
        }

        *available -= 8;
        let run = ((*accumulator >> *available) & 0xff) as usize;

        if *written + run > output.len() {
            return Err(Error::LengthMismatch { expected: output.len(), actual: *written + run });
        }

        if *written == 0 {
            return Err(Error::corrupt_stream(ORPHAN_RUN_CODE));
        }

        let previous = output[*written - 1];
        for entry in &mut output[*written .. *written + run] {
            *entry = previous;
        }

        *written += run;
    }
    else {
        if *written >= output.len() {
            return Err(Error::LengthMismatch { expected: output.len(), actual: *written + 1 });
        }

        output[*written] = symbol as u16;
        *written += 1;
    }

    Ok(())
}


/// Streams bits into a byte vector, most significant bit first.
struct BitWriter<'v> {
    out: &'v mut Vec<u8>,
    start_byte_count: usize,
    accumulator: u64,
    buffered_bits: u64,
}

impl<'v> BitWriter<'v> {
    fn new(out: &'v mut Vec<u8>) -> Self {
        let start_byte_count = out.len();
        Self { out, start_byte_count, accumulator: 0, buffered_bits: 0 }
    }

    fn write_bits(&mut self, count: u64, bits: u64) {
        self.accumulator = (self.accumulator << count) | bits;
        self.buffered_bits += count;

        while self.buffered_bits >= 8 {
            self.buffered_bits -= 8;
            self.out.push((self.accumulator >> self.buffered_bits) as u8);
        }
    }

    fn write_code(&mut self, word: u64) {
        self.write_bits(code_length(word), code_bits(word));
    }

    /// The exact number of bits written so far, excluding padding.
    fn written_bit_count(&self) -> u64 {
        (self.out.len() - self.start_byte_count) as u64 * 8 + self.buffered_bits
    }

    /// Pad the buffered bits with zeroes to a whole byte and write it.
    fn flush(&mut self) {
        if self.buffered_bits > 0 {
            self.out.push((self.accumulator << (8 - self.buffered_bits)) as u8);
            self.buffered_bits = 0;
        }
    }
}


/// Streams bits out of a byte slice, most significant bit first.
struct BitReader<'b> {
    bytes: &'b [u8],
    position: usize,
    accumulator: u64,
    buffered_bits: u64,
}

impl<'b> BitReader<'b> {
    fn new(bytes: &'b [u8]) -> Self {
        Self { bytes, position: 0, accumulator: 0, buffered_bits: 0 }
    }

    fn read_bits(&mut self, count: u64) -> Result<u64> {
        while self.buffered_bits < count {
            if self.position >= self.bytes.len() {
                return Err(Error::corrupt_stream(TABLE_TOO_SHORT));
            }

            self.accumulator = (self.accumulator << 8) | self.bytes[self.position] as u64;
            self.position += 1;
            self.buffered_bits += 8;
        }

        self.buffered_bits -= count;
        Ok((self.accumulator >> self.buffered_bits) & ((1 << count) - 1))
    }

    /// How many whole bytes have been pulled from the slice.
    fn consumed_byte_count(&self) -> usize {
        self.position
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn roundtrip(data: &[u16]) -> Vec<u8> {
        let mut compressed = Vec::new();
        compress(data, &mut compressed).unwrap();

        let mut decompressed = vec![0_u16; data.len()];
        decompress(&compressed, &mut decompressed).unwrap();

        assert_eq!(data, decompressed.as_slice());
        compressed
    }

    #[test]
    fn roundtrip_empty(){
        let compressed = roundtrip(&[]);
        assert!(compressed.is_empty());
    }

    #[test]
    fn roundtrip_single_symbol(){
        roundtrip(&[0x1234]);
        roundtrip(&[0]);
        roundtrip(&[65535]);
    }

    #[test]
    fn roundtrip_repetitions(){
        roundtrip(&[7; 2]);
        roundtrip(&[7; 255]);
        roundtrip(&[7; 256]);
        roundtrip(&[7; 257]);
        roundtrip(&[0; 100_000]);
    }

    #[test]
    fn roundtrip_uniform_noise(){
        let data: Vec<u16> = (0 .. 1_000_000).map(|_| rand::random()).collect();
        roundtrip(&data);
    }

    #[test]
    fn roundtrip_skewed_noise(){
        // mostly small values, occasionally large ones
        let data: Vec<u16> = (0 .. 100_000)
            .map(|_| (65535.0 * rand::random::<f32>().powi(6)) as u16)
            .collect();

        roundtrip(&data);
    }

    #[test]
    fn roundtrip_gradient(){
        let data: Vec<u16> = (0 .. 10_000).map(|index| (index % 2049) as u16).collect();
        roundtrip(&data);
    }

    #[test]
    fn truncated_input_never_decodes(){
        let data: Vec<u16> = (0 .. 1000).map(|_| rand::random::<u16>() % 100).collect();

        let mut compressed = Vec::new();
        compress(&data, &mut compressed).unwrap();

        let mut decompressed = vec![0_u16; data.len()];
        for length in 0 .. compressed.len() {
            assert!(
                decompress(&compressed[.. length], &mut decompressed).is_err(),
                "a prefix of {} of {} bytes decoded silently", length, compressed.len()
            );
        }
    }

    #[test]
    fn wrong_expected_count_is_detected(){
        let data = [5_u16; 1000];

        let mut compressed = Vec::new();
        compress(&data, &mut compressed).unwrap();

        let mut too_short = vec![0_u16; 999];
        assert!(matches!(
            decompress(&compressed, &mut too_short),
            Err(Error::LengthMismatch { .. })
        ));

        let mut too_long = vec![0_u16; 1001];
        assert!(matches!(
            decompress(&compressed, &mut too_long),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn header_records_the_code_range(){
        let mut compressed = Vec::new();
        compress(&[3, 3, 4], &mut compressed).unwrap();

        let mut read = compressed.as_slice();
        let min_code_index = u32::read(&mut read).unwrap();
        let max_code_index = u32::read(&mut read).unwrap();

        assert_eq!(min_code_index, 3);
        assert_eq!(max_code_index, 5); // one behind the largest symbol: the run marker
    }
}
