
//! Describes the channel schema and block geometry
//! that the surrounding container resolves before invoking the codec.

use crate::error::usize_to_i32;
use crate::math::Vec2;
use smallvec::SmallVec;
use std::convert::TryFrom;


type TextBytes = SmallVec<[u8; 24]>;

/// A short byte string, one byte per char, as used for channel names.
/// This is not UTF and must be constructed from a standard string.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Text {
    bytes: TextBytes,
}

impl Text {

    /// The internal ASCII bytes this text is made of.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Create a `Text` from an `str` reference.
    /// Returns `None` if this string contains unsupported chars.
    pub fn from(str: impl AsRef<str>) -> Option<Self> {
        let bytes: Option<TextBytes> = str.as_ref().chars()
            .map(|character| u8::try_from(character as u64).ok())
            .collect();

        bytes.map(|bytes| Text { bytes })
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &byte in self.bytes() {
            write!(formatter, "{}", byte as char)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Text {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "\"{}\"", self)
    }
}


/// What kind of pixels are in a channel.
/// The codec never interprets sample bits as numbers;
/// this only determines how many 16-bit samples one pixel occupies.
#[derive(Clone, Debug, Eq, PartialEq, Copy, Hash)]
pub enum SampleType {

    /// This channel contains 32-bit unsigned int values.
    U32,

    /// This channel contains 16-bit float values.
    F16,

    /// This channel contains 32-bit float values.
    F32,
}

impl SampleType {

    /// How many bytes a single sample of this type occupies.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            SampleType::F16 => 2,
            SampleType::F32 => 4,
            SampleType::U32 => 4,
        }
    }

    /// How many 16-bit samples a single sample of this type is split into.
    /// The wavelet and Huffman coders handle only 16-bit data,
    /// so 32-bit channels are treated as two interleaved 16-bit sample streams.
    pub fn samples_per_pixel(self) -> usize {
        self.bytes_per_sample() / SampleType::F16.bytes_per_sample()
    }
}


/// A single channel in a layer.
/// Does not contain the actual pixel data, but instead merely describes it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChannelDescription {

    /// One of "R", "G", or "B" most of the time.
    pub name: Text,

    /// U32, F16 or F32.
    pub sample_type: SampleType,

    /// How many of the samples are skipped compared to the other channels in this layer.
    /// A column `x` is present iff `x` is divisible by `sampling.x()`,
    /// and a row `y` iff `y` is divisible by `sampling.y()`.
    pub sampling: Vec2<usize>,
}

impl ChannelDescription {

    /// Create a new channel description.
    pub fn new(name: impl AsRef<str>, sample_type: SampleType, sampling: impl Into<Vec2<usize>>) -> Self {
        Self {
            name: Text::from(name).expect("invalid channel name"),
            sample_type,
            sampling: sampling.into(),
        }
    }
}


/// A list of channels in the order chosen by the container.
/// This order is part of the on-wire contract of the codec.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChannelList {

    /// The channels in this list.
    pub list: SmallVec<[ChannelDescription; 5]>,

    /// The number of bytes that one pixel in this image needs.
    pub bytes_per_pixel: usize,

    /// The sample type of all channels, if all channels have the same type.
    pub uniform_sample_type: Option<SampleType>,
}

impl ChannelList {

    /// Does not validate channel order.
    pub fn new(channels: SmallVec<[ChannelDescription; 5]>) -> Self {
        let uniform_sample_type = {
            if let Some(first) = channels.first() {
                let has_uniform_types = channels.iter().skip(1)
                    .all(|channel| channel.sample_type == first.sample_type);

                if has_uniform_types { Some(first.sample_type) } else { None }
            }
            else { None }
        };

        ChannelList {
            bytes_per_pixel: channels.iter().map(|channel| channel.sample_type.bytes_per_sample()).sum(),
            list: channels, uniform_sample_type,
        }
    }
}


/// A rectangular section anywhere in 2D integer space.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub struct IntegerBounds {

    /// The top left corner of this rectangle.
    /// The rectangle includes this pixel if the size is not zero.
    pub position: Vec2<i32>,

    /// How many pixels to include in this rectangle.
    /// Does not include the actual boundary, just like `Vec::len()`.
    pub size: Vec2<usize>,
}

impl IntegerBounds {

    /// Create a box with a size and an origin point.
    pub fn new(position: impl Into<Vec2<i32>>, size: impl Into<Vec2<usize>>) -> Self {
        Self { position: position.into(), size: size.into() }
    }

    /// Create a box with a size starting at zero.
    pub fn from_dimensions(size: impl Into<Vec2<usize>>) -> Self {
        Self::new(Vec2(0, 0), size)
    }

    /// Returns the coordinate one past the bottom-right corner of the rectangle,
    /// just like `Vec::len()`.
    pub fn end(self) -> Vec2<i32> {
        Vec2(
            self.position.x() + usize_to_i32(self.size.x()),
            self.position.y() + usize_to_i32(self.size.y()),
        )
    }

    /// Returns the maximum coordinate that a pixel in this rectangle may have.
    pub fn max(self) -> Vec2<i32> {
        let end = self.end();
        Vec2(end.x() - 1, end.y() - 1)
    }
}
