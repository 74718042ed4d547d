
//! Compress and decompress image pixel blocks with the lossless
//! PIZ scheme, without any unsafe code.
//!
//! A wavelet transform is applied to the 16-bit sample data
//! and the result is Huffman-encoded. Works well for noisy
//! and natural images; the byte output is bit-compatible
//! with PIZ blocks in OpenEXR files.

#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused_extern_crates,
    unused,

    missing_copy_implementations,
    missing_debug_implementations,

    clippy::all,
    clippy::pedantic,
)]

#![deny(
    unused_variables,
    unused_assignments,
    dead_code,
    unused_must_use,
    trivial_numeric_casts,
)]

#![forbid(unsafe_code)]

pub mod error;
pub mod io;
pub mod math;
pub mod meta;

pub mod lut;
pub mod wavelet;
pub mod huffman;
pub mod codec;


/// Re-exports of everything commonly required
/// for compressing and decompressing pixel blocks.
pub mod prelude {
    pub use crate::codec::{PizCodec, SCAN_LINES_PER_BLOCK};
    pub use crate::error::{Error, Result, UnitResult};
    pub use crate::math::Vec2;
    pub use crate::meta::{ChannelDescription, ChannelList, IntegerBounds, SampleType, Text};

    // re-export external stuff
    pub use half::f16;
    pub use smallvec::smallvec;
}
