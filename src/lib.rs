//! Lossless encoder and decoder for the QOI ("Quite OK Image") format.
//!
//! ```
//! use qoi_codec::{decode, encode_raw};
//!
//! let pixels = [255, 0, 0, 255, 255, 0, 0, 255, 0, 0, 255, 128];
//! let encoded = encode_raw(&pixels, 3, 1, 4, 0)?;
//! let image = decode(&encoded)?;
//! assert_eq!(image.into_raw(), pixels);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub use crate::decode::{decode, decode_with_limits};
#[cfg(feature = "std")]
pub use crate::decode::decode_from_reader;
pub use crate::encode::{encode, encode_raw};
#[cfg(feature = "std")]
pub use crate::encode::encode_to_writer;
pub use crate::error::{DecodeError, EncodeError, Section};
pub use crate::header::{decode_header, encode_header};
pub use crate::image::{Image, ImageView, RawImage};
pub use crate::limits::Limits;
pub use crate::model::{ColourChannels, Colourspace, Pixel, QoiHeader};

pub mod decode;
pub mod encode;
mod chunk;
mod constants;
mod error;
mod header;
mod image;
mod limits;
mod model;
