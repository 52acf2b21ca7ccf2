//! Audio file decoding

pub mod decoder;

pub use decoder::{load_audio_file, AudioData, DecodeError};
