//! Audio file decoding with symphonia
//!
//! Resolves a path into a flat interleaved f32 sample sequence

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

/// Extensions the decoder accepts; anything else is rejected before the file
/// is opened.
const SUPPORTED_EXTENSIONS: [&str; 2] = ["wav", "mp3"];

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported extension: {0}")]
    UnsupportedExtension(String),

    #[error("Failed to open file: {0}")]
    Open(#[from] std::io::Error),

    #[error("Failed to probe container: {0}")]
    Probe(String),

    #[error("No decodable audio track found")]
    NoTrack,

    #[error("Stream does not declare a sample rate")]
    MissingSampleRate,

    #[error("Failed to create decoder: {0}")]
    Codec(String),

    #[error("Failed to decode stream: {0}")]
    Decode(String),
}

/// Decoded audio, interleaved by channel.
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Samples in [-1.0, 1.0], channel-interleaved
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u32,
}

impl AudioData {
    /// Duration in seconds of the interleaved sample sequence
    pub fn duration_secs(&self) -> f64 {
        if self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.channels as f64 * self.sample_rate as f64)
    }
}

/// Decode the audio file at `path` into interleaved f32 samples.
///
/// The container format is selected by extension sniffing: only `wav` and
/// `mp3` are accepted. All samples are converted to f32 regardless of the
/// stored bit depth; channels are left interleaved.
pub fn load_audio_file(path: &Path) -> Result<AudioData, DecodeError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(DecodeError::UnsupportedExtension(extension));
    }

    let file = File::open(path)?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(&extension);

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::Probe(e.to_string()))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::MissingSampleRate)?;
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u32)
        .unwrap_or(0);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::Codec(e.to_string()))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            // End of stream surfaces as an I/O error.
            Err(SymphoniaError::IoError(_)) => break,
            Err(e) => return Err(DecodeError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // Recoverable corruption: skip the packet.
            Err(SymphoniaError::DecodeError(e)) => {
                log::warn!("Skipping undecodable packet: {}", e);
                continue;
            }
            Err(e) => return Err(DecodeError::Decode(e.to_string())),
        };

        let spec = *decoded.spec();
        let capacity = decoded.capacity() as u64;
        channels = spec.channels.count() as u32;

        let buf = sample_buf.get_or_insert_with(|| SampleBuffer::new(capacity, spec));
        buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buf.samples());
    }

    log::debug!(
        "Decoded {}: {} samples, {} Hz, {} channel(s)",
        path.display(),
        samples.len(),
        sample_rate,
        channels
    );

    Ok(AudioData {
        samples,
        sample_rate,
        channels,
    })
}
