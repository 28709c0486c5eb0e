//! File-backed sample source decoded with Symphonia.

use log::warn;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::{AudioProvider, MemoryProvider, ProviderError, SourceSpec};

/// A provider holding the fully decoded contents of an audio file.
///
/// Decoding happens once at construction; `fill_buffer` reads are plain
/// memory copies afterwards.
pub struct FileProvider {
    inner: MemoryProvider,
}

impl FileProvider {
    /// Open and decode `path` into memory.
    pub fn open(path: &str) -> Result<Self, ProviderError> {
        let src = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(src), Default::default());

        let mut hint = Hint::new();
        if let Some(extension) = std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            hint.with_extension(extension);
        }

        let meta_opts: MetadataOptions = Default::default();
        let fmt_opts: FormatOptions = Default::default();
        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &fmt_opts, &meta_opts)
            .map_err(|err| ProviderError::UnsupportedFormat(err.to_string()))?;
        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| {
                ProviderError::UnsupportedFormat("no supported audio tracks".to_string())
            })?;
        let track_id = track.id;
        let sample_rate = track.codec_params.sample_rate.ok_or_else(|| {
            ProviderError::Decode("missing sample rate in codec params".to_string())
        })?;

        let dec_opts: DecoderOptions = Default::default();
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &dec_opts)
            .map_err(|err| ProviderError::UnsupportedFormat(err.to_string()))?;

        let mut channels = track.codec_params.channels.map(|c| c.count() as u16);
        let mut samples: Vec<f32> = Vec::new();
        let mut sample_buf: Option<SampleBuffer<f32>> = None;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(Error::IoError(err)) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
                    break;
                }
                Err(err) => return Err(ProviderError::Decode(err.to_string())),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    if sample_buf.is_none() {
                        let decoded_spec = *decoded.spec();
                        channels.get_or_insert(decoded_spec.channels.count() as u16);
                        sample_buf =
                            Some(SampleBuffer::new(decoded.capacity() as u64, decoded_spec));
                    }
                    if let Some(buf) = sample_buf.as_mut() {
                        buf.copy_interleaved_ref(decoded);
                        samples.extend_from_slice(buf.samples());
                    }
                }
                Err(Error::DecodeError(err)) => {
                    warn!("decode error: {}", err);
                }
                Err(err) => return Err(ProviderError::Decode(err.to_string())),
            }
        }

        let channels = channels.unwrap_or(1).max(1);
        let spec = SourceSpec {
            sample_rate,
            channels,
        };
        Ok(Self {
            inner: MemoryProvider::new(spec, samples),
        })
    }
}

impl AudioProvider for FileProvider {
    fn spec(&self) -> SourceSpec {
        self.inner.spec()
    }

    fn len_samples(&self) -> u64 {
        self.inner.len_samples()
    }

    fn fill_buffer(&self, dest: &mut [f32], start: u64, samples: u64) -> u64 {
        self.inner.fill_buffer(dest, start, samples)
    }
}
