//! Microphone capture and loudness analysis.
//!
//! The capture callback keeps a fixed-size window of the most recent
//! waveform, stored as unsigned 8-bit samples centered at 128. Each
//! frame the scheduler reduces that window to one loudness scalar:
//! mean absolute deviation from the silence baseline, normalized to
//! [0, 1].

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

use crate::params::SamplerConfig;

/// Silence baseline of the unsigned 8-bit waveform encoding.
const SILENCE: i16 = 128;

/// Most recent waveform window, filled as a ring by the capture
/// callback. `filled` stays false until one full window has arrived.
struct WaveformWindow {
    samples: Vec<u8>,
    write_pos: usize,
    filled: bool,
}

/// Audio input system: owns the capture stream and the shared window
pub struct MicSystem {
    window: Arc<Mutex<WaveformWindow>>,

    /// Capture stream (kept alive)
    _stream: cpal::Stream,
}

impl MicSystem {
    /// Open the default input device and start capturing.
    ///
    /// Failure here (no device, no permission, stream build error) is
    /// non-fatal to the app: the caller keeps ticking without audio.
    pub fn new(config: SamplerConfig) -> Result<Self, String> {
        config
            .validate()
            .map_err(|e| format!("Invalid sampler config: {}", e))?;

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or("No audio input device found")?;

        let stream_config = device
            .default_input_config()
            .map_err(|e| format!("Failed to get input config: {}", e))?;

        println!(
            "Audio in: {} @ {}Hz",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            stream_config.sample_rate().0
        );

        let channels = stream_config.channels() as usize;

        let window = Arc::new(Mutex::new(WaveformWindow {
            samples: vec![SILENCE as u8; config.waveform_len],
            write_pos: 0,
            filled: false,
        }));
        let window_clone = Arc::clone(&window);

        // Capture callback runs on the audio thread; it only touches
        // the shared window, converting channel 0 of each frame to the
        // byte encoding
        let stream = device
            .build_input_stream(
                &stream_config.into(),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let mut win = window_clone.lock().unwrap();
                    let len = win.samples.len();

                    for frame in data.chunks(channels) {
                        let byte = (frame[0].clamp(-1.0, 1.0) * 127.0 + 128.0) as u8;
                        let pos = win.write_pos;
                        win.samples[pos] = byte;
                        win.write_pos = (pos + 1) % len;
                        if win.write_pos == 0 {
                            win.filled = true;
                        }
                    }
                },
                |err| eprintln!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| format!("Failed to build input stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("Failed to start input stream: {}", e))?;

        Ok(Self {
            window,
            _stream: stream,
        })
    }

    /// Instantaneous loudness in [0, 1], or `None` before the first
    /// full waveform window has been captured. A `None` means the
    /// caller skips this tick's amplitude update.
    pub fn sample(&self) -> Option<f32> {
        let win = self.window.lock().unwrap();
        win.filled.then(|| waveform_loudness(&win.samples))
    }
}

/// Mean absolute deviation from the 128 silence baseline, normalized
/// by the maximum possible deviation (128).
pub fn waveform_loudness(samples: &[u8]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let total: u32 = samples
        .iter()
        .map(|&s| (s as i16 - SILENCE).unsigned_abs() as u32)
        .sum();
    total as f32 / samples.len() as f32 / 128.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_is_exactly_zero() {
        let buf = vec![128u8; 256];
        assert_eq!(waveform_loudness(&buf), 0.0);
    }

    #[test]
    fn test_full_swing_approaches_one() {
        // Alternating 0 and 255: deviations 128 and 127, mean 127.5,
        // normalized to 127.5/128
        let buf: Vec<u8> = (0..256).map(|i| if i % 2 == 0 { 0 } else { 255 }).collect();
        assert!((waveform_loudness(&buf) - 0.99609375).abs() < 1e-6);
    }

    #[test]
    fn test_half_swing() {
        // Constant 192: deviation 64, normalized to 0.5
        let buf = vec![192u8; 256];
        assert_eq!(waveform_loudness(&buf), 0.5);
    }

    #[test]
    fn test_empty_window() {
        assert_eq!(waveform_loudness(&[]), 0.0);
    }
}
