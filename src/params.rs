//! Parameter definitions with documented ranges and defaults.

/// Waveform sampling configuration
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Samples per loudness window (unsigned 8-bit, silence = 128)
    /// 256 samples = 5.8ms @ 44.1kHz, fresh within every display frame
    pub waveform_len: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { waveform_len: 256 }
    }
}

impl SamplerConfig {
    /// Validate configuration (window must be a nonzero power of 2)
    pub fn validate(&self) -> Result<(), String> {
        if !self.waveform_len.is_power_of_two() {
            return Err(format!(
                "Waveform length must be a power of 2, got {}",
                self.waveform_len
            ));
        }
        Ok(())
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (pixels)
    pub window_width: u32,

    /// Initial window height (pixels)
    pub window_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_config_validate() {
        assert!(SamplerConfig::default().validate().is_ok());

        let bad = SamplerConfig { waveform_len: 300 };
        assert!(bad.validate().is_err());

        // is_power_of_two rejects zero, so empty windows are out too
        let zero = SamplerConfig { waveform_len: 0 };
        assert!(zero.validate().is_err());
    }
}
