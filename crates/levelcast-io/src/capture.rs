//! Audio capture level source via cpal.
//!
//! The input callback folds each buffer into a per-channel peak held in an
//! atomic. Reading a level takes the held peak and resets it, so every read
//! reports the loudest sample since the previous read of that channel.
//!
//! Non-negative `f32` values order the same as their bit patterns, which lets
//! the callback use `fetch_max` on the raw bits.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, Stream};
use levelcast_core::{LevelKind, LevelSource};

use crate::{Error, Result};

const KINDS: usize = 4;

/// Extract device name via `description()` (cpal 0.17+).
fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Capture device information.
#[derive(Debug, Clone)]
pub struct CaptureDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default input channel count.
    pub channels: u16,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Whether this is the host's default input.
    pub is_default: bool,
}

/// List all capture devices. Inputs without channels are skipped.
pub fn list_devices() -> Result<Vec<CaptureDevice>> {
    let host = cpal::default_host();
    let default_name = host.default_input_device().and_then(|d| device_name(&d).ok());

    let inputs = host.input_devices().map_err(|e| Error::Stream(e.to_string()))?;
    let devices = inputs
        .filter_map(|device| {
            let name = device_name(&device).ok()?;
            let config = device.default_input_config().ok().filter(|c| c.channels() > 0)?;
            Some(CaptureDevice {
                is_default: default_name.as_deref() == Some(name.as_str()),
                name,
                channels: config.channels(),
                default_sample_rate: config.sample_rate(),
            })
        })
        .collect();

    Ok(devices)
}

/// Level source reading peaks from an audio input device.
///
/// Hardware channel `n` is interleaved channel `n` of the device. Every
/// [`LevelKind`] reads the same signal but keeps its own peak hold, so a
/// strip and a bus that share a channel index both see the peak.
pub struct CaptureSource {
    device: Option<String>,
    stream: Option<Stream>,
    peaks: Arc<[AtomicU32]>,
    channels: usize,
}

impl CaptureSource {
    /// Creates a source for the default input device.
    pub fn new() -> Self {
        Self {
            device: None,
            stream: None,
            peaks: Arc::from(Vec::new()),
            channels: 0,
        }
    }

    /// Creates a source for a device chosen by index, exact name, or partial name.
    pub fn with_device(name_or_index: impl Into<String>) -> Self {
        Self {
            device: Some(name_or_index.into()),
            ..Self::new()
        }
    }

    /// Channels of the opened device, or 0 when closed.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns true while a stream is running.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn find_device(&self) -> Result<Device> {
        let host = cpal::default_host();
        match &self.device {
            None => host.default_input_device().ok_or(Error::NoDevice),
            Some(search) => {
                // Same filter as `list_devices` so printed indices line up
                let devices: Vec<Device> = host
                    .input_devices()
                    .map_err(|e| Error::Stream(e.to_string()))?
                    .filter(|d| d.default_input_config().is_ok_and(|c| c.channels() > 0))
                    .collect();
                find_device_from_list(&devices, search)
            }
        }
    }
}

impl Default for CaptureSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CaptureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSource")
            .field("device", &self.device)
            .field("open", &self.is_open())
            .field("channels", &self.channels)
            .finish()
    }
}

impl LevelSource for CaptureSource {
    type Error = Error;

    fn open(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Ok(());
        }

        let device = self.find_device()?;
        let supported = device
            .default_input_config()
            .map_err(|e| Error::Stream(e.to_string()))?;
        let channels = usize::from(supported.channels());
        let format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let peaks: Arc<[AtomicU32]> = (0..channels * KINDS).map(|_| AtomicU32::new(0)).collect();

        let shared = Arc::clone(&peaks);
        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, shared, channels),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, shared, channels),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, shared, channels),
            SampleFormat::I32 => build_stream::<i32>(&device, &config, shared, channels),
            other => return Err(Error::UnsupportedFormat(format!("{other:?}"))),
        }?;
        stream.play().map_err(|e| Error::Stream(e.to_string()))?;

        let name = device_name(&device).unwrap_or_default();
        tracing::info!(
            device = %name,
            channels,
            sample_rate = config.sample_rate,
            "capture stream started"
        );

        self.stream = Some(stream);
        self.peaks = peaks;
        self.channels = channels;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            let paused = stream.pause().map_err(|e| Error::Stream(e.to_string()));
            drop(stream);
            self.channels = 0;
            paused?;
        }
        Ok(())
    }

    fn read_level(&mut self, kind: LevelKind, channel: usize) -> Result<f32> {
        if self.stream.is_none() {
            return Err(Error::NotOpen);
        }
        if channel >= self.channels {
            return Err(Error::ChannelOutOfRange {
                channel,
                channels: self.channels,
            });
        }
        let index = kind.code() as usize * self.channels + channel;
        let bits = self.peaks[index].swap(0, Ordering::Relaxed);
        Ok(f32::from_bits(bits))
    }
}

fn build_stream<T>(
    device: &Device,
    config: &cpal::StreamConfig,
    peaks: Arc<[AtomicU32]>,
    channels: usize,
) -> Result<Stream>
where
    T: SizedSample + Send + 'static,
    f32: FromSample<T>,
{
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                fold_peaks(data, channels, &peaks);
            },
            |err| tracing::warn!(error = %err, "capture stream error"),
            None,
        )
        .map_err(|e| Error::Stream(e.to_string()))
}

/// Raises each channel's held peak to the loudest sample in `data`.
fn fold_peaks<T>(data: &[T], channels: usize, peaks: &[AtomicU32])
where
    T: Sample,
    f32: FromSample<T>,
{
    if channels == 0 {
        return;
    }
    for channel in 0..channels {
        let peak = data
            .iter()
            .skip(channel)
            .step_by(channels)
            .map(|&s| f32::from_sample(s).abs())
            .fold(0.0f32, f32::max);
        if peak > 0.0 && peak.is_finite() {
            for kind in 0..KINDS {
                peaks[kind * channels + channel].fetch_max(peak.to_bits(), Ordering::Relaxed);
            }
        }
    }
}

/// Find a device from a list by index, exact name, or fuzzy match.
fn find_device_from_list(devices: &[Device], name_or_index: &str) -> Result<Device> {
    if let Ok(index) = name_or_index.parse::<usize>() {
        return devices.get(index).cloned().ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "input device index {index} (only {} devices available)",
                devices.len()
            ))
        });
    }

    if let Some(device) = devices
        .iter()
        .find(|d| device_name(d).is_ok_and(|n| n == name_or_index))
    {
        return Ok(device.clone());
    }

    let search_lower = name_or_index.to_lowercase();
    let mut matches: Vec<(Device, String)> = devices
        .iter()
        .filter_map(|d| {
            device_name(d)
                .ok()
                .filter(|name| name.to_lowercase().contains(&search_lower))
                .map(|name| (d.clone(), name))
        })
        .collect();

    match matches.len() {
        0 => Err(Error::DeviceNotFound(format!(
            "no input device matching '{name_or_index}'"
        ))),
        1 => Ok(matches.remove(0).0),
        _ => {
            let names: Vec<&str> = matches.iter().map(|(_, n)| n.as_str()).collect();
            tracing::warn!(
                search = name_or_index,
                ?names,
                "multiple input devices match, using the first"
            );
            Ok(matches.remove(0).0)
        }
    }
}
