//! One-shot preview playback on the default output device

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    Finished,
    Error(String),
}

/// Walks a mono buffer at the device rate, interpolating between samples
#[derive(Debug, Clone)]
pub struct PlaybackCursor {
    samples: Vec<f32>,
    position: f64,
    step: f64,
}

impl PlaybackCursor {
    pub fn new(samples: Vec<f32>, source_rate: u32, device_rate: u32) -> Self {
        let step = if device_rate == 0 {
            1.0
        } else {
            source_rate as f64 / device_rate as f64
        };
        Self { samples, position: 0.0, step }
    }

    pub fn next_sample(&mut self) -> Option<f32> {
        let index = self.position as usize;
        let current = *self.samples.get(index)?;
        let next = self.samples.get(index + 1).copied().unwrap_or(current);
        let frac = (self.position - index as f64) as f32;
        self.position += self.step;
        Some(current + (next - current) * frac)
    }

    pub fn is_finished(&self) -> bool {
        self.position as usize >= self.samples.len()
    }

    /// Length of the buffer in seconds of source audio
    pub fn duration(&self, source_rate: u32) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / source_rate.max(1) as f64)
    }
}

pub struct PreviewPlayer {
    stream: Option<Stream>,
    sender: Sender<PlaybackEvent>,
    events: Receiver<PlaybackEvent>,
}

impl Default for PreviewPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewPlayer {
    pub fn new() -> Self {
        let (sender, events) = unbounded();
        Self { stream: None, sender, events }
    }

    /// Start playing `samples` once; replaces anything already playing
    pub fn play(&mut self, samples: Vec<f32>, sample_rate: u32) -> Result<()> {
        self.stop();
        while self.events.try_recv().is_ok() {}

        let host = cpal::default_host();
        log::debug!("Using audio host: {}", host.id().name());

        let device = host.default_output_device()
            .ok_or_else(|| anyhow::anyhow!("No output device available"))?;
        log::debug!("Using output device: {:?}", device.name());

        let supported = device.default_output_config()?;
        log::debug!("Device config: {:?}", supported);

        let sample_format = supported.sample_format();
        let config = cpal::StreamConfig::from(supported);
        let cursor = PlaybackCursor::new(samples, sample_rate, config.sample_rate.0);

        let stream = match sample_format {
            SampleFormat::F32 => create_stream::<f32>(&device, &config, cursor, self.sender.clone()),
            SampleFormat::I16 => create_stream::<i16>(&device, &config, cursor, self.sender.clone()),
            SampleFormat::U16 => create_stream::<u16>(&device, &config, cursor, self.sender.clone()),
            other => anyhow::bail!("Unsupported sample format {:?}", other),
        }?;

        stream.play()?;
        self.stream = Some(stream);
        Ok(())
    }

    pub fn stop(&mut self) {
        self.stream = None;
    }

    pub fn is_playing(&self) -> bool {
        self.stream.is_some()
    }

    /// Handle events from the audio thread; returns the last one seen
    pub fn poll(&mut self) -> Option<PlaybackEvent> {
        let mut last = None;
        while let Ok(event) = self.events.try_recv() {
            self.stream = None;
            last = Some(event);
        }
        last
    }

    /// Block until the current buffer has played out
    pub fn wait(&mut self, timeout: Duration) -> Result<()> {
        if self.stream.is_none() {
            return Ok(());
        }
        let event = self.events.recv_timeout(timeout);
        self.stream = None;
        match event {
            Ok(PlaybackEvent::Finished) => Ok(()),
            Ok(PlaybackEvent::Error(e)) => anyhow::bail!("playback failed: {}", e),
            Err(_) => anyhow::bail!("playback did not finish within {:?}", timeout),
        }
    }
}

fn create_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut cursor: PlaybackCursor,
    events: Sender<PlaybackEvent>,
) -> Result<Stream>
where
    T: cpal::SizedSample + cpal::FromSample<f32> + Send + 'static,
{
    let channels = config.channels as usize;
    let error_events = events.clone();
    let err_fn = move |err: cpal::StreamError| {
        log::error!("an error occurred on the audio stream: {}", err);
        error_events.send(PlaybackEvent::Error(err.to_string())).ok();
    };
    let mut reported = false;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let value = T::from_sample(cursor.next_sample().unwrap_or(0.0));
                for sample in frame.iter_mut() {
                    *sample = value;
                }
            }
            if cursor.is_finished() && !reported {
                reported = true;
                events.send(PlaybackEvent::Finished).ok();
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
