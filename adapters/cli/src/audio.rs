use anyhow::Result;
use pirate_flow_core::AudioCue;
use pirate_flow_rendering::AudioBackend;
use tracing::info;

/// Audio sink for headless sessions: cues are logged instead of played.
#[derive(Debug, Default)]
pub(crate) struct LoggingAudio {
    played: u64,
}

impl LoggingAudio {
    pub(crate) fn played(&self) -> u64 {
        self.played
    }
}

impl AudioBackend for LoggingAudio {
    fn play(&mut self, cue: AudioCue) -> Result<()> {
        self.played += 1;
        info!(?cue, "audio_cue");
        Ok(())
    }
}
