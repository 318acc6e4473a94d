//! Pronunciation
//!
//! Speech is a fire-and-forget capability. Callers never see a failure; a
//! missing backend is logged once and every later request is dropped.

use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::{Result, VocabError};

/// Something that can read text aloud
pub trait Speaker {
    /// Request pronunciation of `text` in `language` (a BCP 47 tag such as
    /// `de-DE`). Must return promptly and must not fail.
    fn pronounce(&self, text: &str, language: &str);
}

/// Speaker that does nothing, used when speech is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn pronounce(&self, text: &str, _language: &str) {
        debug!(text, "Speech disabled");
    }
}

/// Backends in order of preference
const CANDIDATES: &[Backend] = &[Backend::EspeakNg, Backend::Espeak, Backend::Say];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    EspeakNg,
    Espeak,
    Say,
}

impl Backend {
    fn program(&self) -> &'static str {
        match self {
            Backend::EspeakNg => "espeak-ng",
            Backend::Espeak => "espeak",
            Backend::Say => "say",
        }
    }

    fn command(&self, text: &str, language: &str) -> Command {
        let mut command = Command::new(self.program());
        match self {
            Backend::EspeakNg | Backend::Espeak => {
                command.arg("-v").arg(espeak_voice(language)).arg(text);
            }
            // `say` picks its voice from the system locale
            Backend::Say => {
                command.arg(text);
            }
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

/// espeak voices are lower-case language codes, e.g. `de` for `de-DE`
fn espeak_voice(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or(language)
        .to_lowercase()
}

/// Speaker backed by an external text-to-speech program
#[derive(Debug)]
pub struct CommandSpeaker {
    backend: Backend,
    unavailable: AtomicBool,
}

impl CommandSpeaker {
    /// Pick the first backend found on `PATH`
    pub fn detect() -> Result<Self> {
        let path = std::env::var_os("PATH").unwrap_or_default();
        for backend in CANDIDATES {
            let found = std::env::split_paths(&path).any(|dir| dir.join(backend.program()).is_file());
            if found {
                debug!(program = backend.program(), "Speech backend detected");
                return Ok(Self {
                    backend: *backend,
                    unavailable: AtomicBool::new(false),
                });
            }
        }
        Err(VocabError::SpeechUnavailable(
            "none of espeak-ng, espeak or say found on PATH".to_string(),
        ))
    }
}

impl Speaker for CommandSpeaker {
    fn pronounce(&self, text: &str, language: &str) {
        if self.unavailable.load(Ordering::Relaxed) || text.trim().is_empty() {
            return;
        }
        match self.backend.command(text, language).spawn() {
            // Reap the child off the UI thread
            Ok(mut child) => {
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => {
                warn!(program = self.backend.program(), error = %e, "Speech backend failed, disabling speech");
                self.unavailable.store(true, Ordering::Relaxed);
            }
        }
    }
}

/// Speaker for the given settings, falling back to `NullSpeaker`
pub fn speaker_for(enabled: bool) -> Box<dyn Speaker> {
    if !enabled {
        return Box::new(NullSpeaker);
    }
    match CommandSpeaker::detect() {
        Ok(speaker) => Box::new(speaker),
        Err(e) => {
            warn!(error = %e, "Speech synthesis not supported on this system");
            Box::new(NullSpeaker)
        }
    }
}
