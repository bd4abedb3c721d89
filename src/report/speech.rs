use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

/// Best-effort spoken alerts. Implementations never fail the caller.
pub(crate) trait Speaker {
    fn speak(&mut self, text: &str);
}

/// Speech turned off, or no speech support on this machine.
pub(crate) struct MutedSpeaker;

impl Speaker for MutedSpeaker {
    fn speak(&mut self, _text: &str) {}
}

/// Candidate synthesizers with the arguments that select an Italian voice.
const ENGINES: &[(&str, &[&str])] = &[
    ("espeak-ng", &["-v", "it"]),
    ("espeak", &["-v", "it"]),
    ("say", &["-v", "Alice"]),
];

/// Speaks through the first text-to-speech program found on `PATH`.
pub(crate) struct SystemSpeaker {
    engine: Option<(PathBuf, &'static [&'static str])>,
    current: Option<Child>,
}

impl SystemSpeaker {
    pub(crate) fn detect() -> Self {
        let engine = ENGINES
            .iter()
            .find_map(|(name, args)| find_in_path(name).map(|p| (p, *args)));
        match &engine {
            Some((path, _)) => tracing::info!(engine = %path.display(), "speech enabled"),
            None => tracing::info!("no speech engine found, alerts will be silent"),
        }
        Self {
            engine,
            current: None,
        }
    }

    pub(crate) fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    /// Interrupt an utterance that is still playing.
    fn stop_current(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

impl Speaker for SystemSpeaker {
    fn speak(&mut self, text: &str) {
        self.stop_current();
        let Some((program, args)) = &self.engine else {
            return;
        };
        match Command::new(program)
            .args(*args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => self.current = Some(child),
            Err(e) => tracing::warn!(error = %e, "speech engine failed to start"),
        }
    }
}

impl Drop for SystemSpeaker {
    fn drop(&mut self) {
        // Let the last alert finish; only reap it if it already has.
        if let Some(child) = self.current.as_mut() {
            let _ = child.try_wait();
        }
    }
}

fn find_in_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
