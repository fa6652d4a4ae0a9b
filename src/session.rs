//! The single live session: turns launch events into playlist pushes.
//!
//! A `Session` is created once, after the instance lock is held, and is
//! driven from one thread. The UI only ever receives snapshots from it.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use crate::config::LibrarySettings;
use crate::launch::LaunchTarget;
use crate::library::{self, AudioPath, Playlist};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Unlaunched,
    LockAcquired,
    WindowReady,
    /// At least one playlist has been pushed.
    SessionActive,
    Terminated,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
}

impl WindowState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Minimized => "minimized",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WindowCommand {
    Minimize,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Launch(LaunchTarget),
    /// The UI finished its initial load and can receive pushes.
    UiReady,
    Window(WindowCommand),
    /// Bring the window forward without changing the playlist.
    Raise,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Where the session sends what the UI should show.
pub trait UiSurface {
    fn push_playlist(&self, playlist: &Playlist);
    fn set_window_state(&self, state: WindowState);
    fn raise(&self);
}

pub struct Session<S: UiSurface> {
    surface: S,
    library: LibrarySettings,
    phase: Phase,
    window: WindowState,
    /// Launches that arrived before the UI was ready, oldest first.
    pending: VecDeque<AudioPath>,
}

impl<S: UiSurface> Session<S> {
    /// Only call this once the instance lock is held.
    pub fn new(surface: S, library: LibrarySettings) -> Self {
        Self {
            surface,
            library,
            phase: Phase::LockAcquired,
            window: WindowState::Normal,
            pending: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn window_ready(&self) -> bool {
        matches!(self.phase, Phase::WindowReady | Phase::SessionActive)
    }

    /// Process events until the window closes or every sender is gone.
    pub fn run(&mut self, events: &Receiver<SessionEvent>) {
        while let Ok(event) = events.recv() {
            if self.handle(event) == Flow::Exit {
                break;
            }
        }
        self.phase = Phase::Terminated;
        tracing::info!("session ended");
    }

    pub fn handle(&mut self, event: SessionEvent) -> Flow {
        tracing::debug!(?event, phase = ?self.phase, "session event");
        match event {
            SessionEvent::Launch(target) => self.on_launch(target),
            SessionEvent::UiReady => self.on_ui_ready(),
            SessionEvent::Raise => self.bring_forward(),
            SessionEvent::Window(WindowCommand::Minimize) => {
                self.window = WindowState::Minimized;
                self.surface.set_window_state(self.window);
            }
            SessionEvent::Window(WindowCommand::Close) => {
                self.phase = Phase::Terminated;
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn on_launch(&mut self, target: LaunchTarget) {
        if target.raises_window() {
            self.bring_forward();
        }

        let Some(path) = target.path else {
            return;
        };
        let Some(audio) = library::classify(&path, &self.library) else {
            tracing::debug!("ignoring launch target {}: not audio", path.display());
            return;
        };

        if self.window_ready() {
            self.push(&audio);
        } else {
            tracing::debug!("queueing {} until the UI is ready", audio.as_path().display());
            self.pending.push_back(audio);
        }
    }

    fn on_ui_ready(&mut self) {
        if self.phase == Phase::LockAcquired {
            self.phase = Phase::WindowReady;
            tracing::info!("UI ready");
        }
        while let Some(audio) = self.pending.pop_front() {
            self.push(&audio);
        }
    }

    /// Restore a minimized window and raise it. A window that is not ready
    /// yet is left alone.
    fn bring_forward(&mut self) {
        if !self.window_ready() {
            return;
        }
        if self.window == WindowState::Minimized {
            self.window = WindowState::Normal;
            self.surface.set_window_state(self.window);
        }
        self.surface.raise();
    }

    fn push(&mut self, target: &AudioPath) {
        let playlist = library::build_playlist(target, &self.library);
        match playlist.start_track() {
            Some(start) => tracing::info!("pushing playlist, starting at {}", start.as_path().display()),
            None if playlist.is_empty() => tracing::info!("pushing empty playlist"),
            None => {}
        }
        self.surface.push_playlist(&playlist);
        self.phase = Phase::SessionActive;
    }
}

#[cfg(test)]
pub(crate) mod tests;
