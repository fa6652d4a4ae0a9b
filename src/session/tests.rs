use super::*;
use crate::launch::{LaunchOrigin, LaunchTarget};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Pushed {
    Playlist(Vec<PathBuf>, usize),
    Window(WindowState),
    Raise,
}

/// Records everything the session sends to the UI.
#[derive(Clone, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) log: Arc<Mutex<Vec<Pushed>>>,
}

impl RecordingSurface {
    pub(crate) fn take(&self) -> Vec<Pushed> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }

    pub(crate) fn playlists(&self) -> Vec<(Vec<PathBuf>, usize)> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter_map(|p| match p {
                Pushed::Playlist(tracks, start) => Some((tracks.clone(), *start)),
                _ => None,
            })
            .collect()
    }
}

impl UiSurface for RecordingSurface {
    fn push_playlist(&self, playlist: &Playlist) {
        let tracks = playlist
            .tracks
            .iter()
            .map(|t| t.as_path().to_path_buf())
            .collect();
        self.log
            .lock()
            .unwrap()
            .push(Pushed::Playlist(tracks, playlist.start_index));
    }

    fn set_window_state(&self, state: WindowState) {
        self.log.lock().unwrap().push(Pushed::Window(state));
    }

    fn raise(&self) {
        self.log.lock().unwrap().push(Pushed::Raise);
    }
}

fn album(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"x").unwrap();
    }
}

fn startup(path: &Path) -> SessionEvent {
    SessionEvent::Launch(LaunchTarget::from_args(
        LaunchOrigin::Startup,
        &["cadenza".to_string(), path.display().to_string()],
    ))
}

fn second_instance(path: &Path) -> SessionEvent {
    SessionEvent::Launch(LaunchTarget::from_args(
        LaunchOrigin::SecondInstance,
        &["cadenza".to_string(), path.display().to_string()],
    ))
}

fn new_session() -> (Session<RecordingSurface>, RecordingSurface) {
    let surface = RecordingSurface::default();
    let session = Session::new(surface.clone(), LibrarySettings::default());
    (session, surface)
}

#[test]
fn startup_target_is_held_until_ui_ready() {
    let dir = tempdir().unwrap();
    album(dir.path(), &["a.mp3", "b.mp3"]);
    let (mut session, surface) = new_session();
    assert_eq!(session.phase(), Phase::LockAcquired);

    session.handle(startup(&dir.path().join("b.mp3")));
    assert!(surface.take().is_empty());
    assert_eq!(session.phase(), Phase::LockAcquired);

    session.handle(SessionEvent::UiReady);
    let pushed = surface.playlists();
    assert_eq!(pushed.len(), 1);
    let (tracks, start) = &pushed[0];
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[*start], dir.path().join("b.mp3"));
    assert_eq!(session.phase(), Phase::SessionActive);
}

#[test]
fn startup_without_audio_target_pushes_nothing() {
    let dir = tempdir().unwrap();
    album(dir.path(), &["notes.txt"]);
    let (mut session, surface) = new_session();

    session.handle(SessionEvent::Launch(LaunchTarget::from_args(
        LaunchOrigin::Startup,
        &["cadenza"],
    )));
    session.handle(startup(&dir.path().join("notes.txt")));
    session.handle(SessionEvent::UiReady);

    assert!(surface.take().is_empty());
    assert_eq!(session.phase(), Phase::WindowReady);
}

#[test]
fn queued_launches_flush_in_arrival_order() {
    let one = tempdir().unwrap();
    let two = tempdir().unwrap();
    album(one.path(), &["a.mp3"]);
    album(two.path(), &["z.flac"]);
    let (mut session, surface) = new_session();

    session.handle(startup(&one.path().join("a.mp3")));
    session.handle(SessionEvent::Launch(LaunchTarget::from_open_file(
        two.path().join("z.flac"),
    )));
    session.handle(SessionEvent::UiReady);

    let pushed = surface.playlists();
    assert_eq!(pushed.len(), 2);
    assert_eq!(pushed[0].0, vec![one.path().join("a.mp3")]);
    assert_eq!(pushed[1].0, vec![two.path().join("z.flac")]);
}

#[test]
fn each_later_launch_pushes_once_and_replaces_the_playlist() {
    let one = tempdir().unwrap();
    let two = tempdir().unwrap();
    album(one.path(), &["a.mp3"]);
    album(two.path(), &["x.ogg", "y.ogg"]);
    let (mut session, surface) = new_session();
    session.handle(SessionEvent::UiReady);
    session.handle(startup(&one.path().join("a.mp3")));
    surface.take();

    session.handle(second_instance(&two.path().join("y.ogg")));
    let log = surface.take();
    let playlists: Vec<_> = log
        .iter()
        .filter(|p| matches!(p, Pushed::Playlist(..)))
        .collect();
    assert_eq!(playlists.len(), 1);
    assert!(log.contains(&Pushed::Raise));
    assert_eq!(session.phase(), Phase::SessionActive);
}

#[test]
fn second_instance_restores_minimized_window_even_without_audio() {
    let dir = tempdir().unwrap();
    album(dir.path(), &["cover.jpg"]);
    let (mut session, surface) = new_session();
    session.handle(SessionEvent::UiReady);

    session.handle(SessionEvent::Window(WindowCommand::Minimize));
    assert_eq!(surface.take(), vec![Pushed::Window(WindowState::Minimized)]);

    session.handle(second_instance(&dir.path().join("cover.jpg")));
    assert_eq!(
        surface.take(),
        vec![Pushed::Window(WindowState::Normal), Pushed::Raise]
    );
}

#[test]
fn raise_before_ui_ready_is_ignored() {
    let (mut session, surface) = new_session();
    session.handle(SessionEvent::Raise);
    assert!(surface.take().is_empty());

    session.handle(SessionEvent::UiReady);
    session.handle(SessionEvent::Raise);
    assert_eq!(surface.take(), vec![Pushed::Raise]);
}

#[test]
fn close_terminates_the_run_loop() {
    let dir = tempdir().unwrap();
    album(dir.path(), &["a.wav"]);
    let (mut session, surface) = new_session();
    let (tx, rx) = mpsc::channel();

    tx.send(startup(&dir.path().join("a.wav"))).unwrap();
    tx.send(SessionEvent::UiReady).unwrap();
    tx.send(SessionEvent::Window(WindowCommand::Close)).unwrap();
    tx.send(SessionEvent::UiReady).unwrap();

    session.run(&rx);
    assert_eq!(session.phase(), Phase::Terminated);
    assert_eq!(surface.playlists().len(), 1);
    // The event after `Close` was never consumed.
    assert_eq!(rx.try_recv(), Ok(SessionEvent::UiReady));
}

#[test]
fn run_ends_when_all_senders_are_gone() {
    let (mut session, _surface) = new_session();
    let (tx, rx) = mpsc::channel();
    tx.send(SessionEvent::UiReady).unwrap();
    drop(tx);

    session.run(&rx);
    assert_eq!(session.phase(), Phase::Terminated);
}
