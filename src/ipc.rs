//! The bus interface the UI process talks to.
//!
//! Replies are `a{sv}` dictionaries where an absent key means "no value" and
//! an empty dictionary is the absent result. No request fails with a bus
//! error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use async_io::block_on;
use zbus::object_server::SignalEmitter;
use zbus::{Connection, interface};
use zvariant::{OwnedValue, Value};

use crate::config::LibrarySettings;
use crate::instance::BusHost;
use crate::library::Playlist;
use crate::metadata::{self, TagResult};
use crate::session::{SessionEvent, UiSurface, WindowCommand, WindowState};
use crate::track::{self, TrackPayload};

pub struct UiIface {
    events: Sender<SessionEvent>,
    library: LibrarySettings,
}

impl UiIface {
    pub fn new(events: Sender<SessionEvent>, library: LibrarySettings) -> Self {
        Self { events, library }
    }
}

#[interface(name = "org.cadenza.Player.Ui")]
impl UiIface {
    /// The UI finished loading and wants playlist pushes.
    fn ready(&self) {
        let _ = self.events.send(SessionEvent::UiReady);
    }

    fn load_track(&self, path: String) -> HashMap<String, OwnedValue> {
        track_dict(track::resolve_track(Path::new(&path), &self.library).as_ref())
    }

    async fn read_tags(&self, path: String) -> HashMap<String, OwnedValue> {
        tags_dict(&metadata::read_tags(PathBuf::from(path)).await)
    }

    fn minimize(&self) {
        let _ = self
            .events
            .send(SessionEvent::Window(WindowCommand::Minimize));
    }

    fn close(&self) {
        let _ = self.events.send(SessionEvent::Window(WindowCommand::Close));
    }

    #[zbus(signal)]
    async fn playlist_updated(
        emitter: &SignalEmitter<'_>,
        playlist: Vec<String>,
        start_index: u32,
    ) -> zbus::Result<()>;

    #[zbus(signal)]
    async fn window_state_changed(emitter: &SignalEmitter<'_>, state: &str) -> zbus::Result<()>;

    #[zbus(signal)]
    async fn raise(emitter: &SignalEmitter<'_>) -> zbus::Result<()>;
}

fn insert<'a>(dict: &mut HashMap<String, OwnedValue>, key: &str, value: impl Into<Value<'a>>) {
    if let Ok(v) = OwnedValue::try_from(value.into()) {
        dict.insert(key.to_string(), v);
    }
}

pub(crate) fn track_dict(payload: Option<&TrackPayload>) -> HashMap<String, OwnedValue> {
    let mut dict = HashMap::new();
    let Some(payload) = payload else {
        return dict;
    };

    insert(&mut dict, "src", payload.src.as_str());
    insert(&mut dict, "name", payload.name.as_str());
    if let Some(lyrics) = &payload.lyrics {
        insert(&mut dict, "lyrics", lyrics.as_str());
    }
    dict
}

pub(crate) fn tags_dict(result: &TagResult) -> HashMap<String, OwnedValue> {
    let mut dict = HashMap::new();
    let Some(bundle) = result.bundle() else {
        return dict;
    };

    for (key, value) in [
        ("title", &bundle.title),
        ("artist", &bundle.artist),
        ("album", &bundle.album),
    ] {
        if let Some(v) = value {
            insert(&mut dict, key, v.as_str());
        }
    }
    if let Some(picture) = &bundle.picture {
        insert(&mut dict, "picture", picture.data.clone());
        if let Some(mime) = &picture.mime_type {
            insert(&mut dict, "picture-mime", mime.as_str());
        }
    }
    dict
}

/// Track paths as sent in `PlaylistUpdated`, with the start index pointing
/// into that list.
///
/// Paths that are not valid UTF-8 can't be named in an `as` and are left out
/// rather than sent mangled. The start index falls back to 0 if the start
/// track itself was left out.
pub(crate) fn playlist_wire(playlist: &Playlist) -> (Vec<String>, u32) {
    let mut tracks = Vec::with_capacity(playlist.len());
    let mut start = None;
    for (i, track) in playlist.tracks.iter().enumerate() {
        let Some(path) = track.as_path().to_str() else {
            tracing::warn!("leaving non UTF-8 path {:?} out of the playlist", track.as_path());
            continue;
        };
        if i == playlist.start_index {
            start = Some(tracks.len());
        }
        tracks.push(path.to_string());
    }
    let start = start.and_then(|s| u32::try_from(s).ok()).unwrap_or(0);
    (tracks, start)
}

/// Register the UI interface next to the instance interfaces and return the
/// surface that emits its signals.
pub fn serve(
    host: &BusHost,
    events: Sender<SessionEvent>,
    library: LibrarySettings,
) -> zbus::Result<BusSurface> {
    block_on(
        host.connection()
            .object_server()
            .at(host.path(), UiIface::new(events, library)),
    )?;

    Ok(BusSurface {
        connection: host.connection().clone(),
        path: host.path().to_string(),
    })
}

/// [`UiSurface`] that broadcasts `org.cadenza.Player.Ui` signals.
pub struct BusSurface {
    connection: Connection,
    path: String,
}

impl BusSurface {
    fn emitter(&self) -> zbus::Result<SignalEmitter<'_>> {
        SignalEmitter::new(&self.connection, self.path.as_str())
    }
}

fn log_emit(signal: &str, result: zbus::Result<()>) {
    if let Err(e) = result {
        tracing::warn!("failed to emit {signal}: {e}");
    }
}

impl UiSurface for BusSurface {
    fn push_playlist(&self, playlist: &Playlist) {
        let (tracks, start) = playlist_wire(playlist);
        let result = self
            .emitter()
            .and_then(|e| block_on(UiIface::playlist_updated(&e, tracks, start)));
        log_emit("PlaylistUpdated", result);
    }

    fn set_window_state(&self, state: WindowState) {
        let result = self
            .emitter()
            .and_then(|e| block_on(UiIface::window_state_changed(&e, state.as_str())));
        log_emit("WindowStateChanged", result);
    }

    fn raise(&self) {
        let result = self.emitter().and_then(|e| block_on(UiIface::raise(&e)));
        log_emit("Raise", result);
    }
}
