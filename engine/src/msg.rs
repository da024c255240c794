//! Emitting instant event cues to the UI and audio layers.

use std::sync::{
    mpsc::{self, Sender},
    LazyLock, Mutex,
};

use glam::IVec2;

/// Interface for receiving fire-and-forget game event cues.
///
/// The core never waits on these; when no receiver is attached the events
/// are silently dropped.
pub enum Msg {
    /// Text message for out-of-band display.
    Message(String),

    /// A fireball explodes.
    Explosion(IVec2),

    /// A pick chews through a wall.
    Dig(IVec2),

    /// A melee attack connects.
    Hit(IVec2),

    /// Player enters a boss level, play the entry stinger and theme.
    BossLevel,
}

static RCV: LazyLock<Mutex<Option<Sender<Msg>>>> =
    LazyLock::new(Default::default);

pub struct Receiver(mpsc::Receiver<Msg>);

impl Default for Receiver {
    fn default() -> Self {
        let (send, recv) = mpsc::channel();
        *RCV.lock().unwrap() = Some(send);
        Receiver(recv)
    }
}

impl Receiver {
    /// Drain all pending events.
    pub fn drain(&self) -> impl Iterator<Item = Msg> + '_ {
        self.0.try_iter()
    }
}

pub fn send_msg(msg: Msg) {
    if let Some(ref mut sender) = *RCV.lock().unwrap() {
        // A dead receiver is the same as no receiver.
        let _ = sender.send(msg);
    }
}
