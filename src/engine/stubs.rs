//! Null audio, music and joystick subsystems.
//!
//! The engine probes these optional features at start-up and while running.
//! Every control call succeeds without doing anything and every query reports
//! "nothing there", so the engine always settles on its disabled path.

use std::fmt;

/// "No sound" music device identifier.
pub const NO_MUSIC_DEVICE: i32 = 0;

/// Handle to a playing sound channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundHandle(pub i32);

impl SoundHandle {
    /// Returned when no channel could be started.
    pub const INVALID: SoundHandle = SoundHandle(-1);

    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

/// Handle to a registered song.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SongHandle(pub u32);

/// Sound effect playback.
pub trait SoundDevice: Send {
    fn init(&mut self) {}
    fn shutdown(&mut self) {}
    fn pause(&mut self) {}
    fn resume(&mut self) {}
    fn update(&mut self) {}
    fn set_sfx_volume(&mut self, _volume: i32) {}
    fn precache(&mut self) {}
    /// Lump number for a named effect, `None` when not found.
    fn sfx_lump_num(&self, _name: &str) -> Option<i32> {
        None
    }
    fn start_sound(&mut self, _id: i32, _volume: i32, _separation: i32, _pitch: i32) -> SoundHandle {
        SoundHandle::INVALID
    }
    fn stop_sound(&mut self, _handle: SoundHandle) {}
    fn is_playing(&self, _handle: SoundHandle) -> bool {
        false
    }
    fn update_params(&mut self, _handle: SoundHandle, _volume: i32, _separation: i32, _pitch: i32) {}
}

/// Music playback.
pub trait MusicDevice: Send {
    /// Device identifier the engine reads to pick a music backend.
    fn device_id(&self) -> i32 {
        NO_MUSIC_DEVICE
    }
    fn init(&mut self) {}
    fn shutdown(&mut self) {}
    fn set_volume(&mut self, _volume: i32) {}
    /// Registers song data, `None` when the device cannot play it.
    fn register_song(&mut self, _data: &[u8]) -> Option<SongHandle> {
        None
    }
    fn unregister_song(&mut self, _handle: SongHandle) {}
    fn play_song(&mut self, _handle: SongHandle, _looping: bool) {}
    fn pause_song(&mut self, _handle: SongHandle) {}
    fn resume_song(&mut self, _handle: SongHandle) {}
    fn stop_song(&mut self, _handle: SongHandle) {}
}

/// Joystick input.
pub trait JoystickDevice: Send {
    fn bind_variables(&mut self) {}
    fn init(&mut self) {}
}

/// Sound device that never plays anything.
#[derive(Debug, Default)]
pub struct NullSound;

impl SoundDevice for NullSound {}

/// Music device that accepts no songs.
#[derive(Debug, Default)]
pub struct NullMusic;

impl MusicDevice for NullMusic {}

/// Joystick device with no sticks attached.
#[derive(Debug, Default)]
pub struct NullJoystick;

impl JoystickDevice for NullJoystick {}

/// The optional subsystems handed to the engine.
pub struct Subsystems {
    pub sound: Box<dyn SoundDevice>,
    pub music: Box<dyn MusicDevice>,
    pub joystick: Box<dyn JoystickDevice>,
}

impl Subsystems {
    /// All subsystems disabled.
    pub fn null() -> Self {
        Self {
            sound: Box::new(NullSound),
            music: Box::new(NullMusic),
            joystick: Box::new(NullJoystick),
        }
    }
}

impl Default for Subsystems {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Subsystems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subsystems")
            .field("music_device", &self.music.device_id())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sound_reports_disabled() {
        let mut sound = NullSound;
        sound.init();
        sound.set_sfx_volume(8);
        sound.precache();
        let handle = sound.start_sound(1, 127, 128, 128);
        assert_eq!(handle, SoundHandle::INVALID);
        assert!(!handle.is_valid());
        assert!(!sound.is_playing(handle));
        assert_eq!(sound.sfx_lump_num("dspistol"), None);
        sound.stop_sound(handle);
        sound.shutdown();
    }

    #[test]
    fn null_music_accepts_no_songs() {
        let mut music = NullMusic;
        assert_eq!(music.device_id(), NO_MUSIC_DEVICE);
        music.init();
        assert_eq!(music.register_song(b"MUS\x1a"), None);
        music.play_song(SongHandle(0), true);
        music.stop_song(SongHandle(0));
        music.shutdown();
    }

    #[test]
    fn null_subsystems_are_boxed_stubs() {
        let mut subsystems = Subsystems::null();
        subsystems.joystick.bind_variables();
        subsystems.joystick.init();
        assert_eq!(subsystems.sound.start_sound(0, 0, 0, 0), SoundHandle::INVALID);
        assert_eq!(subsystems.music.device_id(), NO_MUSIC_DEVICE);
    }
}
