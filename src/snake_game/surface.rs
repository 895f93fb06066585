//! What the game needs from the outside world to be seen and heard.
//!
//! The game only ever draws into a [`Surface`] and makes noise through a
//! [`Mixer`]. The engine front end implements both with [`FrameRecorder`] and
//! [`CueRecorder`], then turns the recordings into sprites and audio; tests use
//! the same recorders to see exactly what a tick produced.

use serde::{Serialize, Deserialize};

use super::grid::Position;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum Graphic {
    Background,
    Apple,
    Block,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub enum Sound {
    Eat,
    Collision,
}

/// A single line of white text, anchored at its top-left corner.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TextLine {
    pub text: String,
    pub at: Position,
    pub font_size: f32,
}

impl TextLine {
    pub fn new(text: impl Into<String>, at: Position, font_size: f32) -> Self {
        Self { text: text.into(), at, font_size }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub enum DrawCommand {
    Blit(Graphic, Position),
    Text(TextLine),
}

pub trait Surface {
    fn blit(&mut self, graphic: Graphic, at: Position);
    fn text(&mut self, line: TextLine);
    /// Make everything drawn since the last flip visible.
    fn flip(&mut self);
}

pub trait Mixer {
    fn play_music(&mut self);
    fn pause_music(&mut self);
    fn unpause_music(&mut self);
    fn play_sound(&mut self, sound: Sound);
}

/// Collects draw calls until [`Surface::flip`], which hands them over as one
/// presented frame.
#[derive(Default, Debug)]
pub struct FrameRecorder {
    drawing: Vec<DrawCommand>,
    presented: Vec<Vec<DrawCommand>>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames flipped since the last call, oldest first.
    pub fn take_presented(&mut self) -> Vec<Vec<DrawCommand>> {
        std::mem::take(&mut self.presented)
    }

    /// Draw calls not yet flipped.
    pub fn pending(&self) -> &[DrawCommand] {
        &self.drawing
    }
}

impl Surface for FrameRecorder {
    fn blit(&mut self, graphic: Graphic, at: Position) {
        self.drawing.push(DrawCommand::Blit(graphic, at));
    }

    fn text(&mut self, line: TextLine) {
        self.drawing.push(DrawCommand::Text(line));
    }

    fn flip(&mut self) {
        let frame = std::mem::take(&mut self.drawing);
        self.presented.push(frame);
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum AudioCue {
    PlayMusic,
    PauseMusic,
    UnpauseMusic,
    Sound(Sound),
}

#[derive(Default, Debug)]
pub struct CueRecorder {
    cues: Vec<AudioCue>,
}

impl CueRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn cues(&self) -> &[AudioCue] {
        &self.cues
    }
}

impl Mixer for CueRecorder {
    fn play_music(&mut self)    { self.cues.push(AudioCue::PlayMusic); }
    fn pause_music(&mut self)   { self.cues.push(AudioCue::PauseMusic); }
    fn unpause_music(&mut self) { self.cues.push(AudioCue::UnpauseMusic); }
    fn play_sound(&mut self, sound: Sound) {
        self.cues.push(AudioCue::Sound(sound));
    }
}
