//! The game itself, independent of any engine: a snake, an apple, and the
//! running / paused / game over state machine that ties them together.

pub mod apple;
pub mod grid;
pub mod snake;
pub mod surface;

use std::fmt;
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Serialize, Deserialize};

pub use apple::Apple;
pub use grid::{Direction, Position, SIZE, BOARD_WIDTH, BOARD_HEIGHT};
pub use snake::Snake;
pub use surface::{AudioCue, CueRecorder, DrawCommand, FrameRecorder, Graphic, Mixer, Sound, Surface, TextLine};

/// Delay between two ticks while running.
pub const TICK_MILLIS: u64 = 100;

const SCORE_AT: Position = Position::new(600, 10);

#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum GameState {
    Running,
    Paused,
    /// The board has already been reset; `score` is what the last game ended with.
    GameOver { score: usize },
}

/// Why a game ended. Both kinds end the game the same way.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Collision {
    SelfBite,
    Boundary,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::SelfBite => write!(f, "snake ran into itself"),
            Collision::Boundary => write!(f, "snake left the board"),
        }
    }
}

impl std::error::Error for Collision {}

#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Resume,
    Pause,
    Quit,
}

impl Key {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up    => Some(Direction::Up),
            Key::Down  => Some(Direction::Down),
            Key::Left  => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Resume | Key::Pause | Key::Quit => None,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum InputEvent {
    KeyDown(Key),
    /// The window was closed.
    Quit,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Control {
    Continue,
    Quit,
}

pub struct SnakeGame<R: Rng = StdRng> {
    pub snake: Snake,
    pub apple: Apple,
    pub state: GameState,
    rng: R,
}

impl SnakeGame<StdRng> {
    /// Seeded games place apples identically every time.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(rng: R) -> Self {
        Self {
            snake: Snake::new(),
            apple: Apple::new(),
            state: GameState::Running,
            rng,
        }
    }

    pub fn score(&self) -> usize {
        self.snake.length()
    }

    /// Start the music and put the opening board on the surface.
    pub fn start(&mut self, surface: &mut impl Surface, mixer: &mut impl Mixer) {
        info!("New game");
        mixer.play_music();
        Self::render_background(surface);
        self.apple.draw(surface);
        self.snake.draw(surface);
    }

    /// Feed every pending input event, in order, then advance one tick.
    pub fn run_tick(
        &mut self,
        events: impl IntoIterator<Item = InputEvent>,
        surface: &mut impl Surface,
        mixer: &mut impl Mixer,
    ) -> Control {
        for event in events {
            if self.handle_event(event, surface, mixer) == Control::Quit {
                return Control::Quit;
            }
        }
        self.tick(surface, mixer);
        Control::Continue
    }

    pub fn handle_event(
        &mut self,
        event: InputEvent,
        surface: &mut impl Surface,
        mixer: &mut impl Mixer,
    ) -> Control {
        let key = match event {
            InputEvent::Quit => {
                info!("Quit requested");
                return Control::Quit;
            }
            InputEvent::KeyDown(key) => key,
        };
        match (key, self.state) {
            (Key::Quit, _) => {
                info!("Quit requested");
                return Control::Quit;
            }
            (Key::Resume, GameState::Paused | GameState::GameOver { .. }) => {
                info!("Resuming, score {}", self.score());
                self.state = GameState::Running;
                mixer.unpause_music();
            }
            (Key::Pause, GameState::Running) => {
                info!("Paused at score {}", self.score());
                self.state = GameState::Paused;
                mixer.pause_music();
                self.render_pause(surface);
            }
            (_, GameState::Running) => {
                if let Some(direction) = key.direction() {
                    self.snake.steer(direction);
                }
            }
            _ => {}
        }
        Control::Continue
    }

    /// One step of the clock. Does nothing unless running; a collision ends
    /// the game and resets the board.
    pub fn tick(&mut self, surface: &mut impl Surface, mixer: &mut impl Mixer) {
        if self.state != GameState::Running { return; }
        if let Err(collision) = self.play(surface, mixer) {
            let score = self.score();
            info!("Game over: {collision}, score {score}");
            self.show_game_over(surface, mixer);
            self.state = GameState::GameOver { score };
            self.reset();
        }
    }

    /// Move the snake, draw the frame, then resolve what the head ran into.
    pub fn play(&mut self, surface: &mut impl Surface, mixer: &mut impl Mixer) -> Result<(), Collision> {
        Self::render_background(surface);
        self.snake.walk(surface);
        self.apple.draw(surface);
        self.display_score(surface);
        surface.flip();

        let head = self.snake.head();
        if head == self.apple.location {
            mixer.play_sound(Sound::Eat);
            self.snake.increase_length();
            self.apple.relocate(&mut self.rng);
            debug!("Apple eaten at {head:?}, length {}, next apple at {:?}",
                self.snake.length(), self.apple.location);
        }

        if self.snake.bites_itself() {
            mixer.play_sound(Sound::Collision);
            return Err(Collision::SelfBite);
        }

        if !grid::is_on_board(head) {
            mixer.play_sound(Sound::Collision);
            return Err(Collision::Boundary);
        }
        Ok(())
    }

    pub fn show_game_over(&self, surface: &mut impl Surface, mixer: &mut impl Mixer) {
        if log::log_enabled!(log::Level::Debug) {
            if let Ok(json) = serde_json::to_string(&(&self.snake, &self.apple)) {
                debug!("Final board: {json}");
            }
        }
        Self::render_background(surface);
        mixer.pause_music();
        surface.text(TextLine::new(
            format!("GAME OVER! Your Score is {}", self.score()),
            Position::new(90, 200),
            40.0,
        ));
        surface.text(TextLine::new(
            "To play again press Return. To exit press Escape!",
            Position::new(50, 250),
            30.0,
        ));
        surface.flip();
    }

    /// Fresh snake and apple. The state is left alone so the game over screen
    /// stays up until resumed.
    pub fn reset(&mut self) {
        self.apple = Apple::new();
        self.snake = Snake::new();
    }

    fn display_score(&self, surface: &mut impl Surface) {
        surface.text(TextLine::new(format!("SCORE : {}", self.score()), SCORE_AT, 30.0));
    }

    fn render_background(surface: &mut impl Surface) {
        surface.blit(Graphic::Background, Position::new(0, 0));
    }

    /// The board as it stands, without moving anything.
    fn draw_board(&self, surface: &mut impl Surface) {
        Self::render_background(surface);
        self.snake.draw(surface);
        self.apple.draw(surface);
        self.display_score(surface);
    }

    fn render_pause(&self, surface: &mut impl Surface) {
        self.draw_board(surface);
        surface.text(TextLine::new(
            "PAUSED. Press Return to continue.",
            Position::new(130, 250),
            40.0,
        ));
        surface.flip();
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    struct Harness {
        game: SnakeGame,
        frame: FrameRecorder,
        mixer: CueRecorder,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                game: SnakeGame::from_seed(Some(1234)),
                frame: FrameRecorder::new(),
                mixer: CueRecorder::new(),
            }
        }

        fn tick(&mut self) {
            self.game.tick(&mut self.frame, &mut self.mixer);
        }

        fn key(&mut self, key: Key) -> Control {
            self.game.handle_event(InputEvent::KeyDown(key), &mut self.frame, &mut self.mixer)
        }

        fn sounds(&self, sound: Sound) -> usize {
            self.mixer.cues().iter().filter(|&&c| c == AudioCue::Sound(sound)).count()
        }

        fn last_frame(&mut self) -> Vec<DrawCommand> {
            self.frame.take_presented().pop().unwrap()
        }
    }

    fn pt(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    fn texts(frame: &[DrawCommand]) -> Vec<String> {
        frame.iter().filter_map(|c| match c {
            DrawCommand::Text(line) => Some(line.text.clone()),
            _ => None,
        }).collect()
    }

    #[test]
    fn test_start() {
        let mut h = Harness::new();
        h.game.start(&mut h.frame, &mut h.mixer);
        assert_eq!(h.mixer.cues(), &[AudioCue::PlayMusic]);
        assert_eq!(h.frame.pending(), &[
            DrawCommand::Blit(Graphic::Background, pt(0, 0)),
            DrawCommand::Blit(Graphic::Apple, pt(200, 200)),
            DrawCommand::Blit(Graphic::Block, pt(40, 40)),
        ]);
    }

    #[test]
    fn test_five_ticks_down() {
        let mut h = Harness::new();
        for _ in 0..5 {
            h.tick();
            assert_eq!(h.game.state, GameState::Running);
        }
        assert_eq!(h.game.snake.head(), pt(40, 240));
        assert_eq!(h.game.score(), 1);
        assert_eq!(h.frame.take_presented().len(), 5);
    }

    #[test]
    fn test_frame_order() {
        let mut h = Harness::new();
        h.tick();
        assert_eq!(h.last_frame(), vec![
            DrawCommand::Blit(Graphic::Background, pt(0, 0)),
            DrawCommand::Blit(Graphic::Block, pt(40, 80)),
            DrawCommand::Blit(Graphic::Apple, pt(200, 200)),
            DrawCommand::Text(TextLine::new("SCORE : 1", pt(600, 10), 30.0)),
        ]);
    }

    #[test]
    fn test_eating() {
        let mut h = Harness::new();
        h.game.apple.location = pt(40, 80);
        h.tick();
        assert_eq!(h.game.score(), 2);
        assert_eq!(h.sounds(Sound::Eat), 1);
        assert_eq!(h.game.state, GameState::Running);
        assert!(Apple::can_land_on(h.game.apple.location));
        // The score drawn that tick was taken before growing.
        assert!(texts(&h.last_frame()).contains(&"SCORE : 1".to_string()));

        h.game.apple.location = pt(400, 400);
        h.tick();
        assert_eq!(h.sounds(Sound::Eat), 1);
        assert_eq!(h.game.snake.segments(), &[pt(40, 120), pt(40, 80)]);
    }

    #[test]
    fn test_eating_relocates_in_range() {
        for seed in 0..50 {
            let mut game = SnakeGame::from_seed(Some(seed));
            let mut frame = FrameRecorder::new();
            let mut mixer = CueRecorder::new();
            game.apple.location = pt(40, 80);
            game.tick(&mut frame, &mut mixer);
            assert!(Apple::can_land_on(game.apple.location));
        }
    }

    #[test]
    fn test_length_tracks_score_while_alive() {
        let mut h = Harness::new();
        h.key(Key::Right);
        let mut last = h.game.score();
        for _ in 0..10 {
            let ahead = h.game.snake.head().stepped(h.game.snake.direction());
            h.game.apple.location = ahead;
            h.tick();
            assert_eq!(h.game.state, GameState::Running);
            assert!(h.game.score() >= last);
            assert_eq!(h.game.score(), h.game.snake.length());
            last = h.game.score();
        }
        assert_eq!(h.game.score(), 11);
    }

    #[test]
    fn test_boundary_collision() {
        let mut h = Harness::new();
        h.game.snake = Snake::with_segments(vec![pt(800, 320), pt(760, 320)], Direction::Right);
        h.tick();

        assert_eq!(h.game.state, GameState::GameOver { score: 2 });
        assert_eq!(h.sounds(Sound::Collision), 1);
        assert!(h.mixer.cues().contains(&AudioCue::PauseMusic));

        let frames = h.frame.take_presented();
        assert_eq!(frames.len(), 2);
        let overlay = texts(&frames[1]);
        assert_eq!(overlay[0], "GAME OVER! Your Score is 2");
        assert_eq!(overlay[1], "To play again press Return. To exit press Escape!");
    }

    #[test]
    fn test_right_edge_is_inside() {
        let mut h = Harness::new();
        h.game.snake = Snake::with_segments(vec![pt(760, 320)], Direction::Right);
        h.tick();
        assert_eq!(h.game.snake.head(), pt(800, 320));
        assert_eq!(h.game.state, GameState::Running);
    }

    #[test]
    fn test_top_edge() {
        let mut h = Harness::new();
        h.key(Key::Up);
        h.tick();
        assert_eq!(h.game.state, GameState::Running);
        h.tick();
        assert_eq!(h.game.state, GameState::GameOver { score: 1 });
    }

    #[test]
    fn test_self_collision() {
        let mut h = Harness::new();
        h.game.snake = Snake::with_segments(
            vec![pt(200, 400), pt(160, 400), pt(120, 400), pt(80, 400), pt(40, 400)],
            Direction::Right,
        );
        h.key(Key::Down);
        h.tick();
        h.key(Key::Left);
        h.tick();
        assert_eq!(h.game.state, GameState::Running);
        h.key(Key::Up);
        h.tick();

        assert_eq!(h.game.state, GameState::GameOver { score: 5 });
        assert_eq!(h.sounds(Sound::Collision), 1);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut h = Harness::new();
        h.game.snake = Snake::with_segments(vec![pt(0, 200), pt(40, 200), pt(80, 200)], Direction::Left);
        h.game.apple.location = pt(400, 400);
        h.tick();

        assert_eq!(h.game.state, GameState::GameOver { score: 3 });
        assert_eq!(h.game.score(), 1);
        assert_eq!(h.game.snake.head(), Snake::SPAWN);
        assert_eq!(h.game.snake.direction(), Direction::Down);
        assert_eq!(h.game.apple.location, Apple::SPAWN);
    }

    #[test]
    fn test_game_over_holds_until_resume() {
        let mut h = Harness::new();
        h.key(Key::Up);
        h.tick();
        h.tick();
        assert!(matches!(h.game.state, GameState::GameOver { .. }));
        h.frame.take_presented();

        // Ticks and direction keys do nothing while the overlay is up.
        h.key(Key::Right);
        h.tick();
        h.tick();
        assert!(h.frame.take_presented().is_empty());
        assert_eq!(h.game.snake.direction(), Direction::Down);

        h.key(Key::Resume);
        assert_eq!(h.game.state, GameState::Running);
        assert_eq!(h.mixer.cues().last(), Some(&AudioCue::UnpauseMusic));
        h.tick();
        assert_eq!(h.game.snake.head(), pt(40, 80));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut h = Harness::new();
        h.tick();
        h.key(Key::Pause);
        assert_eq!(h.game.state, GameState::Paused);
        assert_eq!(h.mixer.cues().last(), Some(&AudioCue::PauseMusic));
        let head = h.game.snake.head();
        h.tick();
        assert_eq!(h.game.snake.head(), head);

        h.key(Key::Resume);
        h.tick();
        assert_eq!(h.game.snake.head(), head.stepped(Direction::Down));
    }

    #[test]
    fn test_pause_keeps_the_board_visible() {
        let mut h = Harness::new();
        h.tick();
        h.frame.take_presented();
        h.key(Key::Pause);

        let frame = h.last_frame();
        assert_eq!(frame[0], DrawCommand::Blit(Graphic::Background, pt(0, 0)));
        assert!(frame.contains(&DrawCommand::Blit(Graphic::Block, pt(40, 80))));
        assert!(frame.contains(&DrawCommand::Blit(Graphic::Apple, pt(200, 200))));
        assert_eq!(texts(&frame), ["SCORE : 1", "PAUSED. Press Return to continue."]);
    }

    #[test]
    fn test_resume_while_running_is_ignored() {
        let mut h = Harness::new();
        h.key(Key::Resume);
        assert!(h.mixer.cues().is_empty());
        assert_eq!(h.game.state, GameState::Running);
    }

    #[test]
    fn test_quit() {
        let mut h = Harness::new();
        assert_eq!(h.key(Key::Quit), Control::Quit);
        h.key(Key::Pause);
        assert_eq!(h.key(Key::Quit), Control::Quit);
        assert_eq!(
            h.game.handle_event(InputEvent::Quit, &mut h.frame, &mut h.mixer),
            Control::Quit,
        );
    }

    #[test]
    fn test_run_tick_applies_all_events_first() {
        let mut h = Harness::new();
        let events = [InputEvent::KeyDown(Key::Left), InputEvent::KeyDown(Key::Right)];
        let control = h.game.run_tick(events, &mut h.frame, &mut h.mixer);
        assert_eq!(control, Control::Continue);
        assert_eq!(h.game.snake.head(), pt(80, 40));

        let events = [InputEvent::KeyDown(Key::Up), InputEvent::Quit];
        let control = h.game.run_tick(events, &mut h.frame, &mut h.mixer);
        assert_eq!(control, Control::Quit);
        assert_eq!(h.game.snake.head(), pt(80, 40));
    }
}
