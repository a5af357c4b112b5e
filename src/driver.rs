//! Frame driver
//!
//! The only component that sees everything: it owns the session, feeds one
//! tick per frame, routes external commands, records the high score at
//! terminal transitions, and fires the post-run commentary request. The
//! fixed-rate loop around it is stoppable and restartable with at most one
//! loop scheduled at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::commentary::{CommentaryClient, CommentarySource};
use crate::consts::TICK_HZ;
use crate::highscores::HighScoreStore;
use crate::sim::{
    FrameSnapshot, GameEvent, GamePhase, GameState, LevelPreset, TickInput, tick,
};

/// Owns the session and everything that talks to it
pub struct FrameDriver {
    state: GameState,
    preset: LevelPreset,
    store: HighScoreStore,
    commentary: CommentaryClient,
    /// Display-only; the simulation never reads it
    commentary_line: Option<String>,
    pending: TickInput,
}

impl FrameDriver {
    pub fn new(
        seed: u64,
        preset: LevelPreset,
        store: HighScoreStore,
        source: Arc<dyn CommentarySource>,
    ) -> Self {
        let mut state = GameState::new(seed, preset.config());
        state.high_score = store.high_score();
        Self {
            state,
            preset,
            store,
            commentary: CommentaryClient::new(source),
            commentary_line: None,
            pending: TickInput::default(),
        }
    }

    /// The contextual button: start, jump, or retry
    pub fn activate(&mut self) {
        self.pending.activate = true;
    }

    /// Back to the attract state from a terminal phase
    pub fn menu(&mut self) {
        self.pending.menu = true;
    }

    /// Change difficulty. Ignored mid-run; the active run keeps its config.
    pub fn select_preset(&mut self, preset: LevelPreset) -> bool {
        if self.state.phase == GamePhase::Running {
            return false;
        }
        self.preset = preset;
        self.state.config = preset.config();
        true
    }

    pub fn preset(&self) -> LevelPreset {
        self.preset
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u32 {
        self.store.high_score()
    }

    /// The line the commentary service produced for the last loss, if any
    pub fn commentary_line(&self) -> Option<&str> {
        self.commentary_line.as_deref()
    }

    /// Advance exactly one tick and hand back the frame for rendering.
    /// Everything a tick needs completes before this returns; the renderer
    /// never observes a partially updated session.
    pub fn advance_frame(&mut self) -> (FrameSnapshot, Vec<GameEvent>) {
        let input = self.pending;
        self.pending = TickInput::default();

        let phase_before = self.state.phase;
        let events = tick(&mut self.state, &input);

        if self.state.phase == GamePhase::Running && phase_before != GamePhase::Running {
            self.commentary_line = None;
        }

        if phase_before == GamePhase::Running && self.state.phase.is_terminal() {
            let score = self.state.score;
            if self.store.record(score) {
                log::info!("New high score: {score}");
            }
            if self.state.phase == GamePhase::EndedLoss {
                self.commentary.request(score, self.preset.as_str());
            }
        }
        self.state.high_score = self.store.high_score();

        if let Some(line) = self.commentary.poll() {
            self.commentary_line = Some(line);
        }

        (self.state.snapshot(), events)
    }
}

/// Handle to a running fixed-rate driver loop. Dropping it stops the loop.
pub struct DriverHandle {
    driver: Arc<Mutex<FrameDriver>>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl DriverHandle {
    /// Schedule the loop. The handle owns the only stop flag for it, so at
    /// most one loop runs per handle.
    pub fn spawn(driver: FrameDriver) -> Self {
        Self::spawn_shared(Arc::new(Mutex::new(driver)))
    }

    pub fn spawn_shared(driver: Arc<Mutex<FrameDriver>>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread = Some(Self::schedule(Arc::clone(&driver), Arc::clone(&stop)));
        Self {
            driver,
            stop,
            thread,
        }
    }

    fn schedule(driver: Arc<Mutex<FrameDriver>>, stop: Arc<AtomicBool>) -> JoinHandle<()> {
        let frame = Duration::from_secs(1) / TICK_HZ;
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                driver.lock().advance_frame();
                thread::sleep(frame);
            }
        })
    }

    /// Shared access for input plumbing and observers
    pub fn driver(&self) -> Arc<Mutex<FrameDriver>> {
        Arc::clone(&self.driver)
    }

    /// Cancel the scheduled loop and wait for the in-flight tick to finish
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    /// Stop the current loop, then schedule a fresh one. The old loop is
    /// joined before the new one starts, so ticks never overlap.
    pub fn restart(&mut self) {
        self.stop();
        self.stop = Arc::new(AtomicBool::new(false));
        self.thread = Some(Self::schedule(
            Arc::clone(&self.driver),
            Arc::clone(&self.stop),
        ));
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
