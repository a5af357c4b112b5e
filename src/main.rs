//! Gap Runner entry point
//!
//! Headless demo driver: runs a few scripted runs at the requested
//! difficulty and logs how they end. A real front end would plug input and
//! rendering into `FrameDriver` the same way.

use std::sync::Arc;

use gap_runner::commentary::CannedCommentary;
use gap_runner::consts::*;
use gap_runner::sim::{GameEvent, GamePhase, LevelPreset};
use gap_runner::{FrameDriver, HighScoreStore};

fn main() {
    env_logger::init();

    let preset = std::env::args()
        .nth(1)
        .and_then(|arg| LevelPreset::from_str(&arg))
        .unwrap_or_default();
    log::info!("Gap Runner starting on {}", preset.as_str());

    let store = HighScoreStore::load(std::env::temp_dir().join("gap_runner_highscore.json"));
    let seed = std::time::UNIX_EPOCH
        .elapsed()
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut driver = FrameDriver::new(seed, preset, store, Arc::new(CannedCommentary));

    for run in 1..=3 {
        driver.activate();
        let mut frames = 0u32;
        loop {
            let (snapshot, events) = driver.advance_frame();
            frames += 1;

            for event in &events {
                if *event == GameEvent::BossSpawned {
                    log::info!("Boss incoming at score {}", snapshot.score);
                }
            }

            match snapshot.phase {
                GamePhase::Running => {
                    // Same naive policy as the attract mode: flap on descent
                    if snapshot.player_y > PLAYER_START_Y && frames % 3 == 0 {
                        driver.activate();
                    }
                }
                GamePhase::EndedLoss | GamePhase::EndedWin => break,
                GamePhase::Idle => {}
            }
        }

        let state = driver.state();
        println!(
            "Run {run}: {:?} after {frames} frames, score {}, best {}",
            state.phase,
            state.score,
            driver.high_score()
        );
    }

    // Give the last commentary request a moment to land
    for _ in 0..50 {
        driver.advance_frame();
        if let Some(line) = driver.commentary_line() {
            println!("Commentary: {line}");
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
}
