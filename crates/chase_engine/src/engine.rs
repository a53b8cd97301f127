//! Core engine implementation
//!
//! A headless frame loop: the host queues [`AppEvent`]s, the engine hands
//! them to the application at the start of each frame and then calls
//! `update` with the frame's delta time.

use std::collections::VecDeque;

use crate::application::{AppEvent, Application};
use crate::foundation::time::Timer;
use thiserror::Error;

/// Main engine struct
///
/// The engine owns frame timing and the host event queue.
pub struct Engine {
    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Host events waiting for the next frame
    queue: VecDeque<AppEvent>,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        if let Some(step) = config.fixed_timestep {
            if !(step.is_finite() && step > 0.0) {
                return Err(EngineError::ConfigError(format!("fixed timestep must be positive, got {step}")));
            }
        }
        log::info!("Initializing engine ({:?})", config);
        Ok(Self {
            timer: Timer::new(),
            config,
            queue: VecDeque::new(),
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))?;

        log::info!("Starting main loop...");

        while engine.running {
            engine.advance_clock();
            let delta_time = engine.timer.delta_time();

            while let Some(event) = engine.queue.pop_front() {
                app.handle_event(&mut engine, event)
                    .map_err(|e| EngineError::ApplicationError(format!("App event: {e}")))?;
            }

            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;

            if let Some(max) = engine.config.max_frames {
                if engine.timer.frame_count() >= max {
                    log::info!("Frame limit {max} reached");
                    engine.running = false;
                }
            }
        }

        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({:.2}s simulated, {:.1} fps)",
            engine.timer.frame_count(),
            engine.timer.total_time(),
            engine.timer.average_fps()
        );
        Ok(())
    }

    fn advance_clock(&mut self) {
        match self.config.fixed_timestep {
            Some(step) => self.timer.advance(step),
            None => self.timer.update(),
        }
    }

    /// Queue a host event for the next frame
    pub fn push_event(&mut self, event: AppEvent) {
        self.queue.push_back(event);
    }

    /// Default handling of an application event
    pub fn handle_event(&mut self, event: &AppEvent) {
        if *event == AppEvent::CloseRequested {
            self.quit();
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Time simulated since start
    pub fn total_time(&self) -> f32 {
        self.timer.total_time()
    }

    /// Frames completed
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Fixed simulation step in seconds; `None` uses wall-clock time
    pub fixed_timestep: Option<f32>,

    /// Stop after this many frames
    pub max_frames: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: Some(1.0 / 60.0),
            max_frames: None,
        }
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
