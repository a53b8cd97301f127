//! Event system following Game Engine Architecture Ch 16.8
//! Key principles:
//! - Typed payloads (each event carries exactly the data it needs)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration system (only notify interested handlers)
//! - Queued delivery: events raised during a tick are dispatched at its end
//!   and stay available for polling until drained

use std::collections::HashMap;

use crate::foundation::math::Vec3;

/// Which body finished loading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// The player avatar
    Player,
    /// The pursuing agent
    Agent,
    /// A coin, by spawn index
    Coin(usize),
}

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A body received usable geometry
    BodyReady,
    /// Player and agent volumes overlap
    PlayerAgentCollision,
    /// Pointer lock was lost; camera input is ignored
    CameraPaused,
    /// Pointer lock was regained
    CameraResumed,
    /// A coin was picked up
    CoinCollected,
    /// The last coin was picked up
    AllCoinsCollected,
}

/// Game notification with its payload
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A body received usable geometry and now takes part in collision
    BodyReady {
        /// The body
        body: BodyKind,
    },
    /// Player and agent volumes overlap this tick
    PlayerAgentCollision {
        /// Player position at the time of contact
        player: Vec3,
        /// Agent position at the time of contact
        agent: Vec3,
    },
    /// Pointer lock was lost
    CameraPaused,
    /// Pointer lock was regained
    CameraResumed,
    /// A coin was picked up
    CoinCollected {
        /// Spawn index of the coin
        coin: usize,
        /// Coins still in the level
        remaining: usize,
    },
    /// The last coin was picked up
    AllCoinsCollected,
}

impl GameEvent {
    /// Type tag used for handler registration
    pub fn event_type(&self) -> EventType {
        match self {
            Self::BodyReady { .. } => EventType::BodyReady,
            Self::PlayerAgentCollision { .. } => EventType::PlayerAgentCollision,
            Self::CameraPaused => EventType::CameraPaused,
            Self::CameraResumed => EventType::CameraResumed,
            Self::CoinCollected { .. } => EventType::CoinCollected,
            Self::AllCoinsCollected => EventType::AllCoinsCollected,
        }
    }
}

/// Event with timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Timestamp when event was raised (seconds since session start)
    pub timestamp: f64,
    /// What happened
    pub payload: GameEvent,
}

impl Event {
    /// Type tag of the payload
    pub fn event_type(&self) -> EventType {
        self.payload.event_type()
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
/// Returns false to allow forwarding to other handlers
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &Event) -> bool;
}

impl<F> EventHandler for F
where
    F: FnMut(&Event) -> bool,
{
    fn on_event(&mut self, event: &Event) -> bool {
        self(event)
    }
}

/// Event system with registration and queuing
/// Follows chain of responsibility pattern
pub struct EventSystem {
    pending: Vec<Event>,
    delivered: Vec<Event>,
    handlers: HashMap<EventType, Vec<Box<dyn EventHandler>>>,
    current_time: f64,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            delivered: Vec::new(),
            handlers: HashMap::new(),
            current_time: 0.0,
        }
    }

    /// Update current time (seconds since start)
    pub fn update_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Register a handler for a specific event type
    /// Only handlers registered for this type will be notified
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) {
        self.handlers.entry(event_type).or_default().push(handler);
    }

    /// Raise an event for delivery at the next dispatch
    pub fn send(&mut self, payload: GameEvent) {
        log::debug!("Event raised: {payload:?}");
        self.pending.push(Event { timestamp: self.current_time, payload });
    }

    /// Deliver pending events to their handlers, in the order raised
    /// Events no handler consumed are kept for `drain`
    pub fn dispatch(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for event in pending {
            if !self.dispatch_event(&event) {
                self.delivered.push(event);
            }
        }
    }

    /// Dispatch single event to registered handlers
    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&mut self, event: &Event) -> bool {
        if let Some(handlers) = self.handlers.get_mut(&event.event_type()) {
            for handler in handlers.iter_mut() {
                if handler.on_event(event) {
                    // Event consumed, stop forwarding
                    return true;
                }
            }
        }
        false
    }

    /// Take every unconsumed event dispatched since the last drain
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.delivered)
    }

    /// Unconsumed events dispatched and not yet drained
    pub fn delivered(&self) -> &[Event] {
        &self.delivered
    }

    /// Clear all queued and undrained events
    pub fn clear(&mut self) {
        self.pending.clear();
        self.delivered.clear();
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}
