//! Capability contracts between the plugin and its host game engine.
//!
//! The host is an external collaborator. It hands the plugin three
//! things: a base port from its configuration, a world-readiness flag,
//! and a "player data saved" event. In return it drives the plugin
//! through [`ModLifecycle`] and, because the plugin is also registered
//! as a console server, pushes console output through [`ConsoleSink`].
//!
//! [`StaticHostConfig`], [`WorldFlag`] and [`SaveEventBus`] are plain
//! in-process implementations used by the standalone host harness and
//! by tests.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use waypoint_types::PlayerDataSaved;

// ---------------------------------------------------------------------------
// Consumed capabilities
// ---------------------------------------------------------------------------

/// Read access to the host's configuration.
pub trait HostConfig: Send + Sync {
    /// The host's control panel port, from which the waypoint port is
    /// derived. `None` when the host has no such setting.
    fn base_port(&self) -> Option<i64>;
}

/// The host's view of whether the game world has finished loading.
pub trait WorldStatus: Send + Sync {
    /// Whether waypoint data is valid to serve.
    fn is_world_ready(&self) -> bool;
}

/// Callback invoked once per player-data save.
pub type SaveHandler = Box<dyn Fn(&PlayerDataSaved) + Send + Sync>;

/// Subscription point for the host's "player data saved" event.
pub trait SaveEventSource {
    /// Register `handler` to run on every subsequent save.
    fn on_player_data_saved(&mut self, handler: SaveHandler);
}

// ---------------------------------------------------------------------------
// Exposed capabilities
// ---------------------------------------------------------------------------

/// Lifecycle hooks the host calls on a loaded plugin.
pub trait ModLifecycle {
    /// Called once after load. Subscribes to the host events the plugin
    /// reacts to.
    fn initialize(&mut self, events: &mut dyn SaveEventSource);

    /// Called once at unload. Never fails; problems are logged.
    fn teardown(&mut self) -> impl Future<Output = ()> + Send;
}

/// Severity attached to a host console log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLogKind {
    /// An error message.
    Error,
    /// A failed assertion.
    Assert,
    /// A warning.
    Warning,
    /// A regular log line.
    Log,
    /// An uncaught exception.
    Exception,
}

/// Receiver for host console output.
pub trait ConsoleSink {
    /// A single console line.
    fn send_line(&self, line: &str);

    /// A log message with its stack trace.
    fn send_log(&self, message: &str, trace: &str, kind: ConsoleLogKind);
}

// ---------------------------------------------------------------------------
// In-process implementations
// ---------------------------------------------------------------------------

/// Host configuration with a fixed base port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticHostConfig {
    /// The base port handed to the plugin.
    pub base_port: Option<i64>,
}

impl StaticHostConfig {
    /// Configuration reporting `base_port`.
    pub const fn new(base_port: i64) -> Self {
        Self {
            base_port: Some(base_port),
        }
    }
}

impl HostConfig for StaticHostConfig {
    fn base_port(&self) -> Option<i64> {
        self.base_port
    }
}

/// World-readiness flag flipped by the host as worlds load and unload.
#[derive(Debug, Default)]
pub struct WorldFlag {
    ready: AtomicBool,
}

impl WorldFlag {
    /// A flag starting in the given state.
    pub const fn new(ready: bool) -> Self {
        Self {
            ready: AtomicBool::new(ready),
        }
    }

    /// Mark the world as loaded or unloaded.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }
}

impl WorldStatus for WorldFlag {
    fn is_world_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Synchronous event bus delivering save events to every subscriber in
/// registration order.
#[derive(Default)]
pub struct SaveEventBus {
    handlers: Vec<SaveHandler>,
}

impl SaveEventBus {
    /// An empty bus.
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Deliver `event` to all subscribers. Returns how many ran.
    pub fn fire(&self, event: &PlayerDataSaved) -> usize {
        for handler in &self.handlers {
            handler(event);
        }
        self.handlers.len()
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl SaveEventSource for SaveEventBus {
    fn on_player_data_saved(&mut self, handler: SaveHandler) {
        self.handlers.push(handler);
    }
}

impl core::fmt::Debug for SaveEventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SaveEventBus")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
