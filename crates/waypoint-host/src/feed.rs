//! Host event feed read from stdin.
//!
//! Each line is one JSON object tagged by `event`:
//!
//! ```text
//! {"event":"player_data_saved","player_id":7,"waypoints":[{"entity_id":1,"name":"Base","pos":{"x":10,"y":20,"z":30}}]}
//! {"event":"world_loaded"}
//! {"event":"world_unloaded"}
//! ```
//!
//! [`HostHarness`] plays the host's part: it fires save events on its
//! [`SaveEventBus`] and flips the shared [`WorldFlag`]. [`run_feed`]
//! pumps lines into it until the shutdown signal fires.

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};
use waypoint_exposer::{SaveEventBus, WorldFlag};
use waypoint_types::PlayerDataSaved;

use crate::error::HostError;

/// One event the simulated host can raise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// A player's data was saved, carrying their waypoint list.
    PlayerDataSaved(PlayerDataSaved),
    /// The game world finished loading.
    WorldLoaded,
    /// The game world was unloaded.
    WorldUnloaded,
}

/// Parse one feed line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns the JSON error when the line is not a known event.
pub fn parse_line(line: &str) -> Result<Option<HostEvent>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// The simulated host: owns the save-event bus and the world flag.
#[derive(Debug)]
pub struct HostHarness {
    bus: SaveEventBus,
    world: Arc<WorldFlag>,
}

impl HostHarness {
    /// Wrap a bus the plugin has subscribed to and the shared world flag.
    pub const fn new(bus: SaveEventBus, world: Arc<WorldFlag>) -> Self {
        Self { bus, world }
    }

    /// Raise `event` as the host would.
    pub fn apply(&self, event: &HostEvent) {
        match event {
            HostEvent::PlayerDataSaved(saved) => {
                let delivered = self.bus.fire(saved);
                info!(
                    player_id = %saved.player_id,
                    waypoints = saved.waypoints.len(),
                    delivered,
                    "Player data saved"
                );
            }
            HostEvent::WorldLoaded => {
                self.world.set_ready(true);
                info!("World loaded");
            }
            HostEvent::WorldUnloaded => {
                self.world.set_ready(false);
                info!("World unloaded");
            }
        }
    }

    /// Parse and apply one feed line. Malformed lines are logged and
    /// skipped.
    pub fn handle_line(&self, line: &str) {
        match parse_line(line) {
            Ok(Some(event)) => self.apply(&event),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Skipping malformed host event line"),
        }
    }
}

/// Apply host events read from `reader` until EOF, then wait for
/// `shutdown`. Shutdown firing during the feed ends it early.
///
/// `shutdown` is polled from one place across the whole feed, so a
/// signal that arrives between two lines is never lost.
///
/// # Errors
///
/// Returns [`HostError::Feed`] if reading from `reader` fails.
pub async fn run_feed<R, S>(host: &HostHarness, reader: R, shutdown: S) -> Result<(), HostError>
where
    R: AsyncBufRead + Unpin + Send,
    S: Future<Output = std::io::Result<()>> + Send,
{
    let mut lines = reader.lines();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            signal = &mut shutdown => {
                log_signal(signal);
                return Ok(());
            }
            line = lines.next_line() => match line? {
                Some(line) => host.handle_line(&line),
                None => {
                    info!("Event feed closed, serving until Ctrl-C");
                    break;
                }
            }
        }
    }

    log_signal(shutdown.await);
    Ok(())
}

fn log_signal(signal: std::io::Result<()>) {
    match signal {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => warn!(error = %e, "Could not listen for Ctrl-C, shutting down"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncWriteExt, BufReader};
    use tokio::sync::oneshot;
    use waypoint_exposer::{ModLifecycle, StaticHostConfig, WaypointExposer, WorldStatus};
    use waypoint_exposer::state::AppState;
    use waypoint_store::WaypointStore;
    use waypoint_types::PlayerId;

    use super::*;

    /// Bus with no subscribers, plus the world flag it drives.
    fn bare_host() -> (HostHarness, Arc<WorldFlag>) {
        let world = Arc::new(WorldFlag::new(false));
        (HostHarness::new(SaveEventBus::new(), Arc::clone(&world)), world)
    }

    /// A shutdown future that fires when the sender is used or dropped.
    fn shutdown_signal() -> (
        oneshot::Sender<()>,
        impl Future<Output = std::io::Result<()>> + Send,
    ) {
        let (tx, rx) = oneshot::channel::<()>();
        (tx, async move { rx.await.map_err(std::io::Error::other) })
    }

    async fn wait_for_ready(world: &WorldFlag) {
        while !world.is_world_ready() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[test]
    fn parses_save_event() {
        let line = r#"{"event":"player_data_saved","player_id":7,"waypoints":[{"entity_id":1,"name":"Base","pos":{"x":10,"y":20,"z":30}}]}"#;
        let event = parse_line(line).unwrap();
        assert!(matches!(
            event,
            Some(HostEvent::PlayerDataSaved(ref saved))
                if saved.player_id == PlayerId::new(7) && saved.waypoints.len() == 1
        ));
    }

    #[test]
    fn parses_world_events() {
        assert_eq!(
            parse_line(r#"{"event":"world_loaded"}"#).unwrap(),
            Some(HostEvent::WorldLoaded)
        );
        assert_eq!(
            parse_line(r#" {"event":"world_unloaded"} "#).unwrap(),
            Some(HostEvent::WorldUnloaded)
        );
    }

    #[test]
    fn blank_line_is_skipped() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_line("not json").is_err());
        assert!(parse_line(r#"{"event":"player_left"}"#).is_err());
    }

    #[tokio::test]
    async fn feed_drives_plugin_store_and_world() {
        let store = Arc::new(WaypointStore::new());
        let world = Arc::new(WorldFlag::new(false));
        let state = Arc::new(AppState::new(Arc::clone(&store), Arc::clone(&world) as _));

        let mut plugin = WaypointExposer::start(&StaticHostConfig::default(), state).await;
        let mut bus = SaveEventBus::new();
        plugin.initialize(&mut bus);
        let host = HostHarness::new(bus, Arc::clone(&world));

        host.handle_line(r#"{"event":"world_loaded"}"#);
        host.handle_line(r#"{"event":"player_data_saved","player_id":3,"waypoints":[{"entity_id":9,"name":"Camp","pos":{"x":1,"y":2,"z":3}}]}"#);
        host.handle_line("{broken");

        assert!(world.is_world_ready());
        assert_eq!(store.count_for_player(PlayerId::new(3)), 1);

        plugin.teardown().await;
    }

    #[tokio::test]
    async fn run_feed_applies_lines_until_shutdown() {
        let (host, world) = bare_host();
        let (mut writer, reader) = tokio::io::duplex(256);
        let (tx, shutdown) = shutdown_signal();

        let driver = async {
            writer.write_all(b"{\"event\":\"world_loaded\"}\n").await.unwrap();
            wait_for_ready(&world).await;
            // Writer stays open: only the signal can end the feed.
            tx.send(()).unwrap();
            writer
        };

        let (result, _writer) = tokio::time::timeout(
            Duration::from_secs(5),
            async { tokio::join!(run_feed(&host, BufReader::new(reader), shutdown), driver) },
        )
        .await
        .unwrap();

        assert!(result.is_ok());
        assert!(world.is_world_ready());
    }

    #[tokio::test]
    async fn run_feed_waits_for_shutdown_after_eof() {
        let (host, world) = bare_host();
        let input: &[u8] = b"{\"event\":\"world_loaded\"}\n\nnot json\n";
        let (tx, shutdown) = shutdown_signal();

        let feed = tokio::spawn(async move {
            run_feed(&host, BufReader::new(input), shutdown).await
        });

        wait_for_ready(&world).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!feed.is_finished());

        tx.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), feed)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn run_feed_ends_when_shutdown_listener_fails() {
        let (host, _world) = bare_host();
        let (_writer, reader) = tokio::io::duplex(16);
        let failing = async { Err::<(), _>(std::io::Error::other("no signal handler")) };

        let result = run_feed(&host, BufReader::new(reader), failing).await;

        assert!(result.is_ok());
    }
}
