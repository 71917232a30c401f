use std::sync::Arc;

use anyhow::{Context, Result};
use switchboard_config::{ClientConfig, RealtimeConfig};
use switchboard_gateway::HttpGateway;
use switchboard_groups::{
    ChannelFrame, EventBridge, LocalChannel, MutationCoordinator, NotificationSink,
    RealtimeChannel, RequestGateway, SyncState,
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};

/// Log output for client sessions.
pub mod telemetry {
    use anyhow::{Context, Result};
    use tracing_subscriber::{fmt, EnvFilter};

    /// Filter used when `RUST_LOG` is unset: the sync crates at `info`,
    /// everything else at `warn`.
    pub const DEFAULT_DIRECTIVES: &str =
        "warn,switchboard_groups=info,switchboard_gateway=info,switchboard_runtime=info";

    fn session_filter() -> Result<EnvFilter> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVES))
            .context("invalid tracing directives")
    }

    /// Install the global subscriber. Fails if one is already installed.
    pub fn init_tracing() -> Result<()> {
        fmt()
            .with_env_filter(session_filter()?)
            .with_target(true)
            .try_init()
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_default_directives_parse() {
            let filter = EnvFilter::try_new(DEFAULT_DIRECTIVES).unwrap();
            assert!(filter.to_string().contains("switchboard_groups=info"));
        }
    }
}

/// One signed-in session: its cache, the coordinator writing to it and the
/// bridge feeding it push events.
pub struct GroupSession {
    state: SyncState,
    coordinator: MutationCoordinator,
    bridge: EventBridge,
    channel: Option<Arc<dyn RealtimeChannel>>,
}

impl GroupSession {
    /// The channel is ignored when `realtime.enabled` is off.
    pub fn new(
        config: &ClientConfig,
        gateway: Arc<dyn RequestGateway>,
        channel: Option<Arc<dyn RealtimeChannel>>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let state = SyncState::new();
        let coordinator = MutationCoordinator::new(gateway, state.clone(), notifier.clone());
        let bridge = EventBridge::new(state.clone(), notifier);

        let channel = if config.realtime.enabled {
            channel
        } else {
            debug!("realtime disabled, running without push events");
            None
        };

        Self {
            state,
            coordinator,
            bridge,
            channel,
        }
    }

    /// Build a session that talks to the configured API over HTTP.
    pub fn connect(
        config: &ClientConfig,
        channel: Option<Arc<dyn RealtimeChannel>>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self> {
        let gateway = HttpGateway::new(&config.api).context("failed to build http gateway")?;
        info!(base_url = gateway.base_url(), "http gateway ready");

        Ok(Self::new(config, Arc::new(gateway), channel, notifier))
    }

    pub fn start(&self) {
        self.bridge.subscribe(self.channel.as_deref());
        info!(realtime = self.channel.is_some(), "group session started");
    }

    /// Unbind push events and drop all cached data.
    pub fn shutdown(self) {
        self.bridge.unsubscribe(self.channel.as_deref());
        self.state.clear();
        info!("group session closed");
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn coordinator(&self) -> &MutationCoordinator {
        &self.coordinator
    }

    pub fn bridge(&self) -> &EventBridge {
        &self.bridge
    }
}

/// Start an in-process channel fed through a bounded frame queue.
///
/// The pump task ends once every sender is dropped and yields the number of
/// frames that reached a handler. Must be called from within a Tokio runtime.
pub fn spawn_local_channel(
    config: &RealtimeConfig,
) -> (Arc<LocalChannel>, mpsc::Sender<ChannelFrame>, JoinHandle<usize>) {
    let channel = Arc::new(LocalChannel::new());
    let (sender, receiver) = mpsc::channel(config.event_buffer.max(1));

    let pump = {
        let channel = Arc::clone(&channel);
        tokio::spawn(async move { channel.pump(receiver).await })
    };

    (channel, sender, pump)
}
