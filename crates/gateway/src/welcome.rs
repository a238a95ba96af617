use {rand::seq::IndexedRandom, tracing::warn};

use {codebot_channel::ChatClient, codebot_config::SharedConfig};

/// Send a randomly chosen greeting to every enabled channel.
///
/// Delivery failures are logged per channel and do not stop the rest of
/// the greetings.
pub async fn announce_startup(config: &SharedConfig, client: &dyn ChatClient) {
    let (channels, greetings) = {
        let guard = config.read().unwrap_or_else(|e| e.into_inner());
        (
            guard.config().channels.clone(),
            guard.config().welcome.clone(),
        )
    };

    for channel_id in channels {
        let Some(greeting) = greetings.choose(&mut rand::rng()) else {
            return;
        };
        if let Err(e) = client.send(&channel_id, greeting, &[]).await {
            warn!(channel_id = %channel_id, error = %e, "failed to send greeting");
        }
    }
}
