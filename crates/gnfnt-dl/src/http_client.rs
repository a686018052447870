//! Process-wide HTTP agent shared by feed queries and archive downloads.

use std::{
    sync::{LazyLock, RwLock},
    time::Duration,
};

use ureq::{http::HeaderMap, typestate::WithoutBody, Agent, Proxy, RequestBuilder};

/// Settings applied to every request made through the shared agent.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub user_agent: Option<String>,
    pub headers: Option<HeaderMap>,
    pub proxy: Option<Proxy>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(concat!("gnfnt/", env!("CARGO_PKG_VERSION")).into()),
            headers: None,
            proxy: None,
        }
    }
}

impl ClientConfig {
    /// Builds an agent that hands non-success statuses back as plain responses, so callers
    /// can attach the URL to the status they report.
    pub fn build(&self) -> Agent {
        let mut builder = Agent::config_builder()
            .proxy(self.proxy.clone())
            .http_status_as_error(false);

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        builder.build().into()
    }
}

struct ClientState {
    config: ClientConfig,
    agent: Agent,
}

static CLIENT: LazyLock<RwLock<ClientState>> = LazyLock::new(|| {
    let config = ClientConfig::default();
    RwLock::new(ClientState {
        agent: config.build(),
        config,
    })
});

/// Starts a GET against `url` with the configured headers and an optional overall deadline.
pub fn get(url: &str, timeout: Option<Duration>) -> RequestBuilder<WithoutBody> {
    let state = CLIENT.read().unwrap_or_else(|poisoned| poisoned.into_inner());

    let mut req = state.agent.get(url);
    if let Some(headers) = &state.config.headers {
        for (name, value) in headers {
            req = req.header(name, value);
        }
    }

    match timeout {
        Some(timeout) => req.config().timeout_global(Some(timeout)).build(),
        None => req,
    }
}

/// Edits the shared settings and swaps in a freshly built agent.
///
/// ```
/// use gnfnt_dl::http_client::configure_http_client;
///
/// configure_http_client(|cfg| cfg.user_agent = Some("fonts-bot/2.0".into()));
/// ```
pub fn configure_http_client<F>(update: F)
where
    F: FnOnce(&mut ClientConfig),
{
    let mut state = CLIENT.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    update(&mut state.config);
    state.agent = state.config.build();
}
