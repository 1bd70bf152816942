use crate::completion::CompletionClient;
use crate::config::AppConfig;
use crate::http::{create_app, HttpState};
use crate::outbound::MessagingClient;
use crate::relay::RelayService;
use crate::TracingReloadHandle;
use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::{error, info};

pub struct AppHandles {
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}
impl AppHandles {
    pub fn new(config: AppConfig, tracing_reload: TracingReloadHandle) -> Result<AppHandles> {
        // Both clients are constructed once here and injected into the HTTP
        // state, they are the only resources shared across requests.
        let completion = CompletionClient::new(&config.completion)
            .context("Failed to create completion API client")?;
        let messaging = MessagingClient::new(&config.messaging)
            .context("Failed to create messaging API client")?;

        let state = HttpState {
            relay: RelayService::new(completion),
            messaging,
            tracing_reload,
        };

        let address = config.http.address;
        let app = create_app(state);
        let http_handle = tokio::spawn(async move {
            info!("Starting HTTP server on {address}");
            if let Err(e) = axum_server::bind(address)
                .serve(app.into_make_service())
                .await
            {
                error!("Server error: {e:?}");
            }
        });

        Ok(AppHandles {
            tasks: vec![("HTTP Server", http_handle)],
        })
    }

    pub async fn run(self) {
        let futures: Vec<_> = self
            .tasks
            .into_iter()
            .map(|(name, handle)| {
                info!("Starting task: {name}");
                Box::pin(async move {
                    match handle.await {
                        Ok(_) => error!("{name} task completed!"),
                        Err(e) => error!("{name} task failed: {e:?}!"),
                    }
                })
            })
            .collect();

        // Wait for any task to complete. All handles are boxed, so when dropped they are cancelled.
        let (_, _, remaining) = futures::future::select_all(futures).await;
        drop(remaining);
    }
}
