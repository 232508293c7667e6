use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;
use uuid::Uuid;

use crate::api::events::Envelope;
use crate::chat::channel::{Channel, EventHandler, Handlers};
use crate::error::{ChatError, Result};

/// Real-time channel over a WebSocket carrying [`Envelope`] text frames.
///
/// Reading and writing run as tasks on the current runtime; both stop when the
/// channel is dropped.
pub struct WsChannel {
    id: String,
    handlers: Arc<Handlers>,
    outbound: mpsc::UnboundedSender<Message>,
    tasks: Vec<JoinHandle<()>>,
}

impl WsChannel {
    pub async fn connect(ws_url: &str) -> Result<Self> {
        let url = Url::parse(ws_url)?;
        let (ws_stream, _) = connect_async(url.as_str()).await?;
        let id = Uuid::new_v4().to_string();
        log::info!("WebSocket connected to {} as {}", url, id);

        let (mut sink, mut source) = ws_stream.split();
        let (outbound, mut rx) = mpsc::unbounded_channel::<Message>();
        let writer = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let Err(e) = sink.send(msg).await {
                    log::error!("WebSocket send failed: {e}");
                    break;
                }
            }
            let _ = sink.close().await;
        });

        let handlers = Arc::new(Handlers::default());
        let reader_handlers = handlers.clone();
        let reader = tokio::spawn(async move {
            while let Some(frame) = source.next().await {
                match frame {
                    Ok(Message::Text(text)) => match Envelope::decode(&text) {
                        Ok(env) => {
                            if !reader_handlers.dispatch(&env.event, env.data) {
                                log::debug!("No handler for {}", env.event);
                            }
                        }
                        Err(e) => log::warn!("Dropping undecodable frame: {e}"),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        log::error!("WebSocket read failed: {e}");
                        break;
                    }
                }
            }
            log::info!("WebSocket closed");
        });

        Ok(Self { id, handlers, outbound, tasks: vec![writer, reader] })
    }
}

impl Channel for WsChannel {
    fn id(&self) -> Option<String> {
        Some(self.id.clone())
    }

    fn on(&self, event: &str, handler: EventHandler) {
        self.handlers.insert(event, handler);
    }

    fn off(&self, event: &str) {
        self.handlers.remove(event);
    }

    fn emit(&self, event: &str, payload: Value) -> Result<()> {
        let text = Envelope::new(event, payload).encode()?;
        self.outbound.send(Message::Text(text)).map_err(|_| ChatError::ChannelClosed)
    }
}

impl Drop for WsChannel {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
