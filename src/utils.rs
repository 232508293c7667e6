use once_cell::sync::Lazy;
use tokio::sync::oneshot;
use url::Url;

use crate::error::{ChatError, Result};

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

pub fn spawn_async<F>(fut: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    RUNTIME.spawn(fut);
}

/// Runs `fut` on the shared runtime and hands its result back through a oneshot
/// the UI thread can await on its own executor.
pub fn run_async_to_main<T, E, Fut>(fut: Fut) -> oneshot::Receiver<Result<T, E>>
where
    T: Send + 'static,
    E: Send + 'static,
    Fut: std::future::Future<Output = Result<T, E>> + Send + 'static,
{
    let (tx, rx) = oneshot::channel::<Result<T, E>>();
    spawn_async(async move {
        let res = fut.await;
        let _ = tx.send(res);
    });
    rx
}

pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// `https://host` -> `wss://host/socket`; an existing path is kept.
pub fn websocket_url(base_url: &str) -> Result<String> {
    let mut url = Url::parse(&normalize_url(base_url))?;
    let scheme = if url.scheme() == "http" { "ws" } else { "wss" };
    url.set_scheme(scheme)
        .map_err(|_| ChatError::Config(format!("cannot derive socket URL from {base_url}")))?;
    if url.path() == "/" {
        url.set_path("/socket");
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_https_when_missing() {
        assert_eq!(normalize_url("  chat.example.com "), "https://chat.example.com");
        assert_eq!(normalize_url("http://localhost:3000"), "http://localhost:3000");
    }

    #[test]
    fn socket_url_from_base() {
        assert_eq!(websocket_url("http://localhost:3000").unwrap(), "ws://localhost:3000/socket");
        assert_eq!(websocket_url("chat.example.com/rt").unwrap(), "wss://chat.example.com/rt");
    }

    #[test]
    fn run_async_delivers_result() {
        let rx = run_async_to_main(async { Ok::<_, ChatError>(7) });
        assert_eq!(rx.blocking_recv().unwrap().unwrap(), 7);
    }
}
