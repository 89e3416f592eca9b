//! Continuation-based web requests.
//!
//! The game-event thread must never block on the network, so every GET is
//! enqueued with a completion handler that fires later with the HTTP
//! status and body. Transport failures surface as status `0` with no body,
//! which funnels every handler through the same non-200 failure path.

use std::thread;
use std::time::Duration;

/// Completion handler invoked with `(status, body)` once the request
/// finishes. Status `0` means the request never reached the server.
pub type ResponseHandler = Box<dyn FnOnce(u16, Option<String>) + Send + 'static>;

/// Non-blocking GET issuer. Implementations must return immediately; the
/// handler runs on whatever thread completes the request.
pub trait WebRequester: Send + Sync {
    fn enqueue_get(&self, url: &str, on_done: ResponseHandler);
}

/// Production requester: one spawned thread per request over a shared
/// agent. Single attempt, bounded timeout, no retry, no cancellation.
pub struct UreqRequester {
    agent: ureq::Agent,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

impl UreqRequester {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self { agent }
    }
}

impl Default for UreqRequester {
    fn default() -> Self {
        Self::new()
    }
}

impl WebRequester for UreqRequester {
    fn enqueue_get(&self, url: &str, on_done: ResponseHandler) {
        let agent = self.agent.clone();
        let url = url.to_string();

        thread::spawn(move || {
            let (status, body) = match agent.get(&url).call() {
                Ok(response) => {
                    let status = response.status();
                    (status, response.into_string().ok())
                }
                // Non-2xx responses still carry a status and maybe a body.
                Err(ureq::Error::Status(code, response)) => (code, response.into_string().ok()),
                Err(err) => {
                    log::warn!("request to {} failed: {}", url, err);
                    (0, None)
                }
            };
            on_done(status, body);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_unreachable_host_reports_transport_failure() {
        // Port 9 on localhost is the discard port; nothing answers there.
        let requester = UreqRequester::new();
        let (tx, rx) = mpsc::channel();
        requester.enqueue_get(
            "http://127.0.0.1:9/stats",
            Box::new(move |status, body| {
                let _ = tx.send((status, body));
            }),
        );

        let (status, body) = rx.recv_timeout(Duration::from_secs(15)).unwrap();
        assert_eq!(status, 0);
        assert!(body.is_none());
    }

    #[test]
    fn test_enqueue_does_not_block_caller() {
        let requester = UreqRequester::new();
        let start = std::time::Instant::now();
        requester.enqueue_get("http://127.0.0.1:9/podium", Box::new(|_, _| {}));
        // The call returns before the connection attempt resolves.
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
