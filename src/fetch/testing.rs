//! Scripted transport for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::ImageTransport;
use crate::error::{FetchError, Result};

/// What the mock does for one call.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Ok,
    Status(u16),
    Hang,
    Panic,
}

/// Transport whose reply is chosen by the call ordinal.
pub struct MockTransport {
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
    script: Box<dyn Fn(usize) -> Reply + Send + Sync>,
}

impl MockTransport {
    pub fn new(script: impl Fn(usize) -> Reply + Send + Sync + 'static) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
            script: Box::new(script),
        }
    }

    pub fn always(reply: Reply) -> Self {
        Self::new(move |_| reply)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageTransport for MockTransport {
    async fn fetch(&self, url: &str) -> Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());

        match (self.script)(call) {
            Reply::Ok => Ok(()),
            Reply::Status(code) => Err(FetchError::Transport(format!(
                "HTTP error! status: {}",
                code
            ))),
            Reply::Hang => std::future::pending().await,
            Reply::Panic => panic!("transport crashed on call {}", call),
        }
    }
}
