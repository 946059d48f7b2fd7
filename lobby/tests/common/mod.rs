//! In-process mock backend for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock backend serving `router` on an ephemeral local port
pub struct MockBackend {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Serve `router` under `/api/v1` and count every request it receives
    pub async fn start(router: Router) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        let count_requests = middleware::from_fn(move |request: Request, next: Next| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                next.run(request).await
            }
        });
        let app = Router::new().nest("/api/v1", router).layer(count_requests);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock backend failed");
        });

        Self {
            base_url: format!("http://{}/api/v1", addr),
            hits,
        }
    }

    /// Number of requests served so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Base URL where nothing is listening
pub fn unreachable_base_url() -> String {
    "http://127.0.0.1:9/api/v1".to_string()
}
