//! Shared helpers for integration tests
//!
//! `PageServer` serves fixed bodies over HTTP on `127.0.0.1:0` and counts
//! requests per path, so refreshes can run against the real transport.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Build a zip archive from `(path, content)` pairs
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in entries {
        writer.start_file(*path, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Local HTTP server answering known paths with 200 and everything else with 404
pub struct PageServer {
    addr: SocketAddr,
    request_counts: Arc<Mutex<HashMap<String, usize>>>,
}

impl PageServer {
    pub fn start(routes: &[(&str, Vec<u8>)]) -> Self {
        let bodies: Arc<HashMap<String, Vec<u8>>> = Arc::new(
            routes
                .iter()
                .map(|(path, body)| (path.to_string(), body.clone()))
                .collect(),
        );
        let request_counts = Arc::new(Mutex::new(HashMap::new()));

        let router = axum::Router::new().fallback(axum::routing::get({
            let bodies = bodies.clone();
            let request_counts = request_counts.clone();
            move |OriginalUri(uri): OriginalUri| {
                let bodies = bodies.clone();
                let request_counts = request_counts.clone();
                async move { serve(uri.path(), &bodies, &request_counts) }
            }
        }));

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind page server");
        listener
            .set_nonblocking(true)
            .expect("set_nonblocking page server");
        let addr = listener.local_addr().expect("page server addr");

        // The client under test is blocking, so the server gets its own runtime thread
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("page server runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, router).await.expect("serve pages");
            });
        });

        Self {
            addr,
            request_counts,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn request_count(&self, path: &str) -> usize {
        let counts = self.request_counts.lock().unwrap();
        counts.get(path).copied().unwrap_or(0)
    }
}

fn serve(
    path: &str,
    bodies: &HashMap<String, Vec<u8>>,
    request_counts: &Mutex<HashMap<String, usize>>,
) -> Response {
    *request_counts
        .lock()
        .unwrap()
        .entry(path.to_string())
        .or_insert(0) += 1;

    match bodies.get(path) {
        Some(body) => (StatusCode::OK, body.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// URL on which nothing is listening
pub fn unreachable_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr = listener.local_addr().expect("free port addr");
    drop(listener);
    format!("http://{}{}", addr, path)
}
