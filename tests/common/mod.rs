//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use fs_dispatch::config::AppConfig;
use fs_dispatch::dispatch::{
    Dispatch, DispatcherOptions, LiveDispatcher, SharedDispatcher, TreeDispatcher, DEFAULT_INDICES,
};
use fs_dispatch::http::HttpServer;
use fs_dispatch::lifecycle::Shutdown;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Body written to every fixture file.
pub const GREETING: &str = "Greetings, program!";

/// Create fixture entries under `root`. Names ending in `/` are directories.
pub fn mk(root: &Path, entries: &[&str]) {
    for entry in entries {
        let path = root.join(entry.trim_start_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path).unwrap();
        } else {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, GREETING).unwrap();
        }
    }
}

/// A fresh www root holding `entries`.
pub fn www(entries: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    mk(dir.path(), entries);
    dir
}

/// Canonical path of `rel` under the www root.
pub fn resolve(www: &TempDir, rel: &str) -> PathBuf {
    www.path().canonicalize().unwrap().join(rel.trim_start_matches('/'))
}

/// Options used by most tests: default indices and `int`/`float` casts.
pub fn options(www: &TempDir) -> DispatcherOptions {
    DispatcherOptions::new(www.path())
        .indices(DEFAULT_INDICES)
        .typecasters(vec!["int".to_string(), "float".to_string()])
}

/// Both dispatcher variants over the same options, labelled for assertions.
pub fn dispatchers(options: DispatcherOptions) -> Vec<(&'static str, Box<dyn Dispatch>)> {
    vec![
        ("tree", Box::new(TreeDispatcher::build(&options).unwrap())),
        ("live", Box::new(LiveDispatcher::new(options).unwrap())),
    ]
}

/// Start the HTTP front over `www` on an ephemeral port.
pub async fn start_server(www: &TempDir) -> (SocketAddr, Arc<SharedDispatcher>, Shutdown) {
    let mut config = AppConfig::default();
    config.dispatch.www_root = www.path().to_path_buf();
    let dispatcher = Arc::new(SharedDispatcher::new(config.dispatch.to_options()).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, dispatcher.clone());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, dispatcher, shutdown)
}

/// A client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
