mod common;

use reqwest::blocking::Client;
use tempfile::tempdir;

use common::{unreachable_url, zip_archive, PageServer};
use tldr_cache::cache::store::CacheStore;
use tldr_cache::{CacheConfig, Fetch, HttpFetcher, Locale, PageRepository, TldrError};

/// Direct connections only, so a proxy in the environment cannot intercept localhost
fn fetcher() -> HttpFetcher {
    HttpFetcher::new(Client::builder().no_proxy().build().unwrap())
}

fn pages_archive() -> Vec<u8> {
    zip_archive(&[
        ("pages/common/lsof.md", "# lsof"),
        ("pages/common/git-checkout.md", "# git checkout"),
    ])
}

#[test]
fn not_found_status_is_transport_error() {
    let server = PageServer::start(&[]);

    let err = fetcher()
        .fetch(&server.url("/assets/tldr.zip"))
        .unwrap_err();

    match err {
        TldrError::Transport { url, message } => {
            assert!(url.ends_with("/assets/tldr.zip"));
            assert!(message.contains("404"), "{}", message);
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    assert_eq!(server.request_count("/assets/tldr.zip"), 1);
}

#[test]
fn unreachable_server_is_transport_error() {
    let err = fetcher()
        .fetch(&unreachable_url("/assets/tldr.zip"))
        .unwrap_err();
    assert!(matches!(err, TldrError::Transport { .. }), "{:?}", err);
}

#[test]
fn refresh_downloads_and_extracts_archive() {
    let server = PageServer::start(&[
        ("/assets/index.json", b"{\"commands\":[]}".to_vec()),
        ("/assets/tldr.zip", pages_archive()),
    ]);
    let temp = tempdir().unwrap();
    let root = temp.path().join(".tldr");
    let config = CacheConfig::builder(&root)
        .archive_url(server.url("/assets/tldr.zip"))
        .index_url(server.url("/assets/index.json"))
        .build()
        .unwrap();

    let store = CacheStore::new(config.clone(), Box::new(fetcher()));
    store.refresh().unwrap();

    assert_eq!(
        std::fs::read(root.join("tldr.zip")).unwrap(),
        pages_archive()
    );
    assert!(root.join("index.json").exists());
    assert_eq!(server.request_count("/assets/tldr.zip"), 1);
    assert_eq!(server.request_count("/assets/index.json"), 1);

    let repo = PageRepository::with_fetcher(
        config,
        &Locale::new("en_US.UTF-8", ""),
        Box::new(fetcher()),
    );
    assert!(!repo.on_initialize().unwrap());
    assert_eq!(
        repo.find_page(&["git", "checkout"]).unwrap().content,
        "# git checkout"
    );
}

#[test]
fn refresh_with_missing_archive_is_transport_error() {
    let server = PageServer::start(&[("/assets/index.json", b"{}".to_vec())]);
    let temp = tempdir().unwrap();
    let config = CacheConfig::builder(temp.path())
        .archive_url(server.url("/assets/tldr.zip"))
        .index_url(server.url("/assets/index.json"))
        .build()
        .unwrap();

    let store = CacheStore::new(config, Box::new(fetcher()));
    assert!(matches!(store.refresh(), Err(TldrError::Transport { .. })));
    assert!(!store.is_populated());
}

#[test]
fn refresh_with_html_body_is_decode_error() {
    let server = PageServer::start(&[
        ("/assets/index.json", b"{}".to_vec()),
        ("/index.html", b"<!doctype html><title>Moved</title>".to_vec()),
    ]);
    let temp = tempdir().unwrap();
    let config = CacheConfig::builder(temp.path())
        .archive_url(server.url("/index.html"))
        .index_url(server.url("/assets/index.json"))
        .build()
        .unwrap();

    let store = CacheStore::new(config, Box::new(fetcher()));
    assert!(matches!(store.refresh(), Err(TldrError::Decode(_))));
}
