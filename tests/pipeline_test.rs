//! End-to-end runs of the splitting pipeline against a local stub of the
//! Spotify Web API. The stub speaks just enough HTTP/1.1 for reqwest and
//! answers from a per-test handler, so cross-genre isolation and abort
//! behavior can be observed on the real orchestrator code path.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use reqwest::Client;
use serde_json::json;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

use sposplit::error::SplitError;
use sposplit::split::{CancelFlag, split_playlist};
use sposplit::types::{Playlist, PlaylistTracksRef, SplitStatus};

/// The API base URL override is process-global, so every test that points the
/// client at a stub server holds this lock for its whole duration.
static ENV_LOCK: Mutex<()> = Mutex::new(());

type StubHandler = Arc<dyn Fn(&str, &str) -> (u16, String) + Send + Sync>;

fn point_api_at(url: &str) {
    // Safety: the caller holds ENV_LOCK, so nothing reads or writes the
    // variable concurrently.
    unsafe { std::env::set_var("SPOTIFY_API_URL", url) };
}

/// Binds a listener on an ephemeral port and serves `handler(method, path)`
/// responses until the test's runtime is torn down.
async fn spawn_stub(handler: StubHandler) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(handle_connection(stream, handler.clone()));
        }
    });

    url
}

async fn handle_connection(mut stream: TcpStream, handler: StubHandler) {
    let mut buf: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];

    // One request per iteration; the connection is kept open for reuse.
    loop {
        let header_end = loop {
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.lines();
        let request_line = lines.next().unwrap_or_default();
        let mut parts = request_line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();
        let content_length = lines
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
        buf.drain(..header_end + content_length);

        let (status, body) = handler(&method, &path);
        let reason = match status {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            400 => "Bad Request",
            401 => "Unauthorized",
            404 => "Not Found",
            _ => "Error",
        };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {len}\r\n\r\n{body}",
            len = body.len(),
        );
        if stream.write_all(response.as_bytes()).await.is_err() {
            return;
        }
    }
}

fn source_playlist(total: u64) -> Playlist {
    Playlist {
        id: "src1".to_string(),
        name: "Mixed Bag".to_string(),
        tracks: PlaylistTracksRef {
            href: String::new(),
            total,
        },
    }
}

fn tracks_page(entries: &[(&str, &str)]) -> String {
    let items: Vec<_> = entries
        .iter()
        .map(|(track_id, artist_id)| {
            json!({"track": {"id": track_id, "artists": [{"id": artist_id, "name": "someone"}]}})
        })
        .collect();
    json!({"items": items, "next": null}).to_string()
}

fn artist_body(id: &str, genres: &[&str]) -> String {
    json!({"id": id, "name": "someone", "genres": genres}).to_string()
}

#[tokio::test]
async fn test_create_failure_for_one_genre_does_not_stop_the_rest() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let creates = Arc::new(AtomicUsize::new(0));
    let handler: StubHandler = {
        let creates = creates.clone();
        Arc::new(move |method, path| match (method, path) {
            ("GET", p) if p.starts_with("/playlists/src1/tracks") => (
                200,
                tracks_page(&[("t1", "a1"), ("t2", "a2"), ("t3", "a3")]),
            ),
            ("GET", "/artists/a1") => (200, artist_body("a1", &["jazz"])),
            ("GET", "/artists/a2") => (200, artist_body("a2", &["rock"])),
            ("GET", "/artists/a3") => (404, json!({"error": {"status": 404}}).to_string()),
            ("POST", "/users/user1/playlists") => {
                let n = creates.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    (
                        400,
                        json!({"error": {"status": 400, "message": "bad request"}}).to_string(),
                    )
                } else {
                    (
                        201,
                        json!({"id": format!("pl-{n}"), "name": "created"}).to_string(),
                    )
                }
            }
            ("PUT", p) if p.ends_with("/images") => (202, String::new()),
            ("POST", p) if p.starts_with("/playlists/pl-") && p.ends_with("/tracks") => {
                (201, json!({"snapshot_id": "snap"}).to_string())
            }
            _ => (404, String::new()),
        })
    };

    let url = spawn_stub(handler).await;
    point_api_at(&url);

    let cancel = CancelFlag::new();
    let outcome = split_playlist(
        &Client::new(),
        "token-1",
        "user1",
        &source_playlist(3),
        &cancel,
    )
    .await;

    assert!(outcome.aborted.is_none());
    assert_eq!(outcome.results.len(), 3);

    // The jazz create was rejected; only that genre fails
    assert_eq!(outcome.results[0].genre, "jazz");
    assert_eq!(outcome.results[0].status, SplitStatus::Failure);
    assert!(outcome.results[0].destination_playlist_id.is_none());
    assert_eq!(outcome.results[0].track_count, 0);

    assert_eq!(outcome.results[1].genre, "rock");
    assert_eq!(outcome.results[1].status, SplitStatus::Success);
    assert_eq!(
        outcome.results[1].destination_playlist_id.as_deref(),
        Some("pl-1")
    );
    assert_eq!(outcome.results[1].track_count, 1);

    // The 404 artist degraded to unclassified instead of aborting the run
    assert_eq!(outcome.results[2].genre, "unclassified");
    assert_eq!(outcome.results[2].status, SplitStatus::Success);
    assert_eq!(outcome.results[2].track_count, 1);

    // One creation attempt per genre, the rejected one included
    assert_eq!(creates.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_auth_rejection_during_resolution_aborts_before_any_create() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let creates = Arc::new(AtomicUsize::new(0));
    let handler: StubHandler = {
        let creates = creates.clone();
        Arc::new(move |method, path| match (method, path) {
            ("GET", p) if p.starts_with("/playlists/src1/tracks") => {
                (200, tracks_page(&[("t1", "a1"), ("t2", "a2")]))
            }
            ("GET", p) if p.starts_with("/artists/") => {
                (401, json!({"error": {"status": 401}}).to_string())
            }
            ("POST", "/users/user1/playlists") => {
                creates.fetch_add(1, Ordering::SeqCst);
                (201, json!({"id": "pl-0", "name": "created"}).to_string())
            }
            _ => (404, String::new()),
        })
    };

    let url = spawn_stub(handler).await;
    point_api_at(&url);

    let cancel = CancelFlag::new();
    let outcome = split_playlist(
        &Client::new(),
        "dead-token",
        "user1",
        &source_playlist(2),
        &cancel,
    )
    .await;

    assert!(matches!(outcome.aborted, Some(SplitError::Auth(_))));
    assert!(outcome.results.is_empty());
    assert_eq!(creates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_auth_rejection_on_cover_upload_aborts_the_run() {
    let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let adds = Arc::new(AtomicUsize::new(0));
    let handler: StubHandler = {
        let adds = adds.clone();
        Arc::new(move |method, path| match (method, path) {
            ("GET", p) if p.starts_with("/playlists/src1/tracks") => {
                (200, tracks_page(&[("t1", "a1")]))
            }
            ("GET", "/artists/a1") => (200, artist_body("a1", &["rock"])),
            ("POST", "/users/user1/playlists") => {
                (201, json!({"id": "pl-0", "name": "created"}).to_string())
            }
            ("PUT", "/playlists/pl-0/images") => {
                (401, json!({"error": {"status": 401}}).to_string())
            }
            ("POST", "/playlists/pl-0/tracks") => {
                adds.fetch_add(1, Ordering::SeqCst);
                (201, json!({"snapshot_id": "snap"}).to_string())
            }
            _ => (404, String::new()),
        })
    };

    let url = spawn_stub(handler).await;
    point_api_at(&url);

    let cancel = CancelFlag::new();
    let outcome = split_playlist(
        &Client::new(),
        "dying-token",
        "user1",
        &source_playlist(1),
        &cancel,
    )
    .await;

    // The token died mid-run: no track add is attempted with it
    assert!(matches!(outcome.aborted, Some(SplitError::Auth(_))));
    assert!(outcome.results.is_empty());
    assert_eq!(adds.load(Ordering::SeqCst), 0);
}
