//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use stat_server::clock::SystemClock;
use stat_server::config::{FetchMode, StatServerConfig};
use stat_server::load_balancer::RandomSelector;
use stat_server::{CommandInterpreter, HttpServer, Outcome, RemoteFetcher, StatCache};

/// Requests seen by a mock upstream, as request paths without the leading `/`.
#[derive(Debug, Default, Clone)]
pub struct RequestLog {
    paths: Arc<Mutex<Vec<String>>>,
}

impl RequestLog {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.paths.lock().unwrap().len()
    }

    fn push(&self, path: String) {
        self.paths.lock().unwrap().push(path);
    }
}

async fn read_request_path(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let head = String::from_utf8_lossy(&buf);
    let path = head.lines().next()?.split_whitespace().nth(1)?;
    Some(path.trim_start_matches('/').to_string())
}

/// Start a mock stat proxy on an ephemeral port.
///
/// `f` receives the request path (without the leading `/`) and returns the
/// status code and body to send.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> (SocketAddr, RequestLog)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = RequestLog::default();
    let f = Arc::new(f);

    let requests = log.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let requests = requests.clone();
                    tokio::spawn(async move {
                        let Some(path) = read_request_path(&mut socket).await else {
                            return;
                        };
                        requests.push(path.clone());

                        let (status, body) = f(path).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

/// Upstream that answers single lookups with a fixed fragment and batch
/// lookups with `10-50` per id.
pub async fn start_stat_upstream() -> (SocketAddr, RequestLog) {
    start_programmable_upstream(|path| async move {
        match path.strip_suffix(".xml") {
            Some(id) => (200, format!(r#"<user nick="{}" battles="5" wins="60"/>"#, id)),
            None => {
                let tokens: Vec<&str> = path.split(',').map(|_| "10-50").collect();
                (200, tokens.join(","))
            }
        }
    })
    .await
}

/// Configuration pointing a single-endpoint pool at `upstream`.
pub fn config_for(upstream: SocketAddr, mode: FetchMode) -> StatServerConfig {
    let mut config = StatServerConfig::default();
    config.upstream.host_template = upstream.to_string();
    config.upstream.pool_size = 1;
    config.upstream.fetch_mode = mode;
    config.settings.timeout_ms = 500;
    config
}

pub fn interpreter(config: &StatServerConfig) -> CommandInterpreter<RemoteFetcher> {
    let fetcher = RemoteFetcher::new(
        &config.upstream,
        config.settings.timeout(),
        Box::new(RandomSelector::seeded(7)),
    )
    .unwrap();
    CommandInterpreter::new(StatCache::from_config(fetcher, config, SystemClock::shared()))
}

/// Running adapter. Dropping it stops the server.
pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    pub fn url(&self, name: &str) -> url::Url {
        let mut url = url::Url::parse(&format!("http://{}/", self.addr)).unwrap();
        url.path_segments_mut().unwrap().pop_if_empty().push(name);
        url
    }
}

/// Start the HTTP adapter on an ephemeral port.
pub async fn start_server(config: &StatServerConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let server = HttpServer::new(Arc::new(interpreter(config)), &config.listener);
    tokio::spawn(async move {
        let _ = server
            .run(listener, async move {
                let _ = rx.await;
            })
            .await;
    });
    TestServer {
        addr,
        _shutdown: tx,
    }
}

/// One host open as the host performs it: stat, then open and read.
pub async fn open(
    interpreter: &CommandInterpreter<RemoteFetcher>,
    name: &str,
) -> Outcome<Vec<u8>> {
    match interpreter.stat(name).await {
        Outcome::Ok(_) => interpreter.read(name).await,
        Outcome::Skip => Outcome::Skip,
        Outcome::Fail(kind) => Outcome::Fail(kind),
    }
}

/// Payload text after the BOM, decoded as Latin-1.
pub fn payload_text(bytes: &[u8]) -> String {
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    bytes[3..].iter().map(|&b| char::from(b)).collect()
}

/// Address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
