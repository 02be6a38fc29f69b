use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_LENGTH;
use axum::http::{Method, StatusCode, Uri};
use axum::response::Response;
use axum::Router;
use futures_util::stream;
use tokio::net::TcpListener;

#[derive(Clone)]
struct Route {
    status: u16,
    body: Vec<u8>,
    /// Advertise the full length but hang up halfway through the body.
    truncated: bool,
}

/// Throwaway axum server on 127.0.0.1 that answers from a route table and
/// records every request it sees.
#[derive(Clone)]
pub struct TestServer {
    base_url: String,
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = Self {
            base_url,
            routes: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new().fallback(answer).with_state(server.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        server
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn route(&self, path: &str, status: u16, body: &[u8]) {
        self.insert(path, status, body, false);
    }

    pub fn broken_route(&self, path: &str, body: &[u8]) {
        self.insert(path, 200, body, true);
    }

    fn insert(&self, path: &str, status: u16, body: &[u8], truncated: bool) {
        self.routes.lock().unwrap().insert(
            path.to_string(),
            Route {
                status,
                body: body.to_vec(),
                truncated,
            },
        );
    }

    /// `"METHOD /path"` for every request served so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn answer(State(server): State<TestServer>, method: Method, uri: Uri) -> Response {
    let path = uri.path().to_string();
    server.requests.lock().unwrap().push(format!("{method} {path}"));

    let route = server.routes.lock().unwrap().get(&path).cloned();
    let route = route.unwrap_or(Route {
        status: 404,
        body: b"not found".to_vec(),
        truncated: false,
    });

    // Set explicitly so HEAD answers carry the length too.
    let length = route.body.len();
    let body = if route.truncated {
        let half = Bytes::copy_from_slice(&route.body[..length / 2]);
        Body::from_stream(stream::iter(vec![
            Ok(half),
            Err(io::Error::other("connection cut")),
        ]))
    } else {
        Body::from(route.body)
    };

    Response::builder()
        .status(StatusCode::from_u16(route.status).unwrap())
        .header(CONTENT_LENGTH, length)
        .body(body)
        .unwrap()
}

pub fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"old").unwrap();
}

pub fn registry_json(server: &TestServer, mods: &[(&str, &str, &str)]) -> Vec<u8> {
    let map: serde_json::Map<String, serde_json::Value> = mods
        .iter()
        .map(|(name, version, path)| {
            (
                name.to_lowercase(),
                serde_json::json!({
                    "DisplayName": name,
                    "Version": version,
                    "DownloadUrl": server.url(path),
                }),
            )
        })
        .collect();
    serde_json::to_vec(&serde_json::Value::Object(map)).unwrap()
}
