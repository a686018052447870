//! Local HTTP fixtures for tests across the workspace.

use std::{collections::HashMap, io::Cursor, net::TcpListener, thread};

use tiny_http::{Response, Server, StatusCode};

/// Canned response for a request path.
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_length: bool,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            content_length: true,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            content_length: true,
        }
    }

    /// Sends the body chunked, without a `Content-Length` header.
    pub fn without_length(mut self) -> Self {
        self.content_length = false;
        self
    }
}

/// Serves `routes` on an ephemeral local port and returns its base URL.
///
/// Unknown paths answer 404. The server thread lives until the test process exits.
pub fn serve(routes: Vec<(&str, Route)>) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let routes: HashMap<String, Route> = routes
        .into_iter()
        .map(|(path, route)| (path.to_string(), route))
        .collect();

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = match routes.get(request.url()) {
                Some(route) => Response::new(
                    StatusCode(route.status),
                    Vec::new(),
                    Cursor::new(route.body.clone()),
                    route.content_length.then_some(route.body.len()),
                    None,
                ),
                None => Response::new(StatusCode(404), Vec::new(), Cursor::new(Vec::new()), Some(0), None),
            };

            if let Err(err) = request.respond(response) {
                eprintln!("test server failed to respond: {err}");
            }
        }
    });

    format!("http://{addr}")
}

/// A URL on a local port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/feed")
}
