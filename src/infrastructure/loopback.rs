//! One-shot loopback HTTP listener receiving the OAuth redirect.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use parking_lot::Mutex;
use reqwest::Url;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::errors::AuthError;

/// Body served once the authorization code has been received.
pub const SUCCESS_PAGE: &str =
    "success! you can now close this window and return to the Tukija application.";

const DENIED_PAGE: &str =
    "sign-in was not completed. you can close this window and try again from the Tukija application.";

/// Returned by the service for requests without OAuth parameters; hyper then
/// closes the connection without writing a response.
#[derive(Debug, Error)]
#[error("request carried no OAuth parameters")]
struct NotACallback;

/// Result of a redirect that carried OAuth parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    /// Authorization code granted.
    Code(String),
    /// Provider reported an error (e.g. `access_denied`).
    Denied(String),
}

/// Extracts OAuth redirect parameters from an HTTP request target.
///
/// Returns `None` for requests that carry neither a non-empty `code` nor an `error`.
#[must_use]
pub fn parse_callback(target: &str) -> Option<Callback> {
    let url = Url::parse("http://localhost/").ok()?.join(target).ok()?;

    let mut code = None;
    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" if !value.is_empty() => code = Some(value.into_owned()),
            "error" if !value.is_empty() => error = Some(value.into_owned()),
            _ => {}
        }
    }

    code.map(Callback::Code).or_else(|| error.map(Callback::Denied))
}

/// Listener bound to an ephemeral loopback port for a single handshake.
///
/// Consumed by [`LoopbackListener::wait_for_code`]; the socket is closed as soon as a
/// qualifying redirect has been answered.
pub struct LoopbackListener {
    listener: TcpListener,
    addr: SocketAddr,
}

impl LoopbackListener {
    /// Binds an OS-assigned port on `host`.
    ///
    /// # Errors
    /// Returns error if the socket cannot be bound.
    pub async fn bind(host: IpAddr) -> Result<Self, AuthError> {
        let listener = TcpListener::bind(SocketAddr::new(host, 0))
            .await
            .map_err(|e| AuthError::listener(format!("failed to bind {host}: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| AuthError::listener(e.to_string()))?;

        debug!(%addr, "Callback listener bound");
        Ok(Self { listener, addr })
    }

    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Redirect URI pointing at this listener, e.g. `http://[::1]:49152`.
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Waits for the first request carrying a `code` (or `error`) parameter.
    ///
    /// Every connection is served on its own task, so idle or slow sockets
    /// never hold up the redirect. Other requests are dropped unanswered.
    ///
    /// # Errors
    /// Returns `AuthorizationDenied` if the provider redirected with an error, or
    /// `ListenerFailed` if accepting connections fails.
    pub async fn wait_for_code(self) -> Result<String, AuthError> {
        let mut connections = JoinSet::new();

        let (callback, peer) = loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    let (stream, peer) = accepted
                        .map_err(|e| AuthError::listener(format!("accept failed: {e}")))?;
                    connections.spawn(serve_connection(stream, peer));
                }
                Some(finished) = connections.join_next() => match finished {
                    Ok(Some(callback)) => break callback,
                    Ok(None) => {}
                    Err(e) => debug!(error = %e, "Callback connection task failed"),
                },
            }
        };

        match callback {
            Callback::Code(code) => {
                info!(%peer, "Authorization code received");
                Ok(code)
            }
            Callback::Denied(reason) => {
                warn!(%peer, %reason, "Authorization denied by provider");
                Err(AuthError::denied(reason))
            }
        }
    }
}

/// Serves one connection until it closes, returning the callback it carried.
async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
) -> Option<(Callback, SocketAddr)> {
    let received = Arc::new(Mutex::new(None));
    let service = {
        let received = received.clone();
        service_fn(move |req| answer(req, received.clone()))
    };

    if let Err(e) = http1::Builder::new()
        .keep_alive(false)
        .serve_connection(TokioIo::new(stream), service)
        .await
    {
        debug!(%peer, error = %e, "Callback connection closed");
    }

    let callback = received.lock().take();
    callback.map(|callback| (callback, peer))
}

async fn answer(
    req: Request<Incoming>,
    received: Arc<Mutex<Option<Callback>>>,
) -> Result<Response<String>, NotACallback> {
    let callback = (req.method() == Method::GET)
        .then(|| req.uri().path_and_query())
        .flatten()
        .and_then(|target| parse_callback(target.as_str()))
        .ok_or(NotACallback)?;

    let (status, body) = match &callback {
        Callback::Code(_) => (StatusCode::OK, SUCCESS_PAGE),
        Callback::Denied(_) => (StatusCode::BAD_REQUEST, DENIED_PAGE),
    };
    *received.lock() = Some(callback);

    let mut response = Response::new(body.to_string());
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    Ok(response)
}
