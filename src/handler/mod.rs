//! The card-handler contract and the response-capture adapter.
//!
//! Upstream card renderers are written against an HTTP response object, not a
//! return value. [`capture`] hands a handler a fake response whose terminating
//! calls fill a single-assignment slot, then pulls the SVG back out of it.

use std::collections::HashMap;

use anyhow::Result;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::RenderError;

/// Query parameters for one card render, analogous to URL query parameters.
pub type Query = HashMap<String, String>;

/// An external card renderer: reads `req.query`, terminates via `res.send`
/// or `res.end`. Anything else it does internally is opaque to us.
pub trait Handler: Send + Sync {
    fn handle<'a>(&'a self, req: &'a Request, res: &'a mut Response) -> BoxFuture<'a, Result<()>>;
}

#[derive(Debug, Clone)]
pub struct Request {
    pub query: Query,
}

/// Minimal fake of an HTTP response. Headers are ignored, the status code is
/// recorded, and the first `send`/`end` payload wins; later terminating calls
/// are accepted silently and do not override the captured value.
///
/// Upstream handlers are dynamically typed, so the payload is a JSON value
/// rather than a string; only a string payload is a valid card.
#[derive(Debug)]
pub struct Response {
    status: u16,
    body: Option<Value>,
}

impl Response {
    pub fn new() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }

    pub fn set_header(&mut self, _name: &str, _value: &str) {}

    pub fn status(&mut self, code: u16) -> &mut Self {
        self.status = code;
        self
    }

    pub fn send(&mut self, payload: impl Into<Value>) {
        if self.body.is_none() {
            self.body = Some(payload.into());
        }
    }

    pub fn end(&mut self, payload: impl Into<Value>) {
        self.send(payload);
    }

    fn into_svg(self) -> Result<String, RenderError> {
        match self.body {
            Some(Value::String(svg)) => Ok(svg),
            other => Err(RenderError::UnexpectedResponseShape {
                actual: value_kind(other.as_ref()),
                status: self.status,
            }),
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

fn value_kind(value: Option<&Value>) -> &'static str {
    match value {
        None => "none",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Runs a handler against a fresh request/response pair and returns whatever
/// it sent. Handler failures propagate unchanged; a completed handler that
/// never sent a string fails with [`RenderError::UnexpectedResponseShape`].
pub async fn capture(handler: &dyn Handler, query: Query) -> Result<String> {
    let req = Request { query };
    let mut res = Response::new();
    handler.handle(&req, &mut res).await?;
    Ok(res.into_svg()?)
}
