use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::core::actions::render_tiles::ports::tile_event_sink::TransportError;
use crate::core::actions::render_tiles::render_tiles::RenderError;

pub const TEXT_PLAIN: &str = "text/plain; charset=UTF-8";
pub const APPLICATION_JSON: &str = "application/json";
pub const TEXT_EVENT_STREAM: &str = "text/event-stream";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// A body produced while it is being sent.
pub trait StreamingBody: Send {
    fn stream(self: Box<Self>, out: Box<dyn Write + Send>) -> Result<(), RenderError>;
}

pub enum Body {
    Text(String),
    Stream(Box<dyn StreamingBody>),
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

#[derive(Debug)]
pub struct Response {
    pub status: Status,
    pub content_type: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl Response {
    #[must_use]
    pub fn text(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN,
            headers: Vec::new(),
            body: Body::Text(message.into()),
        }
    }

    pub fn json<T: Serialize>(document: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status: Status::Ok,
            content_type: APPLICATION_JSON,
            headers: Vec::new(),
            body: Body::Text(serde_json::to_string(document)?),
        })
    }

    #[must_use]
    pub fn event_stream(body: Box<dyn StreamingBody>) -> Self {
        Self {
            status: Status::Ok,
            content_type: TEXT_EVENT_STREAM,
            headers: Vec::new(),
            body: Body::Stream(body),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The body text, or `None` for a streaming body.
    #[must_use]
    pub fn text_body(&self) -> Option<&str> {
        match &self.body {
            Body::Text(text) => Some(text),
            Body::Stream(_) => None,
        }
    }

    /// The status line and headers, one per line.
    #[must_use]
    pub fn head(&self) -> String {
        let mut head = format!("{}\nContent-Type: {}\n", self.status, self.content_type);
        for (name, value) in &self.headers {
            head.push_str(&format!("{}: {}\n", name, value));
        }
        head
    }

    pub fn write_body(self, mut out: Box<dyn Write + Send>) -> Result<(), RenderError> {
        match self.body {
            Body::Text(text) => {
                out.write_all(text.as_bytes())
                    .and_then(|()| out.flush())
                    .map_err(|err| RenderError::Transport(TransportError::Io(err)))
            }
            Body::Stream(body) => body.stream(out),
        }
    }
}
