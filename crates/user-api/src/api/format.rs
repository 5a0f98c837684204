//! JSON and XML content negotiation.
//!
//! Request bodies are read as XML when `Content-Type` is `application/xml` or
//! `text/xml` and as JSON otherwise. Responses follow the highest ranked
//! `Accept` media type that is supported; anything else gets JSON.

use crate::api::error::ApiError;
use crate::model::User;
use actix_web::http::header::{Accept, Header};
use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, HttpResponseBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

const XML_TYPES: [&str; 2] = ["application/xml", "text/xml"];
const JSON_TYPES: [&str; 2] = ["application/json", "text/json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    fn from_essence(essence: &str) -> Option<Self> {
        if XML_TYPES.contains(&essence) {
            Some(Self::Xml)
        } else if JSON_TYPES.contains(&essence) {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// Format of the request body.
    pub fn of_request(req: &HttpRequest) -> Self {
        if XML_TYPES.contains(&req.content_type()) {
            Self::Xml
        } else {
            Self::Json
        }
    }

    /// Format the client asked for in `Accept`.
    pub fn preferred(req: &HttpRequest) -> Self {
        let Ok(accept) = Accept::parse(req) else {
            return Self::Json;
        };
        accept
            .ranked()
            .iter()
            .find_map(|mime| Self::from_essence(mime.essence_str()))
            .unwrap_or(Self::Json)
    }

    /// Decodes a request body. Empty and `null` bodies are rejected.
    pub fn parse_body<T: DeserializeOwned>(self, body: &[u8]) -> Result<T, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::MalformedRequest("request body is empty".into()));
        }
        let parsed: Option<T> = match self {
            Self::Json => serde_json::from_slice(body)
                .map_err(|e| ApiError::MalformedRequest(e.to_string()))?,
            Self::Xml => {
                let text = std::str::from_utf8(body)
                    .map_err(|e| ApiError::MalformedRequest(e.to_string()))?;
                Some(
                    quick_xml::de::from_str(text)
                        .map_err(|e| ApiError::MalformedRequest(e.to_string()))?,
                )
            }
        };
        parsed.ok_or_else(|| ApiError::MalformedRequest("request body is null".into()))
    }

    /// Renders `value` with the given status.
    pub fn respond<T: Serialize>(self, status: StatusCode, value: &T) -> HttpResponse {
        self.render(HttpResponse::build(status), value)
    }

    pub fn render<T: Serialize>(self, mut builder: HttpResponseBuilder, value: &T) -> HttpResponse {
        match self {
            Self::Json => builder.json(value),
            Self::Xml => match quick_xml::se::to_string(value) {
                Ok(xml) => builder.content_type("application/xml").body(xml),
                Err(e) => {
                    warn!(error = %e, "failed to serialize XML response");
                    actix_web::ResponseError::error_response(&ApiError::Internal(e.to_string()))
                }
            },
        }
    }
}

/// XML wrapper for a list of users: `<ArrayOfUser><User>..</User></ArrayOfUser>`.
///
/// JSON renders the plain array instead.
#[derive(Debug, Serialize)]
#[serde(rename = "ArrayOfUser")]
pub struct UserList<'a> {
    #[serde(rename = "User")]
    pub users: &'a [User],
}

/// Renders a list of users in either format.
pub fn respond_list(format: Format, users: &[User]) -> HttpResponse {
    match format {
        Format::Json => format.respond(StatusCode::OK, &users),
        Format::Xml => format.respond(StatusCode::OK, &UserList { users }),
    }
}
