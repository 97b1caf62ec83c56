//! Request path decoding.

use percent_encoding::percent_decode_str;

/// Errors raised while decoding a raw request path.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    #[error("segment {segment:?} is not valid UTF-8 once percent-decoded")]
    InvalidEncoding { segment: String },
}

/// A request path split into decoded segments.
///
/// `/foo;a=1/b%C3%A4r/` becomes the segments `["foo", "bär", ""]`. A trailing
/// slash yields a trailing empty segment, which is how directory requests
/// reach the index lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    decoded: String,
    segments: Vec<String>,
}

impl RequestPath {
    /// Parse a raw URL path with the query string already removed.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let rooted = raw.strip_prefix('/').unwrap_or(raw);
        let segments = rooted
            .split('/')
            .map(|segment| {
                let segment = segment.split(';').next().unwrap_or_default();
                percent_decode_str(segment)
                    .decode_utf8()
                    .map(|decoded| decoded.into_owned())
                    .map_err(|_| PathError::InvalidEncoding {
                        segment: segment.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let decoded = format!("/{}", segments.join("/"));
        Ok(Self { decoded, segments })
    }

    /// The decoded path, always starting with `/`.
    pub fn decoded(&self) -> &str {
        &self.decoded
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}
