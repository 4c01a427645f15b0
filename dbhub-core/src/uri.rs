use crate::DatabaseError;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use url::Url;
use urlencoding::decode;

/// A parsed `dialect://[user[:password]@]host[:port]/schema[?options]` connection string.
///
/// Parsing only checks the shape; whether a driver supports the dialect is decided by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUri {
    dialect: String,
    schema: String,
    raw: String,
}

impl ConnectionUri {
    pub fn parse(uri: &str) -> Result<Self, DatabaseError> {
        let url = Url::parse(uri).map_err(|_| DatabaseError::InvalidUri)?;
        if !url.host_str().is_some_and(|v| !v.is_empty()) {
            return Err(DatabaseError::InvalidUri);
        }
        let schema = url
            .path()
            .rsplit('/')
            .next()
            .filter(|_| url.path().starts_with('/'))
            .unwrap_or_default();
        if schema.is_empty() {
            return Err(DatabaseError::InvalidUri);
        }
        let schema = decode(schema).map_err(|_| DatabaseError::InvalidUri)?;
        Ok(Self {
            dialect: url.scheme().to_owned(),
            schema: schema.into_owned(),
            raw: uri.to_owned(),
        })
    }

    /// Scheme of the URI, lowercase.
    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    /// Last path segment, percent decoded.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// The connection string exactly as it was given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Same URI with the password masked, suitable for logs and error contexts.
    pub fn redacted(&self) -> String {
        redact_password(&self.raw)
    }
}

/// Masks the password of a URL, returns the input unchanged if it is not a URL.
pub fn redact_password(uri: &str) -> String {
    match Url::parse(uri) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.into()
        }
        _ => uri.to_owned(),
    }
}

impl FromStr for ConnectionUri {
    type Err = DatabaseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for ConnectionUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
