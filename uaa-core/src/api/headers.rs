//! Request headers the UAA API cares about

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiHeader {
    Authorization,
    IfMatch,
    ZoneId,
}

impl ApiHeader {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiHeader::Authorization => "Authorization",
            ApiHeader::IfMatch => "If-Match",
            ApiHeader::ZoneId => "X-Identity-Zone-Id",
        }
    }
}

impl fmt::Display for ApiHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
