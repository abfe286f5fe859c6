//! HTTP method as a typed enum.
//!
//! Only the methods the router serves. `HEAD` is answered from the `GET`
//! routes; any other method never matches a route and falls through to
//! `404 Not Found`.

use std::str::FromStr;

/// A routable HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Head,
    Post,
}

impl Method {
    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get  => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
        }
    }

    /// The method whose routes serve this one.
    pub(crate) fn routed_as(self) -> Self {
        match self {
            Self::Head => Self::Get,
            other => other,
        }
    }
}

/// Parses an uppercase method string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET"  => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            _      => Err(()),
        }
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = ();

    fn try_from(m: &http::Method) -> Result<Self, Self::Error> {
        m.as_str().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!("POST".parse::<Method>(), Ok(Method::Post));
        assert_eq!("post".parse::<Method>(), Err(()));
        assert_eq!("PUT".parse::<Method>(), Err(()));
    }

    #[test]
    fn head_is_routed_as_get() {
        assert_eq!(Method::Head.routed_as(), Method::Get);
        assert_eq!(Method::Post.routed_as(), Method::Post);
    }
}
