use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Method, Url,
};

/// A request handed to a [`Transport`](crate::Transport).
///
/// Built once per [`HttpClient::get`](crate::HttpClient::get) call; every
/// attempt borrows the same value.
#[derive(Clone, Debug)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
}

impl Request {
    /// Builds a GET request carrying the fixed default headers:
    /// `Cache-Control: no-cache` and `Accept-Charset: utf-8`.
    pub fn get(url: Url) -> Self {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(header::ACCEPT_CHARSET, HeaderValue::from_static("utf-8"));
        Self {
            method: Method::GET,
            url,
            headers,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
