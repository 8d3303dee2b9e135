//! Request construction.
//!
//! [`RequestBuilder`] collects query and form options through chained calls
//! and turns them into a [`RequestSpec`] without performing any I/O. Option
//! lists are interleaved `key, value, key, value, ...` slices; a dangling key
//! is captured and reported by [`RequestBuilder::build`].

use nacos_config_domain::constants::ACCESS_TOKEN_PARAM;
use nacos_config_domain::{NacosError, OptionSet, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use url::Url;

use crate::errors::InfraError;

/// Content type used whenever a request carries form fields.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

type Pairs = Vec<(String, String)>;

/// Fully built request, consumed by [`HttpClient::execute`](super::HttpClient::execute).
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    url: Url,
    form: Option<Pairs>,
}

impl RequestSpec {
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL with the query string already applied.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn form_pairs(&self) -> Option<&[(String, String)]> {
        self.form.as_deref()
    }

    /// Form fields encoded as `application/x-www-form-urlencoded`.
    pub fn encoded_form(&self) -> Option<String> {
        self.form.as_ref().map(|pairs| {
            url::form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish()
        })
    }

    /// Look up a query parameter on the final URL.
    pub fn query_value(&self, name: &str) -> Option<String> {
        self.url.query_pairs().find(|(key, _)| key == name).map(|(_, value)| value.into_owned())
    }

    pub(crate) fn into_reqwest(self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        let body = self.encoded_form();
        let builder = client.request(self.method, self.url);
        match body {
            Some(body) => builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body),
            None => builder,
        }
    }
}

/// Chained request options.
///
/// # Example
///
/// ```
/// use nacos_config_infra::http::RequestBuilder;
/// use reqwest::Method;
///
/// let spec = RequestBuilder::new(Method::GET, "http://localhost:8848/nacos/v1/cs/configs")
///     .auth("token")
///     .query(&["tenant", "public", "group", "DEFAULT_GROUP", "dataId", "app.yaml"])
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.query_value("dataId").as_deref(), Some("app.yaml"));
/// ```
#[must_use = "RequestBuilder does nothing until .build() is called"]
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    query: Option<Pairs>,
    form: Option<Pairs>,
    /// First malformed option, deferred to `build()`
    error: Option<NacosError>,
}

impl RequestBuilder {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), query: None, form: None, error: None }
    }

    /// Append interleaved key/value pairs to the query string.
    pub fn query(mut self, kv: &[&str]) -> Self {
        if self.error.is_none() {
            let values = self.query.get_or_insert_with(Vec::new);
            if let Err(err) = update_values(OptionSet::Query, values, kv) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Append interleaved key/value pairs to the form body.
    pub fn form(mut self, kv: &[&str]) -> Self {
        if self.error.is_none() {
            let values = self.form.get_or_insert_with(Vec::new);
            if let Err(err) = update_values(OptionSet::Form, values, kv) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Attach the access token as a query parameter.
    pub fn auth(self, token: &str) -> Self {
        self.query(&[ACCESS_TOKEN_PARAM, token])
    }

    /// Finish construction.
    ///
    /// When any query option was given, the collected pairs replace the
    /// URL's existing query string.
    ///
    /// # Errors
    /// Returns `NacosError::MalformedOptions` for an odd-length option list
    /// and `NacosError::RequestBuild` when the URL cannot be used.
    pub fn build(self) -> Result<RequestSpec> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let mut url = Url::parse(&self.url).map_err(|err| {
            let infra: InfraError = err.into();
            NacosError::from(infra)
        })?;
        if url.cannot_be_a_base() {
            return Err(NacosError::RequestBuild(format!("URL has no host: {}", self.url)));
        }

        if let Some(query) = &self.query {
            url.set_query(None);
            if !query.is_empty() {
                url.query_pairs_mut().extend_pairs(query);
            }
        }

        Ok(RequestSpec { method: self.method, url, form: self.form })
    }
}

fn update_values(set: OptionSet, values: &mut Pairs, kv: &[&str]) -> Result<()> {
    if kv.len() % 2 == 1 {
        return Err(NacosError::MalformedOptions { set, count: kv.len() });
    }

    values.extend(kv.chunks_exact(2).map(|pair| (pair[0].to_string(), pair[1].to_string())));
    Ok(())
}
