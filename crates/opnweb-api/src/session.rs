// ── Session manager ──
//
// One authenticated HTTP context per appliance: the PHP session cookie
// lives in the client's jar, and the CSRF token scraped from the root
// page rides along as a header on every subsequent request. The token is
// captured once and never refreshed -- on expiry the caller builds a new
// session.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Response;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// The fixed in-page script pattern the appliance uses to hand the CSRF
/// token to its own JavaScript. This is the only place the token appears.
static CSRF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""X-CSRFToken", "(.*)" \);"#).expect("CSRF pattern"));

const CSRF_HEADER: &str = "X-CSRFToken";

/// An HTTP context against one appliance.
///
/// Starts unauthenticated; [`login`](Self::login) captures the session
/// cookie and CSRF token. All reads and mutations are gated on that token
/// being present.
pub struct Session {
    base_url: Url,
    http: reqwest::Client,
    csrf: Option<String>,
}

impl Session {
    /// Create an unauthenticated session. No request is made until
    /// [`login`](Self::login).
    pub fn connect(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            base_url,
            http: transport.build_client()?,
            csrf: None,
        })
    }

    /// The appliance root address.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a CSRF token has been captured.
    pub fn is_authenticated(&self) -> bool {
        self.csrf.is_some()
    }

    /// Fail fast instead of scraping a login page.
    pub fn ensure_authenticated(&self) -> Result<(), Error> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(Error::Unauthenticated)
        }
    }

    /// Authenticate against the appliance root page.
    ///
    /// Two round-trips: an unauthenticated GET captures the session cookie
    /// and the in-page CSRF token, then the login form is POSTed with the
    /// token attached as a header.
    pub async fn login(&mut self, username: &str, password: &SecretString) -> Result<(), Error> {
        debug!("GET {} (root page)", self.base_url);
        let resp = self
            .http
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;
        let body = resp.text().await.map_err(Error::Transport)?;

        let token = extract_csrf(&body).ok_or_else(|| Error::Authentication {
            message: "no CSRF token on the root page".into(),
        })?;

        debug!("POST {} (login form)", self.base_url);
        let form = [
            ("login", "Login"),
            ("usernamefld", username),
            ("passwordfld", password.expose_secret()),
        ];
        let resp = self
            .http
            .post(self.base_url.clone())
            .header(CSRF_HEADER, token.as_str())
            .form(&form)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login rejected (HTTP {status})"),
            });
        }

        self.csrf = Some(token);
        debug!("session established");
        Ok(())
    }

    /// Fetch an admin page and return its HTML. `path` may carry a query
    /// string (`services_dhcp.php?if=opt3`).
    pub async fn get_page(&self, path: &str) -> Result<String, Error> {
        self.ensure_authenticated()?;
        let url = self.page_url(path)?;
        debug!("GET {url}");
        let resp = self
            .with_token(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;
        resp.text().await.map_err(Error::Transport)
    }

    /// Submit a form to an admin page. Status handling is the caller's
    /// concern -- the appliance reports validation failures in-page, so a
    /// response here only proves the request was delivered.
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(String, String)],
    ) -> Result<Response, Error> {
        self.ensure_authenticated()?;
        let url = self.page_url(path)?;
        debug!("POST {url}");
        self.with_token(self.http.post(url))
            .form(fields)
            .send()
            .await
            .map_err(Error::Transport)
    }

    fn with_token(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.csrf.as_deref() {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        }
    }

    fn page_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }
}

fn extract_csrf(body: &str) -> Option<String> {
    CSRF_PATTERN
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|token| token.as_str().to_owned())
}
