use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{LOCATION, REFERER};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::types::{AddResponse, DeleteResponse, ListResponse};
use super::{ApiError, ApiResult, Student, StudentApi, StudentPayload};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::util::cookie::{get_cookie, split_cookie_header};

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const SESSION_COOKIE: &str = "session_token";

const SESSION_EXPIRED: &str = "Session expired, please log in again";

/// reqwest-backed [`StudentApi`].
///
/// Redirects are never followed: the edit endpoint reports success with a
/// 3xx, and following it would land on the HTML list page.
#[derive(Debug, Clone)]
pub struct HttpStudentApi {
    base_url: Url,
    client: Client,
    jar: Arc<Jar>,
}

impl HttpStudentApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let jar = Arc::new(Jar::default());

        if let Some(cookies) = &config.cookies {
            for (name, value) in split_cookie_header(cookies) {
                jar.add_cookie_str(&format!("{}={}; Path=/", name, value), &base_url);
            }
        }

        let client = Client::builder()
            .user_agent(concat!("student-portal/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(Policy::none())
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self { base_url, client, jar })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Network(format!("bad endpoint {}: {}", path, e)))
    }

    /// Current value of a cookie as the backend would see it.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        get_cookie(header, name)
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.cookie(CSRF_COOKIE)
    }

    /// Adds the CSRF token header and a same-origin `Referer`; the backend's
    /// CSRF check refuses https POSTs without one.
    fn with_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(REFERER, self.base_url.as_str());
        match self.csrf_token() {
            Some(token) => request.header(CSRF_HEADER, token),
            None => {
                warn!("No {} cookie available, sending request without {}", CSRF_COOKIE, CSRF_HEADER);
                request
            }
        }
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("{} {}", response.status(), response.url());
        Ok(response)
    }

    /// Decodes the JSON envelope whatever the status code; the backend uses
    /// the same shape for 400/401/404 answers.
    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Network(format!("undecodable response: {}", e)))
    }

    /// Whether a redirect points at the login page, which is how the backend
    /// answers a form POST once the session has expired.
    fn redirects_to_login(&self, response: &Response) -> bool {
        let Some(location) = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
        else {
            return false;
        };
        let (Ok(target), Ok(login)) = (self.base_url.join(location), self.endpoint("login/")) else {
            return false;
        };
        target.path() == login.path()
    }

    /// Logs in through the portal's form login.
    ///
    /// The login page is fetched first so the backend issues a `csrftoken`
    /// cookie; the token is then echoed both as form field and header.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        let login_url = self.endpoint("login/")?;

        self.send(self.client.get(login_url.clone())).await?;
        let token = self.csrf_token().unwrap_or_default();

        let form = [
            ("username", username),
            ("password", password),
            ("csrfmiddlewaretoken", token.as_str()),
        ];
        let response = self
            .send(
                self.client
                    .post(login_url.clone())
                    .header(CSRF_HEADER, token.as_str())
                    .header(REFERER, login_url.as_str())
                    .form(&form),
            )
            .await?;

        if response.status().is_redirection() && self.cookie(SESSION_COOKIE).is_some() {
            info!("Logged in as {}", username);
            Ok(())
        } else {
            warn!("Login rejected for {} ({})", username, response.status());
            Err(ApiError::Rejected("Invalid credentials".to_string()))
        }
    }
}

impl StudentApi for HttpStudentApi {
    async fn list_students(&self) -> ApiResult<Vec<Student>> {
        let url = self.endpoint("api/students/")?;
        let response = self.send(self.client.get(url)).await?;
        let body: ListResponse = Self::decode(response).await?;

        if body.success {
            Ok(body.students)
        } else {
            Err(ApiError::Rejected(body.message.unwrap_or_default()))
        }
    }

    async fn add_student(&self, payload: &StudentPayload) -> ApiResult<Student> {
        let url = self.endpoint("api/add/")?;
        let request = self.with_csrf(self.client.post(url).form(payload));
        let response = self.send(request).await?;
        let body: AddResponse = Self::decode(response).await?;

        match body {
            AddResponse { success: true, student: Some(student), .. } => Ok(student),
            AddResponse { success: true, student: None, .. } => Err(ApiError::Network(
                "add succeeded without returning the stored record".to_string(),
            )),
            AddResponse { message, .. } => Err(ApiError::Rejected(message.unwrap_or_default())),
        }
    }

    async fn edit_student(&self, id: i64, payload: &StudentPayload) -> ApiResult<()> {
        let url = self.endpoint(&format!("students/edit/{}/", id))?;
        let request = self.with_csrf(self.client.post(url).form(payload));
        let response = self.send(request).await?;

        if response.status().is_redirection() {
            if self.redirects_to_login(&response) {
                warn!("Edit of student {} bounced to the login page", id);
                return Err(ApiError::Rejected(SESSION_EXPIRED.to_string()));
            }
            return Ok(());
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Err(ApiError::NotRedirected(text))
    }

    async fn delete_student(&self, id: i64) -> ApiResult<()> {
        let url = self.endpoint(&format!("api/delete/{}/", id))?;
        let request = self.with_csrf(self.client.post(url));
        let response = self.send(request).await?;
        let body: DeleteResponse = Self::decode(response).await?;

        if body.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(body.message.unwrap_or_default()))
        }
    }

    async fn logout(&self) -> ApiResult<()> {
        let url = self.endpoint("logout/")?;
        let response = self.send(self.client.get(url)).await?;
        let status = response.status();
        if status.is_success() || status.is_redirection() {
            return Ok(());
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        warn!("Logout answered {}", status);
        Err(ApiError::Rejected(if text.trim().is_empty() {
            status.to_string()
        } else {
            text
        }))
    }
}

