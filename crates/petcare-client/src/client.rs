//! HTTP client for the PetCare REST API.
//!
//! [`ApiClient`] wraps a `reqwest::Client` with the base URL and a shared
//! bearer-token slot, and exposes one typed method per endpoint.  Auth
//! endpoints work without a token; everything else fails client-side with
//! [`ClientError::AuthRequired`] before any network traffic when no token
//! is set.  Non-2xx responses are decoded from the server's
//! `{"error": "..."}` body into typed errors.

use std::sync::{Arc, RwLock};

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::model::{
    FeedingSchedule, NewPet, NewSchedule, NewVisit, Pet, PetPatch, PhotoFile, SchedulePatch, User,
    VetVisit, VisitPatch,
};
use crate::validate;

/// Default API base URL for a locally running server.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// Successful response from `/auth/register` and `/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub message: Option<String>,
    pub user: User,
    pub access_token: String,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Deserialize)]
struct PetsEnvelope {
    pets: Vec<Pet>,
}

#[derive(Deserialize)]
struct PetEnvelope {
    pet: Pet,
}

#[derive(Deserialize)]
struct SchedulesEnvelope {
    schedules: Vec<FeedingSchedule>,
}

#[derive(Deserialize)]
struct ScheduleEnvelope {
    schedule: FeedingSchedule,
}

#[derive(Deserialize)]
struct VisitsEnvelope {
    visits: Vec<VetVisit>,
}

#[derive(Deserialize)]
struct VisitEnvelope {
    visit: VetVisit,
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Typed client for the PetCare REST API.
///
/// Cloning is cheap and clones share the token slot, so a token installed
/// after login is visible to every store holding a clone.
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client for making requests.
    http: reqwest::Client,
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:5000/api`.
    base_url: String,
    /// Bearer token shared across clones.
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client against the default local server URL.
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("petcare-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a client against a custom server URL.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        url::Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut client = Self::new();
        client.base_url = base_url.trim_end_matches('/').to_string();
        Ok(client)
    }

    // -----------------------------------------------------------------------
    // Token slot
    // -----------------------------------------------------------------------

    /// Install the bearer token used for subsequent requests.
    pub fn set_token(&self, token: &str) {
        *self.token.write().unwrap() = Some(token.to_string());
    }

    /// Drop the bearer token.
    pub fn clear_token(&self) {
        *self.token.write().unwrap() = None;
    }

    /// Current bearer token, if one is set.
    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    /// Whether a bearer token is currently set.
    pub fn has_token(&self) -> bool {
        self.token.read().unwrap().is_some()
    }

    // -----------------------------------------------------------------------
    // Request plumbing
    // -----------------------------------------------------------------------

    /// Build a full API URL from a path segment.
    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a request, attaching the bearer token when one is set.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.api_url(path));
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Build a request for an endpoint that requires authentication.
    fn authed(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        if !self.has_token() {
            return Err(ClientError::AuthRequired);
        }
        Ok(self.request(method, path))
    }

    /// Send a request and decode the JSON response.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        op: &'static str,
    ) -> Result<T> {
        let body = self.send_raw(request, op).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode {
            reason: format!("{op}: {e}"),
        })
    }

    /// Send a request where the response body carries nothing we need.
    async fn send_no_content(
        &self,
        request: reqwest::RequestBuilder,
        op: &'static str,
    ) -> Result<()> {
        self.send_raw(request, op).await.map(|_| ())
    }

    async fn send_raw(
        &self,
        request: reqwest::RequestBuilder,
        op: &'static str,
    ) -> Result<String> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    reason: format!("{op}: {e}"),
                }
            } else {
                ClientError::Transport {
                    reason: format!("{op}: {e}"),
                }
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport {
                reason: format!("{op}: failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!(op, status = status.as_u16(), message = %message, "api request rejected");
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(ClientError::Unauthorized { message });
            }
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    // -----------------------------------------------------------------------
    // Auth endpoints
    // -----------------------------------------------------------------------

    /// Register a new account. Returns the created user and access token.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        validate::username(username)?;
        validate::email(email)?;
        validate::password(password)?;

        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        debug!(username, "registering user");
        let request = self.request(Method::POST, "/auth/register").json(&body);
        self.send(request, "register").await
    }

    /// Log in with username and password.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let body = serde_json::json!({
            "username": username,
            "password": password,
        });
        debug!(username, "logging in");
        let request = self.request(Method::POST, "/auth/login").json(&body);
        self.send(request, "login").await
    }

    /// Fetch the user the current token belongs to.
    pub async fn current_user(&self) -> Result<User> {
        let request = self.authed(Method::GET, "/auth/me")?;
        let envelope: UserEnvelope = self.send(request, "current_user").await?;
        Ok(envelope.user)
    }

    // -----------------------------------------------------------------------
    // Pet endpoints
    // -----------------------------------------------------------------------

    /// List the authenticated user's pets.
    pub async fn list_pets(&self) -> Result<Vec<Pet>> {
        let request = self.authed(Method::GET, "/pets")?;
        let envelope: PetsEnvelope = self.send(request, "list_pets").await?;
        Ok(envelope.pets)
    }

    /// Fetch a single pet by ID.
    pub async fn get_pet(&self, id: i64) -> Result<Pet> {
        let request = self.authed(Method::GET, &format!("/pets/{id}"))?;
        let envelope: PetEnvelope = self.send(request, "get_pet").await?;
        Ok(envelope.pet)
    }

    /// Create a pet. Sent as multipart form-data so a photo can ride along.
    pub async fn create_pet(&self, pet: &NewPet) -> Result<Pet> {
        validate::new_pet(pet)?;
        let form = pet_form(pet.text_fields(), pet.photo.clone())?;
        let request = self.authed(Method::POST, "/pets")?.multipart(form);
        debug!(name = %pet.name, species = %pet.species, "creating pet");
        let envelope: PetEnvelope = self.send(request, "create_pet").await?;
        Ok(envelope.pet)
    }

    /// Update a pet. Only the fields present in the patch are sent.
    pub async fn update_pet(&self, id: i64, patch: &PetPatch) -> Result<Pet> {
        validate::pet_patch(patch)?;
        let form = pet_form(patch.text_fields(), patch.photo.clone())?;
        let request = self
            .authed(Method::PUT, &format!("/pets/{id}"))?
            .multipart(form);
        debug!(pet_id = id, "updating pet");
        let envelope: PetEnvelope = self.send(request, "update_pet").await?;
        Ok(envelope.pet)
    }

    /// Delete a pet and, server-side, its schedules and visits.
    pub async fn delete_pet(&self, id: i64) -> Result<()> {
        let request = self.authed(Method::DELETE, &format!("/pets/{id}"))?;
        debug!(pet_id = id, "deleting pet");
        self.send_no_content(request, "delete_pet").await
    }

    // -----------------------------------------------------------------------
    // Feeding schedule endpoints
    // -----------------------------------------------------------------------

    /// List feeding schedules for a pet.
    pub async fn list_schedules(&self, pet_id: i64) -> Result<Vec<FeedingSchedule>> {
        let request = self.authed(Method::GET, &format!("/pets/{pet_id}/schedule"))?;
        let envelope: SchedulesEnvelope = self.send(request, "list_schedules").await?;
        Ok(envelope.schedules)
    }

    /// Create a feeding schedule for a pet.
    pub async fn create_schedule(
        &self,
        pet_id: i64,
        schedule: &NewSchedule,
    ) -> Result<FeedingSchedule> {
        validate::new_schedule(schedule)?;
        let request = self
            .authed(Method::POST, &format!("/pets/{pet_id}/schedule"))?
            .json(schedule);
        debug!(pet_id, food_type = %schedule.food_type, "creating schedule");
        let envelope: ScheduleEnvelope = self.send(request, "create_schedule").await?;
        Ok(envelope.schedule)
    }

    /// Update a feeding schedule.
    pub async fn update_schedule(
        &self,
        schedule_id: i64,
        patch: &SchedulePatch,
    ) -> Result<FeedingSchedule> {
        let request = self
            .authed(Method::PUT, &format!("/schedule/{schedule_id}"))?
            .json(patch);
        debug!(schedule_id, "updating schedule");
        let envelope: ScheduleEnvelope = self.send(request, "update_schedule").await?;
        Ok(envelope.schedule)
    }

    /// Delete a feeding schedule.
    pub async fn delete_schedule(&self, schedule_id: i64) -> Result<()> {
        let request = self.authed(Method::DELETE, &format!("/schedule/{schedule_id}"))?;
        debug!(schedule_id, "deleting schedule");
        self.send_no_content(request, "delete_schedule").await
    }

    // -----------------------------------------------------------------------
    // Vet visit endpoints
    // -----------------------------------------------------------------------

    /// List vet visits for a pet, most recent first (server order).
    pub async fn list_visits(&self, pet_id: i64) -> Result<Vec<VetVisit>> {
        let request = self.authed(Method::GET, &format!("/pets/{pet_id}/visits"))?;
        let envelope: VisitsEnvelope = self.send(request, "list_visits").await?;
        Ok(envelope.visits)
    }

    /// Fetch a single visit by ID.
    pub async fn get_visit(&self, visit_id: i64) -> Result<VetVisit> {
        let request = self.authed(Method::GET, &format!("/visits/{visit_id}"))?;
        let envelope: VisitEnvelope = self.send(request, "get_visit").await?;
        Ok(envelope.visit)
    }

    /// Create a vet visit for a pet.
    pub async fn create_visit(&self, pet_id: i64, visit: &NewVisit) -> Result<VetVisit> {
        validate::new_visit(visit)?;
        let request = self
            .authed(Method::POST, &format!("/pets/{pet_id}/visits"))?
            .json(visit);
        debug!(pet_id, reason = %visit.reason, "creating visit");
        let envelope: VisitEnvelope = self.send(request, "create_visit").await?;
        Ok(envelope.visit)
    }

    /// Update a vet visit.
    pub async fn update_visit(&self, visit_id: i64, patch: &VisitPatch) -> Result<VetVisit> {
        validate::visit_patch(patch)?;
        let request = self
            .authed(Method::PUT, &format!("/visits/{visit_id}"))?
            .json(patch);
        debug!(visit_id, "updating visit");
        let envelope: VisitEnvelope = self.send(request, "update_visit").await?;
        Ok(envelope.visit)
    }

    /// Delete a vet visit.
    pub async fn delete_visit(&self, visit_id: i64) -> Result<()> {
        let request = self.authed(Method::DELETE, &format!("/visits/{visit_id}"))?;
        debug!(visit_id, "deleting visit");
        self.send_no_content(request, "delete_visit").await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assemble the multipart form for pet create/update: every text field as
/// its own part, the photo (when present) as a file part with its MIME type.
fn pet_form(fields: Vec<(&'static str, String)>, photo: Option<PhotoFile>) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(name, value);
    }
    if let Some(photo) = photo {
        let mime = photo.mime_type();
        let part = Part::bytes(photo.bytes)
            .file_name(photo.file_name)
            .mime_str(mime)
            .map_err(|e| ClientError::Validation(format!("invalid photo type: {e}")))?;
        form = form.part("photo", part);
    }
    Ok(form)
}

/// Pull the message out of an `{"error": "..."}` body, falling back to the
/// raw text for non-JSON error pages.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.trim().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
