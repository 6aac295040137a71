use calendar_core::api::{
    AccountResponse, CreatedResponse, CredentialsRequest, ErrorResponse, EventPayload,
    MessageResponse, SigninResponse, StoredEvent,
};
use calendar_core::{CalendarEvent, StoreAck, StoreCommand};
use gloo::storage::{LocalStorage, Storage};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

const API_BASE_URL: &str = "/api/v1";
const TOKEN_KEY: &str = "calendar_token";

pub struct ApiService;

impl ApiService {
    pub fn stored_token() -> Option<String> {
        LocalStorage::get(TOKEN_KEY).ok()
    }

    pub fn store_token(token: &str) {
        if let Err(e) = LocalStorage::set(TOKEN_KEY, token) {
            tracing::warn!("Failed to persist token: {:?}", e);
        }
    }

    pub fn clear_token() {
        LocalStorage::delete(TOKEN_KEY);
    }

    pub async fn signup(username: &str, password: &str) -> Result<MessageResponse, String> {
        let request = Request::post(&format!("{}/signup", API_BASE_URL))
            .json(&credentials(username, password))
            .map_err(|e| format!("Failed to serialize request: {:?}", e))?;
        read_json(send(request).await?).await
    }

    /// Returns the session token.
    pub async fn signin(username: &str, password: &str) -> Result<String, String> {
        let request = Request::post(&format!("{}/signin", API_BASE_URL))
            .json(&credentials(username, password))
            .map_err(|e| format!("Failed to serialize request: {:?}", e))?;
        let response: SigninResponse = read_json(send(request).await?).await?;
        Ok(response.token)
    }

    pub async fn signout() -> Result<(), String> {
        let response = Request::post(&format!("{}/signout", API_BASE_URL))
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        read_json::<MessageResponse>(response).await.map(|_| ())
    }

    pub async fn me(token: &str) -> Result<AccountResponse, String> {
        let response = authorized(Request::get(&format!("{}/me", API_BASE_URL)), token)
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        read_json(response).await
    }

    pub async fn list_events(token: &str) -> Result<Vec<CalendarEvent>, String> {
        let response = authorized(Request::get(&format!("{}/event", API_BASE_URL)), token)
            .send()
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        let stored: Vec<StoredEvent> = read_json(response).await?;
        Ok(stored.into_iter().map(Into::into).collect())
    }

    /// Send one pending command to the backend.
    pub async fn execute(token: &str, command: StoreCommand) -> Result<StoreAck, String> {
        match command {
            StoreCommand::Create(event) => {
                let request = authorized(Request::post(&format!("{}/event", API_BASE_URL)), token)
                    .json(&payload(&event)?)
                    .map_err(|e| format!("Failed to serialize request: {:?}", e))?;
                let created: CreatedResponse = read_json(send(request).await?).await?;
                Ok(StoreAck::Created {
                    id: created.id.to_string(),
                })
            }
            StoreCommand::Update(event) => {
                let url = format!("{}/event/{}", API_BASE_URL, event.id);
                let request = authorized(Request::put(&url), token)
                    .json(&payload(&event)?)
                    .map_err(|e| format!("Failed to serialize request: {:?}", e))?;
                read_json::<MessageResponse>(send(request).await?).await?;
                Ok(StoreAck::Accepted)
            }
            StoreCommand::Delete { id } => {
                let url = format!("{}/event/{}", API_BASE_URL, id);
                let response = authorized(Request::delete(&url), token)
                    .send()
                    .await
                    .map_err(|e| format!("Request failed: {:?}", e))?;
                read_json::<MessageResponse>(response).await?;
                Ok(StoreAck::Accepted)
            }
        }
    }
}

fn credentials(username: &str, password: &str) -> CredentialsRequest {
    CredentialsRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn payload(event: &CalendarEvent) -> Result<EventPayload, String> {
    EventPayload::from_draft(&event.to_draft()).map_err(|e| e.to_string())
}

fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", token))
}

async fn send(request: Request) -> Result<Response, String> {
    request
        .send()
        .await
        .map_err(|e| format!("Request failed: {:?}", e))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        return Err(match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP error: {}", status),
        });
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {:?}", e))
}
