use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{
    LoginCredentials, LoginResponse, ProfileUpdate, RegisterDetails, RegisterResponse,
    UserProfile,
};
use campus_http::ApiRequest;

pub async fn login(api: &ApiClient, credentials: &LoginCredentials) -> Result<LoginResponse> {
    let body = serde_json::to_value(credentials)?;
    api.call_json(ApiRequest::post(&api.endpoints().login).with_json(body))
        .await
}

pub async fn register(api: &ApiClient, details: &RegisterDetails) -> Result<RegisterResponse> {
    let body = serde_json::to_value(details)?;
    api.call_json(ApiRequest::post(&api.endpoints().register).with_json(body))
        .await
}

pub async fn profile(api: &ApiClient) -> Result<UserProfile> {
    api.call_json(ApiRequest::get(&api.endpoints().profile)).await
}

pub async fn update_profile(api: &ApiClient, update: &ProfileUpdate) -> Result<UserProfile> {
    let body = serde_json::to_value(update)?;
    api.call_json(ApiRequest::patch(&api.endpoints().profile).with_json(body))
        .await
}
