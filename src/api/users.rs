use actix_web::{web, HttpResponse};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{
    api::AppState,
    models::{NewUser, UserRecord},
    utils::error::AppError,
};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    /// A number or a numeric string.
    #[serde(default, deserialize_with = "deserialize_age")]
    #[schema(value_type = Option<u32>)]
    pub age: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AgeField {
    Number(u32),
    Text(String),
}

fn deserialize_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AgeField>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AgeField::Number(age)) => Ok(Some(age)),
        Some(AgeField::Text(text)) if text.is_empty() => Ok(None),
        Some(AgeField::Text(text)) => text
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("age must be a whole number, got {:?}", text))),
    }
}

impl SignupRequest {
    /// Empty strings and a zero age count as missing. Whitespace is kept as sent.
    pub fn validate(self) -> Result<NewUser, AppError> {
        let email = self.email.filter(|e| !e.is_empty());
        let name = self.name.filter(|n| !n.is_empty());
        let age = self.age.filter(|a| *a > 0);

        match (email, name, age) {
            (Some(email), Some(name), Some(age)) => Ok(NewUser { email, name, age }),
            (email, name, age) => {
                let missing: Vec<&str> = [
                    ("email", email.is_none()),
                    ("name", name.is_none()),
                    ("age", age.is_none()),
                ]
                .iter()
                .filter(|(_, absent)| *absent)
                .map(|(field, _)| *field)
                .collect();

                Err(AppError::MissingFields(format!("Required: {}", missing.join(", "))))
            }
        }
    }
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
}

/// Present only when the identity mirror failed after the record was stored.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IdentitySyncStatus {
    pub synced: bool,
    pub details: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserRecord,
    #[serde(rename = "identitySync", skip_serializing_if = "Option::is_none")]
    pub identity_sync: Option<IdentitySyncStatus>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub user: UserRecord,
}

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Users",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Missing fields", body = crate::utils::error::ErrorResponse),
        (status = 409, description = "Email already exists", body = crate::utils::error::ErrorResponse),
        (status = 500, description = "Signup failed", body = crate::utils::error::ErrorResponse),
        (status = 502, description = "Identity API write failed", body = crate::utils::error::ErrorResponse)
    )
)]
pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let email_str = request.email.clone().unwrap_or_else(|| "N/A".to_string());
    log::info!("📝 POST /signup - email: {}", email_str);

    let new_user = request.into_inner().validate().map_err(|e| {
        e.log("Signup rejected");
        e
    })?;

    match state.users.signup(new_user).await {
        Ok(outcome) => {
            log::info!("✅ User created: {} ({})", outcome.user.email, outcome.user.user_id);
            Ok(HttpResponse::Created().json(SignupResponse {
                message: outcome.message.to_string(),
                user: outcome.user,
                identity_sync: outcome.mirror_error.map(|details| IdentitySyncStatus {
                    synced: false,
                    details,
                }),
            }))
        }
        Err(e) => {
            e.log(&format!("Signup failed for {}", email_str));
            Err(e)
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Missing email", body = crate::utils::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::utils::error::ErrorResponse),
        (status = 500, description = "Login failed", body = crate::utils::error::ErrorResponse)
    )
)]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::MissingFields("Required: email".to_string()))?;

    log::info!("🔐 POST /login - email: {}", email);

    let user = state.users.login(email).await.map_err(|e| {
        e.log(&format!("Login failed for {}", email));
        e
    })?;

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

#[utoipa::path(
    post,
    path = "/profile",
    tag = "Users",
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 404, description = "User not found", body = crate::utils::error::ErrorResponse),
        (status = 500, description = "Profile fetch failed", body = crate::utils::error::ErrorResponse)
    )
)]
pub async fn profile(
    state: web::Data<AppState>,
    request: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 POST /profile");

    let user = state.users.profile(&request).await.map_err(|e| {
        e.log("Profile fetch failed");
        e
    })?;

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}
