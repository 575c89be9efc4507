use axum::{extract::{Multipart, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{
    ChangePasswordRequest, CreateAdminRequest, LoginRequest, SignupRequest, VerifyEmailQuery,
};
use crate::api::extractors::{admin::AdminUser, auth::AuthUser};
use crate::domain::models::auth::{AuthResponse, UserProfile};
use crate::domain::models::user::User;
use crate::error::AppError;
use crate::state::AppState;
use argon2::{password_hash::{PasswordHash, PasswordHasher, SaltString}, Argon2, PasswordVerifier};
use chrono::Utc;
use garde::Validate;
use rand::rngs::OsRng;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|r| AppError::from_report(&r))?;

    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already in use".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::signup(payload.email, payload.name, password_hash);
    let created = state.user_repo.create(&user).await?;

    info!("User signed up: {}", created.id);

    send_verification_email(&state, &created);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "Please check your email for verification"})),
    ))
}

pub async fn verify_email(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = state.user_repo.find_by_verification_token(&query.token).await?
        .ok_or(AppError::InvalidState("Invalid verification token".into()))?;

    let expired = user
        .verification_expires
        .is_none_or(|expires| expires < Utc::now());
    if expired {
        return Err(AppError::InvalidState("Verification token has expired".into()));
    }

    user.is_verified = true;
    user.verification_token = None;
    user.verification_expires = None;
    state.user_repo.update(&user).await?;

    info!("Email verified for user: {}", user.id);

    Ok(Json(serde_json::json!({"message": "Email verified successfully"})))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_email(&payload.email).await?
        .ok_or(AppError::Unauthorized)?;

    verify_password(&payload.password, &user.password_hash)?;

    let token = state.auth_service.issue(&user)?;

    info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(user),
    }))
}

pub async fn create_admin(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|r| AppError::from_report(&r))?;

    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already in use".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::admin(payload.email, payload.name, password_hash);
    let created = state.user_repo.create(&user).await?;

    info!("Admin created: {}", created.id);

    Ok((StatusCode::CREATED, Json(UserProfile::from(created))))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_id(&ctx.user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(UserProfile::from(user)))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|r| AppError::from_report(&r))?;

    let mut user = state.user_repo.find_by_id(&ctx.user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    verify_password(&payload.current_password, &user.password_hash)?;

    user.password_hash = hash_password(&payload.new_password)?;
    state.user_repo.update(&user).await?;

    info!("Password changed for user: {}", user.id);

    Ok(Json(serde_json::json!({"message": "Password changed successfully"})))
}

pub async fn upload_profile_picture(
    State(state): State<Arc<AppState>>,
    AuthUser(ctx): AuthUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await
        .map_err(|_| AppError::Validation(vec!["invalid multipart payload".into()]))?
    {
        if field.name() == Some("profilePicture") {
            let filename = field.file_name().unwrap_or("profile.jpg").to_string();
            let bytes = field.bytes().await
                .map_err(|_| AppError::Validation(vec!["could not read uploaded file".into()]))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = upload
        .ok_or(AppError::Validation(vec!["profilePicture file is required".into()]))?;

    let mut user = state.user_repo.find_by_id(&ctx.user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let uri = state.image_store.store(&filename, bytes).await?;

    let previous = user.profile_picture.replace(uri);
    let updated = state.user_repo.update(&user).await?;

    // Removing the stale picture is best-effort; the upload already
    // succeeded from the user's point of view.
    if let Some(old_uri) = previous {
        if let Err(e) = state.image_store.delete(&old_uri).await {
            warn!("Failed to delete previous profile picture {}: {:?}", old_uri, e);
        }
    }

    info!("Profile picture updated for user: {}", updated.id);

    Ok(Json(UserProfile::from(updated)))
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<(), AppError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AppError::Internal)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)
}

/// Dispatches the verification mail off the request path. Delivery
/// failures are logged, never surfaced to the caller.
fn send_verification_email(state: &Arc<AppState>, user: &User) {
    let Some(token) = user.verification_token.clone() else {
        return;
    };

    let mut context = tera::Context::new();
    context.insert("name", &user.name);
    context.insert(
        "verification_url",
        &format!("{}/api/auth/verify-email?token={}", state.config.base_url, token),
    );

    let html = match state.templates.render("verification.html", &context) {
        Ok(html) => html,
        Err(e) => {
            warn!("Failed to render verification email: {}", e);
            return;
        }
    };

    let email_service = state.email_service.clone();
    let recipient = user.email.clone();
    tokio::spawn(async move {
        if let Err(e) = email_service.send(&recipient, "Verify Your Email", &html).await {
            warn!("Failed to send verification email to {}: {:?}", recipient, e);
        }
    });
}
