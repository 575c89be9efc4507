use chrono::{DateTime, Utc};
use garde::Validate;
use serde::Deserialize;

use crate::domain::models::event::CATEGORIES;

#[derive(Deserialize, Validate)]
pub struct SignupRequest {
    #[garde(length(min = 2, max = 30))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(custom(strong_password))]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[garde(length(min = 2, max = 30))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(custom(strong_password))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[garde(length(min = 1))]
    pub current_password: String,
    #[garde(custom(strong_password))]
    pub new_password: String,
}

#[derive(Deserialize, Validate)]
pub struct CreateEventRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(length(min = 1))]
    pub description: String,
    #[garde(custom(valid_category))]
    pub category: String,
    #[garde(skip)]
    pub date: DateTime<Utc>,
    #[garde(length(min = 1))]
    pub venue: String,
    #[garde(range(min = 0.0))]
    pub price: f64,
    #[garde(skip)]
    pub image: Option<String>,
    #[garde(range(min = 1))]
    pub capacity: Option<i64>,
}

#[derive(Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[garde(length(min = 1))]
    pub name: Option<String>,
    #[garde(length(min = 1))]
    pub description: Option<String>,
    #[garde(inner(custom(valid_category)))]
    pub category: Option<String>,
    #[garde(skip)]
    pub date: Option<DateTime<Utc>>,
    #[garde(length(min = 1))]
    pub venue: Option<String>,
    #[garde(range(min = 0.0))]
    pub price: Option<f64>,
    #[garde(skip)]
    pub image: Option<String>,
    #[garde(range(min = 1))]
    pub capacity: Option<i64>,
}

/// Raw paging values. Kept as strings so junk input coerces to defaults
/// instead of rejecting the request.
#[derive(Deserialize)]
pub struct ListEventsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn valid_category(value: &str, _ctx: &()) -> garde::Result {
    if CATEGORIES.contains(&value) {
        Ok(())
    } else {
        Err(garde::Error::new("invalid event category"))
    }
}

fn strong_password(value: &str, _ctx: &()) -> garde::Result {
    if value.len() < 8 {
        return Err(garde::Error::new("password must be at least 8 characters"));
    }

    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_special = value.chars().any(|c| !c.is_ascii_alphanumeric());

    if !(has_lower && has_upper && has_digit && has_special) {
        return Err(garde::Error::new(
            "password must include uppercase, lowercase, number, and special character",
        ));
    }

    Ok(())
}
