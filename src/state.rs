use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{BookingRepository, EmailService, EventRepository, ImageStore, UserRepository};
use crate::domain::services::auth_service::AuthService;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub image_store: Arc<dyn ImageStore>,
    pub templates: Arc<Tera>,
}
