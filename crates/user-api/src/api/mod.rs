//! HTTP adapter exposing the user resource.

pub mod error;
pub mod format;
pub mod users;

pub use error::{ApiError, ApiResult};

use actix_web::web;

/// Mount point of the user resource.
pub const USERS_SCOPE: &str = "/api/UserApi";

/// Registers the user routes.
///
/// The store must be registered separately as `web::Data<dyn UserStore>`.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(user_api::api::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(USERS_SCOPE)
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                ApiError::MalformedRequest(err.to_string()).into()
            }))
            .service(users::list_users)
            .service(users::get_user)
            .service(users::create_user)
            .service(users::replace_user)
            .service(users::patch_user)
            .service(users::delete_user),
    );
}
