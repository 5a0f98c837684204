//! User resource handlers.
//!
//! ```text
//! GET    /api/UserApi
//! GET    /api/UserApi/{id}
//! POST   /api/UserApi          {"name":"Alice","rate":10.5}
//! PUT    /api/UserApi/{id}     {"id":1,"name":"Alice","rate":12}
//! PATCH  /api/UserApi/{id}     [{"op":"replace","path":"/name","value":"Bob"}]
//! DELETE /api/UserApi/{id}
//! ```

use crate::api::error::{ApiError, ApiResult};
use crate::api::format::{respond_list, Format};
use crate::model::{PatchDocument, User, UserId};
use crate::store::UserStore;
use actix_web::http::{header, StatusCode};
use actix_web::{delete, get, patch, post, put, web, HttpRequest, HttpResponse};
use tracing::{error, info, instrument};

/// Route name used to build `Location` headers.
pub const GET_USER_ROUTE: &str = "get_user_by_id";

fn require_id(id: i64) -> ApiResult<UserId> {
    if id == 0 {
        return Err(ApiError::InvalidIdentifier);
    }
    Ok(UserId(id))
}

/// List every user in id order.
#[get("")]
#[instrument(skip_all)]
pub async fn list_users(
    req: HttpRequest,
    store: web::Data<dyn UserStore>,
) -> ApiResult<HttpResponse> {
    info!("Getting all users");
    let users = store.list().await?;
    Ok(respond_list(Format::preferred(&req), &users))
}

#[get("/{id}", name = "get_user_by_id")]
#[instrument(skip(req, store))]
pub async fn get_user(
    req: HttpRequest,
    store: web::Data<dyn UserStore>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = id.into_inner();
    let user_id = require_id(id).inspect_err(|_| {
        error!("Get user error by id: id {id} is not valid");
    })?;
    let user = store.get(user_id).await?.ok_or(ApiError::NotFound(id))?;
    Ok(Format::preferred(&req).respond(StatusCode::OK, &user))
}

/// Create a user. The store assigns the id.
///
/// Responds `201 Created` with the stored user and a `Location` header
/// pointing at [`get_user`].
#[post("")]
#[instrument(skip_all)]
pub async fn create_user(
    req: HttpRequest,
    store: web::Data<dyn UserStore>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let user: User = Format::of_request(&req).parse_body(&body)?;
    user.validate()?;
    if store.find_by_name(&user.name).await?.is_some() {
        return Err(ApiError::DuplicateName(user.name));
    }
    if !user.id.is_unspecified() {
        return Err(ApiError::UnexpectedIdOnCreate);
    }

    let created = store.insert(user).await?;
    info!(id = %created.id, "User created");

    let location = req.url_for(GET_USER_ROUTE, [created.id.to_string()])?;
    let mut builder = HttpResponse::Created();
    builder.insert_header((header::LOCATION, location.as_str()));
    Ok(Format::preferred(&req).render(builder, &created))
}

/// Replace every field of a user. The body id must equal the path id.
#[put("/{id}")]
#[instrument(skip(req, store, body))]
pub async fn replace_user(
    req: HttpRequest,
    store: web::Data<dyn UserStore>,
    id: web::Path<i64>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = id.into_inner();
    let user: User = Format::of_request(&req).parse_body(&body)?;
    if user.id.0 != id {
        return Err(ApiError::MalformedRequest(format!(
            "path id {id} does not match body id {}",
            user.id
        )));
    }
    require_id(id)?;
    user.validate()?;

    store.replace(user).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Apply a JSON patch document to a user.
///
/// Nothing is stored unless every operation applies and the result is valid.
#[patch("/{id}")]
#[instrument(skip(store, body))]
pub async fn patch_user(
    store: web::Data<dyn UserStore>,
    id: web::Path<i64>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = id.into_inner();
    let document: PatchDocument = Format::Json.parse_body(&body)?;
    let user_id = require_id(id)?;

    let current = store.get(user_id).await?.ok_or(ApiError::NotFound(id))?;
    let patched = document.apply_to(&current)?;

    store.replace(patched).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/{id}")]
#[instrument(skip(store))]
pub async fn delete_user(
    store: web::Data<dyn UserStore>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = id.into_inner();
    let user_id = require_id(id)?;
    if !store.delete(user_id).await? {
        return Err(ApiError::NotFound(id));
    }
    Ok(HttpResponse::NoContent().finish())
}
