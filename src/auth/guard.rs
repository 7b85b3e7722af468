use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};

use crate::api_error::ApiError;
use crate::config::AppConfig;
use crate::data::UserId;

use super::token;

/// Request guard for every endpoint behind the bearer token. On success the
/// handler receives the user id embedded in the token; everything the
/// handler touches is scoped to that id.
pub struct AuthUser {
    pub id: UserId,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthUser {
    type Error = ApiError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let config = match request.rocket().state::<AppConfig>() {
            Some(config) => config,
            None => {
                return Outcome::Error((
                    Status::InternalServerError,
                    ApiError::Internal("application config not managed".to_string()),
                ))
            }
        };

        let header = match request.headers().get_one("Authorization") {
            Some(header) => header,
            None => {
                return Outcome::Error((
                    Status::Forbidden,
                    ApiError::Forbidden("No token provided".to_string()),
                ))
            }
        };

        let token = match header.strip_prefix("Bearer ") {
            Some(token) => token,
            None => {
                return Outcome::Error((
                    Status::BadRequest,
                    ApiError::BadRequest("Invalid auth header format".to_string()),
                ))
            }
        };

        match token::verify(token, &config.jwt_secret) {
            Ok(claims) => Outcome::Success(AuthUser { id: claims.id }),
            Err(e) => Outcome::Error((Status::Unauthorized, e)),
        }
    }
}
