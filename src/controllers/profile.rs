//! Controllers for the profile of the logged in user

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use axum_extra::extract::PrivateCookieJar;
use common::{DbPool, Error, RedisConn};
use models::{Profile, ProfileUpdate};
use validator::Validate;

use crate::controllers::auth::revoked_access_token;
use crate::schemas::profile::{
	ProfileDeletionResponse,
	ProfileResponse,
	UpdateProfileRequest,
};
use crate::session::Session;
use crate::{Config, ProfileId};

#[instrument(skip(pool))]
pub(crate) async fn get_current_profile(
	State(pool): State<DbPool>,
	Extension(profile_id): Extension<ProfileId>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let profile = Profile::get(*profile_id, &conn).await?;

	Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_current_profile(
	State(pool): State<DbPool>,
	Extension(profile_id): Extension<ProfileId>,
	Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let update: ProfileUpdate = request.into();
	let profile = update.apply_to(*profile_id, &conn).await?;

	info!("updated profile {profile_id}");

	Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

/// Delete the current profile, its reservations and all of its sessions
#[instrument(skip(pool, r_conn, config, jar))]
pub(crate) async fn delete_current_profile(
	State(pool): State<DbPool>,
	State(mut r_conn): State<RedisConn>,
	State(config): State<Config>,
	Extension(session): Extension<Session>,
	jar: PrivateCookieJar,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let deletion = Profile::delete_by_id(session.profile_id, &conn).await?;

	Session::delete_all_for_profile(session.profile_id, &mut r_conn).await?;

	let jar = jar.remove(revoked_access_token(&config));

	info!("deleted profile {} and its sessions", session.profile_id);

	Ok((StatusCode::OK, jar, Json(ProfileDeletionResponse::from(deletion))))
}
