//! Middleware to guard restaurant management routes

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use common::Error;
use models::Profile;
use tower::{Layer, Service};

use crate::{AppState, ProfileId};

/// Middleware layer that only lets restaurant admins through
///
/// Must be applied after an [`AuthLayer`](crate::middleware::AuthLayer) so
/// the [`ProfileId`] extension is present. Profiles that may not manage the
/// restaurant get redirected to the login page.
#[derive(Clone)]
pub struct AdminLayer {
	state:          AppState,
	superuser_only: bool,
}

impl AdminLayer {
	/// Allow superusers and active restaurant admins
	#[must_use]
	pub fn new(state: AppState) -> Self {
		Self { state, superuser_only: false }
	}

	/// Only allow superusers, active restaurant admins are
	/// [`Forbidden`](Error::Forbidden)
	#[must_use]
	pub fn superuser(state: AppState) -> Self {
		Self { state, superuser_only: true }
	}
}

impl<S> Layer<S> for AdminLayer {
	type Service = AdminMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AdminMiddleware {
			inner,
			state: self.state.clone(),
			superuser_only: self.superuser_only,
		}
	}
}

#[derive(Clone)]
pub struct AdminMiddleware<S> {
	inner:          S,
	state:          AppState,
	superuser_only: bool,
}

impl<S> Service<Request<Body>> for AdminMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();
		let superuser_only = self.superuser_only;

		Box::pin(async move {
			let Some(&profile_id) = req.extensions().get::<ProfileId>() else {
				debug!("profile id not found in request extensions");

				return Ok(Error::Unauthorized.into_response());
			};

			let conn = match state.database_pool.get().await {
				Ok(conn) => conn,
				Err(e) => return Ok(Error::from(e).into_response()),
			};

			let profile = match Profile::get(*profile_id, &conn).await {
				Ok(p) => p,
				Err(e) => return Ok(e.into_response()),
			};

			if !profile.is_radmin() {
				info!("profile {profile_id} is not a restaurant admin");

				return Ok(Error::Unauthorized.into_response());
			}

			if superuser_only && !profile.profile.is_superuser {
				info!("profile {profile_id} is not a superuser");

				return Ok(Error::Forbidden.into_response());
			}

			inner.call(req).await
		})
	}
}
