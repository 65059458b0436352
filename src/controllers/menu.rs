use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbPool, Error};
use models::{
	MenuUpdate,
	NewMenu,
	PrimitiveMenu,
	delete_menu as delete_menu_by_id,
	get_all_menus,
};
use uuid::Uuid;
use validator::Validate;

use crate::schemas::menu::{CreateMenuRequest, MenuResponse, UpdateMenuRequest};

#[instrument(skip(pool))]
pub(crate) async fn get_menus(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let menus = get_all_menus(&conn).await?;

	let response: Vec<MenuResponse> =
		menus.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_menu(
	State(pool): State<DbPool>,
	Path(m_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let menu = PrimitiveMenu::get_by_id(m_id, &conn).await?;

	Ok((StatusCode::OK, Json(MenuResponse::from(menu))))
}

#[instrument(skip(pool))]
pub(crate) async fn create_menu(
	State(pool): State<DbPool>,
	Json(request): Json<CreateMenuRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let new_menu: NewMenu = request.into();
	let menu = new_menu.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(MenuResponse::from(menu))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_menu(
	State(pool): State<DbPool>,
	Path(m_id): Path<Uuid>,
	Json(request): Json<UpdateMenuRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;
	let update: MenuUpdate = request.into();
	let menu = update.apply_to(m_id, &conn).await?;

	Ok((StatusCode::OK, Json(MenuResponse::from(menu))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_menu(
	State(pool): State<DbPool>,
	Path(m_id): Path<Uuid>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	delete_menu_by_id(m_id, &conn).await?;

	Ok(NoContent)
}
