use axum::{
    extract::{rejection::PathRejection, Path},
    Extension, Json,
};
use serde_json::{json, Value};
use sqlx::MySqlConnection;

use crate::db::{cars, DbSession};
use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{ApiResponse, Car, CarChanges, NewCar};

use super::extract::{CarPayload, PayloadRejection};

/// Turns a query failure into a `success: false` envelope carrying the raw message
fn failed<T>(request_id: &RequestId, error: AppError) -> ApiResponse<T> {
    tracing::warn!(request_id = %request_id, error = %error, "Query failed");
    ApiResponse::failure(error.client_message())
}

fn rejected<T>(request_id: &RequestId, message: String) -> ApiResponse<T> {
    tracing::warn!(request_id = %request_id, reason = %message, "Rejected request input");
    ApiResponse::failure(message)
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// GET /cars
pub async fn list_cars(
    Extension(request_id): Extension<RequestId>,
    Extension(session): Extension<DbSession>,
) -> Json<ApiResponse<Vec<Car>>> {
    let mut conn = session.lock().await;

    let response = match cars::list_all(&mut conn).await {
        Ok(rows) => ApiResponse::success("Cars successfully retrieved", rows),
        Err(e) => failed(&request_id, e),
    };

    Json(response)
}

/// POST /car, JSON or form-encoded
pub async fn create_car(
    Extension(request_id): Extension<RequestId>,
    Extension(session): Extension<DbSession>,
    payload: Result<CarPayload<NewCar>, PayloadRejection>,
) -> Json<ApiResponse<Vec<Car>>> {
    let new_car = match payload {
        Ok(CarPayload(new_car)) => new_car,
        Err(rejection) => return Json(rejected(&request_id, rejection.to_string())),
    };

    let mut conn = session.lock().await;

    let response = match insert_and_reload(&mut conn, &new_car).await {
        Ok(rows) => {
            if let Some(car) = rows.first() {
                tracing::info!(request_id = %request_id, car_id = car.id, "Car created");
            }
            ApiResponse::success("Car successfully created", rows)
        }
        Err(e) => failed(&request_id, e),
    };

    Json(response)
}

/// The inserted row as MySQL stored it, defaults and coercions applied
async fn insert_and_reload(conn: &mut MySqlConnection, new_car: &NewCar) -> AppResult<Vec<Car>> {
    let id = cars::insert(conn, new_car).await?;
    let car = cars::find_by_id(conn, id).await?;

    Ok(car.into_iter().collect())
}

/// PUT /car/:id
pub async fn update_car(
    Extension(request_id): Extension<RequestId>,
    Extension(session): Extension<DbSession>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<CarPayload<CarChanges>, PayloadRejection>,
) -> Json<ApiResponse<Vec<Car>>> {
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return Json(rejected(&request_id, rejection.body_text())),
    };
    let changes = match payload {
        Ok(CarPayload(changes)) => changes,
        Err(rejection) => return Json(rejected(&request_id, rejection.to_string())),
    };

    let mut conn = session.lock().await;

    let response = match apply_changes(&mut conn, id, &changes).await {
        Ok(response) => {
            if response.success {
                tracing::info!(request_id = %request_id, car_id = id, "Car updated");
            }
            response
        }
        Err(e) => failed(&request_id, e),
    };

    Json(response)
}

async fn apply_changes(
    conn: &mut MySqlConnection,
    id: i64,
    changes: &CarChanges,
) -> AppResult<ApiResponse<Vec<Car>>> {
    let Some(existing) = cars::find_by_id(conn, id).await? else {
        return Ok(ApiResponse::failure("Car not found"));
    };

    if !cars::update(conn, id, changes).await? {
        return Ok(ApiResponse::failure_with(
            "No fields to update",
            vec![existing],
        ));
    }

    let updated = cars::find_by_id(conn, id).await?;

    Ok(ApiResponse::success(
        "Car successfully updated",
        updated.into_iter().collect(),
    ))
}

/// DELETE /car/:id
///
/// Only flags the row; it keeps showing up in `GET /cars`.
pub async fn delete_car(
    Extension(request_id): Extension<RequestId>,
    Extension(session): Extension<DbSession>,
    id: Result<Path<i64>, PathRejection>,
) -> Json<ApiResponse<Car>> {
    let id = match id {
        Ok(Path(id)) => id,
        Err(rejection) => return Json(rejected(&request_id, rejection.body_text())),
    };

    let mut conn = session.lock().await;

    let response = match soft_delete(&mut conn, id).await {
        Ok(response) => {
            if response.success {
                tracing::info!(request_id = %request_id, car_id = id, "Car marked as deleted");
            }
            response
        }
        Err(e) => failed(&request_id, e),
    };

    Json(response)
}

/// Flags the row and hands back the snapshot taken before the update
async fn soft_delete(conn: &mut MySqlConnection, id: i64) -> AppResult<ApiResponse<Car>> {
    let Some(existing) = cars::find_by_id(conn, id).await? else {
        return Ok(ApiResponse::failure("Car not found"));
    };

    cars::mark_deleted(conn, id).await?;

    Ok(ApiResponse::success(
        "Car successfully marked as deleted",
        existing,
    ))
}
