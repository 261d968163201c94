use crate::db::StoreHandle;
use crate::errors::ApiError;
use crate::models::{DeleteRequest, InsertAck, Message, Reservation, UpdateRequest};
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{State, delete, get, post, put, routes};
use tracing::{error, info};

const CREATE_FAILED: &str = "Error creating reservation";
const RETRIEVE_FAILED: &str = "Error retrieving reservations";
const UPDATE_FAILED: &str = "Error updating reservation";
const DELETE_FAILED: &str = "Error deleting reservation";

#[post("/create", data = "<reservation>")]
pub async fn create_reservation(
    store: &State<StoreHandle>,
    reservation: Json<Reservation>,
) -> Result<status::Custom<Json<InsertAck>>, ApiError> {
    let store = store.get()?;
    let reservation = reservation.into_inner();
    info!(body = ?reservation, "create reservation");

    let ack = store.insert(&reservation).await.map_err(|e| {
        error!(error = %e, body = ?reservation, "error creating reservation");
        ApiError::OperationFailed(CREATE_FAILED)
    })?;

    Ok(status::Custom(Status::Created, Json(ack)))
}

#[get("/my/<email>")]
pub async fn get_reservations(
    store: &State<StoreHandle>,
    email: &str,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let store = store.get()?;
    info!(email = %email, "list reservations");

    let reservations = store.find_by_email(email).await.map_err(|e| {
        error!(error = %e, email = %email, "error retrieving reservations");
        ApiError::OperationFailed(RETRIEVE_FAILED)
    })?;

    Ok(Json(reservations))
}

#[put("/update-one", data = "<request>")]
pub async fn update_reservation(
    store: &State<StoreHandle>,
    request: Json<UpdateRequest>,
) -> Result<Json<Message>, ApiError> {
    let store = store.get()?;
    let UpdateRequest { email, updates } = request.into_inner();
    info!(email = %email, updates = ?updates, "update reservation");

    let matched = store.update_first(&email, &updates).await.map_err(|e| {
        error!(error = %e, email = %email, updates = ?updates, "error updating reservation");
        ApiError::OperationFailed(UPDATE_FAILED)
    })?;

    if matched == 0 {
        info!(email = %email, "no reservation to update");
        return Err(ApiError::NotFound);
    }

    Ok(Json(Message::new("Updated")))
}

#[delete("/delete-one", data = "<request>")]
pub async fn delete_reservation(
    store: &State<StoreHandle>,
    request: Json<DeleteRequest>,
) -> Result<Json<Message>, ApiError> {
    let store = store.get()?;
    let DeleteRequest { email } = request.into_inner();
    info!(email = %email, "delete reservation");

    let deleted = store.delete_first(&email).await.map_err(|e| {
        error!(error = %e, email = %email, "error deleting reservation");
        ApiError::OperationFailed(DELETE_FAILED)
    })?;

    if deleted == 0 {
        info!(email = %email, "no reservation to delete");
        return Err(ApiError::NotFound);
    }

    Ok(Json(Message::new("Deleted")))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        create_reservation,
        get_reservations,
        update_reservation,
        delete_reservation,
    ]
}
