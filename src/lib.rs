//! # Reservation Desk - a small reservation booking API over MongoDB
//!
//! ## Routes
//!
//! - `GET /api`: liveness string
//! - `POST /create`: store the submitted JSON object as a reservation
//! - `GET /my/<email>`: every reservation with that email
//! - `PUT /update-one`: merge `updates` into the first reservation for `email`
//! - `DELETE /delete-one`: remove the first reservation for `email`
//!
//! ## Environment Variables
//!
//! - `MONGODB_URI`: MongoDB connection string (optional, the API runs disconnected without it)
//! - `PORT`: listen port, defaults to `5555`
//! - `ADDRESS`: listen address, defaults to `0.0.0.0`
//! - `PUBLIC_DIR`: static asset directory, defaults to `public`

use anyhow::Context;
use rocket::{Build, Rocket, catchers, fairing::AdHoc, fs::FileServer, http::Method};
use rocket_cors::{AllowedOrigins, CorsOptions};
use tracing::{info, warn};

use crate::{cli::Config, db::StoreHandle};

pub mod cli;
pub mod db;
pub mod errors;
pub mod handlers;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod models;

/// Assembles the Rocket instance around an already established store handle.
///
/// The handle is managed state, so tests can pass an in-memory store or a
/// disconnected handle.
pub fn build(config: &Config, store: StoreHandle) -> anyhow::Result<Rocket<Build>> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::all())
        .allowed_methods(
            vec![
                Method::Get,
                Method::Post,
                Method::Put,
                Method::Delete,
                Method::Options,
            ]
            .into_iter()
            .map(From::from)
            .collect(),
        )
        .to_cors()
        .context("Failed to build CORS fairing")?;

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", config.address));

    let mut rocket = rocket::custom(figment)
        .manage(store)
        .attach(cors)
        .attach(AdHoc::on_shutdown("Close database connection", |rocket| {
            Box::pin(async move {
                info!("shutting down");
                if let Some(store) = rocket.state::<StoreHandle>() {
                    store.close().await;
                }
            })
        }))
        .register(
            "/",
            catchers![
                handlers::catch400,
                handlers::catch404,
                handlers::catch422,
                handlers::catch500
            ],
        )
        .mount("/", rocket::routes![handlers::index])
        .mount("/", handlers::reservations::routes());

    if config.public_dir.is_dir() {
        info!(dir = %config.public_dir.display(), "serving static files");
        rocket = rocket.mount("/", FileServer::from(&config.public_dir));
    } else {
        warn!(dir = %config.public_dir.display(), "static directory not found, not serving files");
    }

    Ok(rocket)
}
