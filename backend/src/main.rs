mod logging;
mod params_structs;
mod routes;
mod settings;

use std::{io, sync::Arc};

use actix_web::{web, App, HttpServer};
use derisk_core::{DeriskLookup, LookupEvent};
use eth_client::ChainClient;
use tokio::sync::mpsc;
use tracing::{error, info};

use settings::Settings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let settings =
        Settings::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    logging::setup_logging(&settings.log_level, settings.log_json);

    let client = ChainClient::from_config(&settings.client).map_err(io::Error::other)?;

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let lookup = DeriskLookup::new(Arc::new(client)).with_events(events_tx);

    tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            match event {
                LookupEvent::Submitted { tx_hash } => info!(%tx_hash, "new lookup"),
                LookupEvent::Error { kind, message } => error!(?kind, %message, "lookup error"),
            }
        }
    });

    let lookup = web::Data::new(lookup);
    info!(bind = %settings.bind, "derisk backend listening");

    HttpServer::new(move || {
        App::new()
            .app_data(lookup.clone())
            .configure(routes::configure::<ChainClient>)
    })
    .bind(settings.bind)?
    .run()
    .await
}
