use std::env;

use log::{error, info};
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, IndexModel};

use crate::constants;
use crate::models::task_model::Task;

// Establish the shared MongoDB client. Startup is fatal if the database is
// unreachable; index creation failures are logged and tolerated.
pub async fn init() -> Client {
    let mongo_url = env::var("MONGO_URL").expect("MONGO_URL environment variable is not set");

    let mut client_options = ClientOptions::parse(&mongo_url)
        .await
        .expect("Failed to parse MONGO_URL");
    client_options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

    let client = Client::with_options(client_options).expect("Failed to initialize MongoDB client");

    // The driver connects lazily; ping so an unreachable database aborts
    // startup instead of failing the first request.
    client
        .database(constants::MONGO_DATABASE)
        .run_command(doc! { "ping": 1 }, None)
        .await
        .expect("Failed to connect to MongoDB");
    info!("Successfully connected to MongoDB");

    create_indexes(&client).await;

    client
}

async fn create_indexes(client: &Client) {
    let collection = client
        .database(constants::MONGO_DATABASE)
        .collection::<Task>(constants::MONGO_TASK_COLLECTION);

    let index = IndexModel::builder()
        .keys(doc! { "status": 1, "priority": 1, "dueDate": 1 })
        .build();

    match collection.create_index(index, None).await {
        Ok(_) => info!("Index created on status, priority and dueDate"),
        Err(err) => error!("Error creating indexes: {}", err),
    }
}
