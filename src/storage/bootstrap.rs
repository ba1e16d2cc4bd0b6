//! Background table bootstrap for local development.
//!
//! Creates the notes table against the store emulator and seeds a few sample
//! notes. Runs as a detached task so process readiness never waits on it;
//! failures are logged and swallowed.

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use tracing::{info, warn};

use crate::domain::CreateNoteRequest;
use crate::errors::{Error, Result};

use super::note_repository::NoteRepository;

/// Spawn the bootstrap task. Fire-and-forget: the handle is dropped and any
/// failure is logged at warn, never fatal.
pub fn spawn_bootstrap(repository: NoteRepository, seed_sample_data: bool) {
    tokio::spawn(async move {
        if let Err(e) = run_bootstrap(&repository, seed_sample_data).await {
            warn!(error = %e, "Store bootstrap failed; the emulator may still be starting");
        }
    });
}

async fn run_bootstrap(repository: &NoteRepository, seed_sample_data: bool) -> Result<()> {
    // Give a just-launched emulator a moment to accept connections.
    tokio::time::sleep(Duration::from_secs(2)).await;

    let created = ensure_table(repository).await?;

    if created && seed_sample_data {
        // The table needs a moment to become active before writes land.
        tokio::time::sleep(Duration::from_secs(3)).await;
        seed_sample_notes(repository).await?;
    }

    Ok(())
}

/// Create the notes table if it does not exist. Returns whether it was
/// created by this call.
async fn ensure_table(repository: &NoteRepository) -> Result<bool> {
    let client = repository.client();
    let table_name = repository.table_name();

    let tables = client
        .list_tables()
        .send()
        .await
        .map_err(|e| Error::storage(format!("list_tables failed: {}", e)))?;

    if tables.table_names().contains(&table_name.to_string()) {
        return Ok(false);
    }

    let key_schema = KeySchemaElement::builder()
        .attribute_name("id")
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| Error::storage(format!("invalid key schema: {}", e)))?;
    let attribute = AttributeDefinition::builder()
        .attribute_name("id")
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| Error::storage(format!("invalid attribute definition: {}", e)))?;

    client
        .create_table()
        .table_name(table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map_err(|e| Error::storage(format!("create_table failed: {}", e)))?;

    info!(table = %table_name, "Created notes table");
    Ok(true)
}

async fn seed_sample_notes(repository: &NoteRepository) -> Result<()> {
    for request in sample_notes() {
        repository.create(request).await?;
    }
    info!(table = %repository.table_name(), "Inserted sample notes");
    Ok(())
}

fn sample_notes() -> Vec<CreateNoteRequest> {
    vec![
        CreateNoteRequest {
            title: "Welcome to the notes store".to_string(),
            content: "This is a sample note to demonstrate store connectivity. You can \
                      create, read, update, and delete notes through the API."
                .to_string(),
            tags: vec!["sample".to_string(), "welcome".to_string()],
            completed: false,
        },
        CreateNoteRequest {
            title: "API testing guide".to_string(),
            content: "Use the following endpoints to test the API:\n\
                      - GET /api/v1/notes - List all notes\n\
                      - POST /api/v1/notes - Create a new note\n\
                      - GET /api/v1/notes/{id} - Get a specific note\n\
                      - PUT /api/v1/notes/{id} - Update a note\n\
                      - DELETE /api/v1/notes/{id} - Delete a note"
                .to_string(),
            tags: vec!["api".to_string(), "testing".to_string(), "guide".to_string()],
            completed: false,
        },
        CreateNoteRequest {
            title: "Store connection test".to_string(),
            content: "If you can see this note, the store connection is working and the \
                      application seeded sample data successfully."
                .to_string(),
            tags: vec!["connection".to_string(), "test".to_string()],
            completed: true,
        },
    ]
}
