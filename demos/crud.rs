//! Document lifecycle against a running CouchDB.
//!
//! Bootstraps the database, then creates, reads, updates and deletes one
//! document, letting the client resolve revisions on its own.
//!
//! Run with: cargo run --example crud -- [host] [port] [database] [user] [password]
//!
//! Defaults: `http://localhost 5984 couch_http_demo admin password`.
//! Pass `-` as the port to leave it out of the URL.

use anyhow::{bail, Context};
use couch_http::{ClientConfig, ConnectionConfig, CouchClient, ReqwestTransport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "http://localhost".to_string());
    let port = match args.next().as_deref() {
        None => Some(5984),
        Some("-") => None,
        Some(port) => Some(port.parse().context("port must be a number or '-'")?),
    };
    let database = args.next().unwrap_or_else(|| "couch_http_demo".to_string());
    let user = args.next().unwrap_or_else(|| "admin".to_string());
    let password = args.next().unwrap_or_else(|| "password".to_string());

    let config = ConnectionConfig::new(user, password, database, host).with_port(port);
    let transport = ReqwestTransport::with_config(ClientConfig::default())?;
    let client = CouchClient::new(config, transport);

    println!("couch_http CRUD demo");
    println!("====================\n");
    println!("Database: {}", client.base_url());

    if !client.create_database().await? {
        bail!("could not create {}", client.base_url());
    }

    let id = uuid::Uuid::new_v4().simple().to_string();
    println!("\nCreating document {}", id);
    if !client.create(&id, r#"{"message":"hello","count":1}"#).await? {
        bail!("create rejected");
    }

    let doc = client.read(&id).await?;
    println!("Read back: {}", serde_json::to_string_pretty(&doc)?);

    println!("\nUpdating without a revision (client looks it up)");
    let updated = client
        .update(&id, r#"{"message":"hello again","count":2}"#, None)
        .await?;
    println!("  Updated: {}", updated);

    let doc = client.read(&id).await?;
    println!("  Revision now: {}", doc.get("_rev").cloned().unwrap_or_default());

    println!("\nDeleting");
    let deleted = client.delete(&id, None).await?;
    println!("  Deleted: {}", deleted);

    let gone = client.read(&id).await?;
    println!("  Read after delete is empty: {}", gone.is_empty());

    Ok(())
}
