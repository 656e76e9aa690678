//! CLI command implementations (`parts init|get|list|words`).
//!
//! Each command opens its own pool, does one thing through [`PartService`],
//! prints a human-readable result to stdout and closes the pool.

use anyhow::Result;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::Config;
use crate::db;
use crate::error::Error;
use crate::migrate;
use crate::models::Part;
use crate::service::PartService;
use crate::store::SqliteStore;

/// Create the database file and schema.
pub async fn run_init(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    migrate::run_migrations(&pool).await?;
    db::close(&pool).await;
    println!("Database initialized successfully.");
    Ok(())
}

async fn open_service(config: &Config) -> Result<(PartService, SqlitePool)> {
    let pool = db::connect(config).await?;
    let service = PartService::new(Arc::new(SqliteStore::new(pool.clone())));
    Ok((service, pool))
}

pub async fn run_get(config: &Config, id: i64) -> Result<()> {
    let (service, pool) = open_service(config).await?;
    let result = service.get(id).await;
    db::close(&pool).await;

    match result {
        Ok(part) => {
            print_part(&part);
            Ok(())
        }
        Err(Error::NotFound(id)) => anyhow::bail!("part not found: {}", id),
        Err(e) => Err(e.into()),
    }
}

pub async fn run_list(config: &Config, skip: u32, limit: u32) -> Result<()> {
    let (service, pool) = open_service(config).await?;
    let result = service.list(skip, limit).await;
    db::close(&pool).await;
    let parts = result?;

    if parts.is_empty() {
        println!("No parts.");
        return Ok(());
    }

    println!("{:>6}  {:<30}  {:<30}  {:>8}  active", "id", "sku", "name", "weight");
    for part in &parts {
        println!(
            "{:>6}  {:<30}  {:<30}  {:>8}  {}",
            part.id, part.sku, part.name, part.weight_ounces, part.is_active
        );
    }
    println!();
    println!("{} part(s)", parts.len());
    Ok(())
}

pub async fn run_words(config: &Config) -> Result<()> {
    let (service, pool) = open_service(config).await?;
    let result = service.most_common_words().await;
    db::close(&pool).await;
    let words = result?;

    if words.is_empty() {
        println!("No descriptions.");
        return Ok(());
    }

    for (rank, wc) in words.iter().enumerate() {
        println!("{}. {} ({})", rank + 1, wc.word, wc.count);
    }
    Ok(())
}

fn print_part(part: &Part) {
    println!("--- Part ---");
    println!("id:            {}", part.id);
    println!("name:          {}", part.name);
    println!("sku:           {}", part.sku);
    println!(
        "description:   {}",
        part.description.as_deref().unwrap_or("(none)")
    );
    println!("weight_ounces: {}", part.weight_ounces);
    println!("is_active:     {}", part.is_active);
}
