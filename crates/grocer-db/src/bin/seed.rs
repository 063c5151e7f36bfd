//! Seeds a development database with the super-admin account and a handful
//! of grocery products.
//!
//! ```text
//! GROCER_DB=./grocer.db cargo run -p grocer-db --bin seed
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;

use grocer_core::{NewProduct, NewUser, Permission, PermissionSet, Role};
use grocer_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = std::env::var("GROCER_DB").unwrap_or_else(|_| "./grocer.db".to_string());
    info!(path = %path, "seeding database");

    let db = Database::new(DbConfig::new(path)).await?;

    let users = db.users();
    if users.list().await?.is_empty() {
        let admin = users
            .insert(NewUser {
                username: "osama".to_string(),
                password: "admin".to_string(),
                role: Role::Admin,
                permissions: PermissionSet::from(Permission::ALL),
            })
            .await?;
        info!(id = %admin.id, "created super-admin 'osama'");
    } else {
        info!("users already present, skipping");
    }

    let products = db.products();
    if products.list().await?.is_empty() {
        let samples = [
            ("Milk 1L", "Dairy", 1850, 40),
            ("Eggs (tray of 30)", "Dairy", 7200, 15),
            ("White Bread", "Bakery", 1200, 25),
            ("Rice 5kg", "Pantry", 9500, 8),
            ("Sunflower Oil 1L", "Pantry", 6300, 12),
            ("Tomatoes 1kg", "Produce", 1600, 30),
        ];
        for (name, category, price_cents, stock) in samples {
            products
                .insert(NewProduct {
                    name: name.to_string(),
                    category: category.to_string(),
                    price_cents,
                    stock,
                })
                .await?;
        }
        info!(count = samples.len(), "created sample products");
    } else {
        info!("products already present, skipping");
    }

    db.close().await;
    info!("seed complete");
    Ok(())
}
