use anyhow::Result;

use warden_resources::{AddressListInventory, HttpInventory};

use crate::config::Config;

/// Resolve a managed address list directly, outside any lifecycle event
pub async fn run(name: String) -> Result<()> {
    let config = Config::load()?;
    let inventory = HttpInventory::new(config.inventory_url.clone());

    let lists = inventory.list().await?;
    match lists.into_iter().find(|list| list.name == name) {
        Some(list) => {
            println!("{}", serde_json::to_string_pretty(&list)?);
            Ok(())
        }
        None => anyhow::bail!("no managed address list named '{}'", name),
    }
}
