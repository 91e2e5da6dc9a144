use anyhow::Context;
use tracing::{info, warn};

use larder_app::seed::demo_inventory;
use larder_app::{AppConfig, KitchenSession};
use larder_core::SystemClock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    larder_observability::init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!(model = %config.model, threshold = %config.reminder_threshold, "configuration loaded");

    let mut session = KitchenSession::new(config.gateway(), SystemClock)
        .with_threshold(config.reminder_threshold)
        .with_scan_expiry_days(config.scan_expiry_days);

    for item in demo_inventory(session.today()) {
        session.add_item(item).context("failed to seed demo inventory")?;
    }

    for row in session.inventory_view() {
        info!(
            item = row.item.name(),
            quantity = row.item.quantity(),
            expiry_date = %row.item.expiry_date(),
            status = %row.status,
            "inventory"
        );
    }

    if let Some(alert) = session.alert() {
        warn!(items = ?alert.item_names(), "{}", alert.message());
    }

    match session.suggest_recipes().await {
        Ok(recipes) => {
            for recipe in recipes {
                info!(
                    recipe = %recipe.name,
                    ingredients = recipe.ingredients.len(),
                    "{}",
                    recipe.description
                );
            }
        }
        Err(err) => warn!(error = %err.user_message(), "no recipe suggestions"),
    }

    Ok(())
}
