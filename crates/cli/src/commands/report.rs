//! Reporting commands.

use choco_shelf_store::settings::SettingsRepository;
use choco_shelf_store::stats::StatsRepository;

use super::{CliError, StoreTarget};

/// Show the order aggregate.
///
/// Prints the stored stats singleton as-is. The aggregate is maintained
/// incrementally by order writes and is never recomputed here, so what you
/// see is what the store believes - not a fold over the orders collection.
///
/// # Errors
///
/// Returns [`CliError`] if the store cannot be read.
pub fn stats(target: &StoreTarget) -> Result<(), CliError> {
    let mut store = target.open()?;

    let stats = StatsRepository::new(&mut store).load()?;
    let settings = SettingsRepository::new(&mut store).load()?;

    tracing::info!("Order stats ({})", target.namespace);
    tracing::info!("  Total orders:  {}", stats.total_orders);
    tracing::info!(
        "  Total revenue: {}{}",
        settings.currency.symbol(),
        stats.total_revenue
    );
    match stats.last_order_at {
        Some(at) => tracing::info!("  Last order:    {at}"),
        None => tracing::info!("  Last order:    never"),
    }
    Ok(())
}

/// Show stored bytes per key and the namespace total.
///
/// # Errors
///
/// Returns [`CliError`] if the store cannot be read.
pub fn size(target: &StoreTarget) -> Result<(), CliError> {
    let store = target.open()?;

    let snapshot = store.export()?;
    for (key, value) in snapshot.iter() {
        tracing::info!("  {key}: {} bytes", value.len());
    }
    tracing::info!("Total: {} bytes", store.size_in_bytes()?);
    Ok(())
}
