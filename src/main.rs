mod display;
mod watcher;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core (tracing)
    wxwatch_core::init()?;

    let (config, _validation) = wxwatch_core::Config::load_validated()?;

    let notifier = wxwatch_notify::platform_notifier();
    let mut watcher = watcher::Watcher::new(config, notifier)?;
    let poll_interval = watcher.poll_interval();

    tracing::info!(
        "wxwatch started, watching {} locations every {:?}",
        watcher.location_count(),
        poll_interval
    );

    loop {
        watcher.run_cycle().await;

        tokio::select! {
            _ = tokio::time::sleep(poll_interval) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupt received, shutting down");
                break;
            }
        }
    }

    Ok(())
}
