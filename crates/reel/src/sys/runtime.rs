use crate::events::AppEvent;
use async_channel::Sender;
use reel_core::protocol::SOCKET_PATH;
use std::thread;
use tokio::runtime::Builder;
use tokio::task::JoinSet;

/// Runs the control socket and the config watcher on a small tokio runtime in
/// its own thread. Events reach the GTK side through `tx`.
pub fn start_background_services(tx: Sender<AppEvent>) -> std::io::Result<()> {
    let rt = Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("reel-io")
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("reel-services".into())
        .spawn(move || {
            rt.block_on(async move {
                let mut services = JoinSet::new();
                services.spawn(crate::sys::server::run_server(SOCKET_PATH.into(), tx.clone()));
                services.spawn(crate::config::run_async_watcher(tx));

                while let Some(res) = services.join_next().await {
                    if let Err(e) = res {
                        log::error!("Background service failed: {}", e);
                    }
                }
                log::warn!("All background services stopped");
            });
        })?;

    Ok(())
}
