//! net_status library: continuous endpoint reachability monitoring
//!
//! This library probes a fixed set of endpoints on a fixed period, keeps a
//! rolling summary and a short history of the results, and refreshes the
//! caller's network identity (public IP and location) on a randomized period.
//!
//! # Example
//!
//! ```no_run
//! use net_status::{build_engine, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     endpoints: vec!["github.com".to_string(), "example.org".to_string()],
//!     ..Default::default()
//! };
//!
//! let engine = build_engine(&config).await?;
//! engine.start().await;
//! engine.start_monitoring().await;
//! tokio::time::sleep(std::time::Duration::from_secs(6)).await;
//!
//! let metrics = engine.summarize().await;
//! println!("{}/{} online, avg {:.0}ms", metrics.online_count, metrics.total,
//!          metrics.mean_response_time_ms);
//! engine.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod batch;
pub mod config;
pub mod error_handling;
pub mod identity;
pub mod initialization;
pub mod metrics;
pub mod models;
pub mod probe;
pub mod scheduler;
pub mod status_server;
mod utils;

// Re-export public API
pub use app::OperatorCommand;
pub use config::{Config, LogFormat, LogLevel, ScheduleSettings};
pub use identity::{IdentityFetcher, IdentityInfo, IdentitySnapshot};
pub use metrics::{HistoryEntry, Metrics};
pub use models::{CheckResult, CheckStatus, Endpoint, StatusSnapshot};
pub use probe::ReachabilityProbe;
pub use run::{build_engine, run_monitor, run_monitor_with_input, MonitorReport};
pub use scheduler::MonitorEngine;

// Internal run module (contains the session driver)
mod run {
    use anyhow::{Context, Result};
    use log::{info, warn};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        apply_command, print_final_statistics, shutdown_gracefully, spawn_summary_logger,
        OperatorCommand,
    };
    use crate::config::Config;
    use crate::identity::HttpIdentityFetcher;
    use crate::initialization::{init_identity_client, init_probe_client};
    use crate::metrics::Metrics;
    use crate::probe::HttpProbe;
    use crate::scheduler::MonitorEngine;
    use crate::status_server::{bind_status_server, StatusState};

    /// Results of a monitoring session.
    #[derive(Debug, Clone)]
    pub struct MonitorReport {
        /// Number of monitored endpoints
        pub endpoints: usize,
        /// Completed batch cycles
        pub cycles_completed: usize,
        /// Completed identity refreshes (successful or not)
        pub identity_refreshes: usize,
        /// Probe and identity failures recorded during the session
        pub total_failures: usize,
        /// Session duration in seconds
        pub elapsed_seconds: f64,
        /// Summary of the last committed cycle
        pub final_metrics: Metrics,
    }

    /// Validates `config`, loads the endpoint set and wires up an engine with the
    /// HTTP probe and identity fetcher. No timeline is started.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration, an unreadable or empty
    /// endpoints file, or HTTP client construction failures.
    pub async fn build_engine(config: &Config) -> Result<MonitorEngine> {
        config.validate().context("Invalid configuration")?;
        let endpoints = config
            .load_endpoints()
            .await
            .context("Failed to load endpoints")?;

        let probe_client = init_probe_client(config).context("Failed to initialize probe client")?;
        let identity_client =
            init_identity_client(config).context("Failed to initialize identity client")?;

        let engine = MonitorEngine::new(
            endpoints,
            Arc::new(HttpProbe::new(probe_client)),
            Arc::new(HttpIdentityFetcher::new(
                identity_client,
                config.identity_url.clone(),
            )),
            config.schedule_settings(),
        )
        .context("Invalid schedule settings")?;
        Ok(engine)
    }

    /// Runs a monitoring session driven by operator commands on stdin.
    ///
    /// The session ends on `quit` or Ctrl-C. Closing stdin does not end it.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine can not be built or the status server
    /// can not bind its port.
    pub async fn run_monitor(config: Config) -> Result<MonitorReport> {
        run_monitor_with_input(config, BufReader::new(tokio::io::stdin())).await
    }

    /// Like [`run_monitor`], reading operator commands from `input`.
    ///
    /// # Errors
    ///
    /// See [`run_monitor`].
    pub async fn run_monitor_with_input<R>(config: Config, input: R) -> Result<MonitorReport>
    where
        R: AsyncBufRead + Unpin,
    {
        let start_time = Instant::now();
        let engine = Arc::new(build_engine(&config).await?);

        let status_server_task = match config.status_port {
            Some(port) => {
                let serve = bind_status_server(port, StatusState::new(Arc::clone(&engine)))
                    .await
                    .context("Failed to start status server")?;
                Some(tokio::spawn(async move {
                    if let Err(e) = serve.await {
                        log::error!("{:#}", e);
                    }
                }))
            }
            None => None,
        };

        info!(
            "Monitoring {} endpoints (interval {}ms, probe timeout {}ms)",
            engine.endpoints().len(),
            config.batch_interval_ms,
            config.probe_timeout_ms
        );
        engine.start().await;
        if config.autostart {
            engine.start_monitoring().await;
        } else {
            info!("Type 'start' (or press Enter) to begin monitoring, 'quit' to exit");
        }

        let cancel = CancellationToken::new();
        let logging_task = (config.summary_interval_secs > 0).then(|| {
            spawn_summary_logger(
                Arc::clone(&engine),
                Duration::from_secs(config.summary_interval_secs),
                cancel.clone(),
            )
        });

        let mut lines = input.lines();
        let mut input_open = true;
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) => match line.parse::<OperatorCommand>() {
                        Ok(command) => {
                            if !apply_command(&engine, command).await {
                                break;
                            }
                        }
                        Err(e) => warn!("{}", e),
                    },
                    Ok(None) => {
                        info!("Input closed; press Ctrl-C to exit");
                        input_open = false;
                    }
                    Err(e) => {
                        warn!("Failed to read operator input: {}", e);
                        input_open = false;
                    }
                },
                _ = &mut ctrl_c => {
                    info!("Interrupted, shutting down");
                    break;
                }
            }
        }

        shutdown_gracefully(&engine, cancel, logging_task, status_server_task).await;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_final_statistics(&engine, elapsed_seconds).await;

        Ok(MonitorReport {
            endpoints: engine.endpoints().len(),
            cycles_completed: engine.cycles_completed(),
            identity_refreshes: engine.identity_refreshes(),
            total_failures: engine.failure_stats().total_errors(),
            elapsed_seconds,
            final_metrics: engine.summarize().await,
        })
    }
}
