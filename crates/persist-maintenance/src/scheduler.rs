//! Scheduled optimisation loop

use std::time::Duration;

use persist_core::{CancellationToken, DatabaseProvider};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

/// Outcome counters for a finished maintenance loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub succeeded: u64,
    pub failed: u64,
}

/// Run `run_scheduled_optimisation` every `interval` until `cancel` fires
///
/// Failed runs are logged and the loop keeps going. A run aborted by
/// cancellation ends the loop without counting as a failure.
pub async fn run_maintenance_loop(
    provider: &dyn DatabaseProvider,
    interval: Duration,
    optimise_on_start: bool,
    cancel: &CancellationToken,
) -> MaintenanceReport {
    let mut report = MaintenanceReport::default();
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // First tick completes immediately
    if !optimise_on_start {
        ticker.tick().await;
    }

    info!(interval_secs = interval.as_secs(), optimise_on_start, "Maintenance loop started");

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        match provider.run_scheduled_optimisation(cancel).await {
            Ok(()) => {
                report.succeeded += 1;
                info!(run = report.succeeded, "Scheduled optimisation completed");
            }
            Err(e) if e.is_cancelled() => {
                warn!("Scheduled optimisation cancelled");
                break;
            }
            Err(e) => {
                report.failed += 1;
                error!(error = %e, code = e.code(), "Scheduled optimisation failed");
            }
        }
    }

    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "Maintenance loop ended"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use persist_core::{
        ConventionBuilder, DatabaseConfigurationOptions, ModelDefinition, ProviderError,
        ProviderResult, Session, SessionFactory, SessionOptionsBuilder,
    };

    /// Provider that replays scripted optimisation outcomes
    ///
    /// Once the script runs out it cancels the loop's token.
    struct ScriptedProvider {
        outcomes: Mutex<VecDeque<ProviderResult<()>>>,
        calls: AtomicUsize,
        cancel: CancellationToken,
    }

    impl ScriptedProvider {
        fn new(outcomes: Vec<ProviderResult<()>>, cancel: CancellationToken) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicUsize::new(0),
                cancel,
            }
        }
    }

    #[async_trait]
    impl DatabaseProvider for ScriptedProvider {
        fn session_factory(&self) -> Option<Arc<dyn SessionFactory>> {
            None
        }

        fn set_session_factory(&mut self, _factory: Arc<dyn SessionFactory>) {}

        fn initialise(
            &self,
            _options: &mut SessionOptionsBuilder,
            _database_configuration: &DatabaseConfigurationOptions,
        ) -> ProviderResult<()> {
            Ok(())
        }

        async fn run_scheduled_optimisation(&self, _cancel: &CancellationToken) -> ProviderResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.outcomes.lock().unwrap().pop_front();
            match next {
                Some(outcome) => outcome,
                None => {
                    self.cancel.cancel();
                    Err(ProviderError::Cancelled)
                }
            }
        }

        async fn run_shutdown_task(&self, _cancel: &CancellationToken) -> ProviderResult<()> {
            Ok(())
        }

        async fn migration_backup_fast(&self, _cancel: &CancellationToken) -> ProviderResult<String> {
            Ok(String::new())
        }

        async fn restore_backup_fast(&self, _key: &str, _cancel: &CancellationToken) -> ProviderResult<()> {
            Ok(())
        }

        async fn delete_backup(&self, _key: &str) -> ProviderResult<()> {
            Ok(())
        }

        async fn purge_database(
            &self,
            _session: &mut dyn Session,
            _table_names: Option<&[String]>,
        ) -> ProviderResult<()> {
            Ok(())
        }

        fn on_model_creating(&self, _model: &mut ModelDefinition) {}

        fn configure_conventions(&self, _conventions: &mut ConventionBuilder) {}
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_loop() {
        let cancel = CancellationToken::new();
        let provider = ScriptedProvider::new(
            vec![
                Ok(()),
                Err(ProviderError::BackendExecution("connection refused".to_string())),
                Ok(()),
            ],
            cancel.clone(),
        );

        let report =
            run_maintenance_loop(&provider, Duration::from_millis(5), true, &cancel).await;

        assert_eq!(report, MaintenanceReport { succeeded: 2, failed: 1 });
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_runs_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let provider = ScriptedProvider::new(vec![Ok(())], cancel.clone());

        let report = run_maintenance_loop(&provider, Duration::from_millis(5), true, &cancel).await;

        assert_eq!(report, MaintenanceReport::default());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_without_optimise_on_start_waits_one_interval() {
        let cancel = CancellationToken::new();
        let provider = ScriptedProvider::new(vec![Ok(())], cancel.clone());

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let report = run_maintenance_loop(&provider, Duration::from_secs(3600), false, &cancel).await;

        assert_eq!(report, MaintenanceReport::default());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
