//! The application lifecycle.
//!
//! An [`Application`] owns one action registry, the manifest of controllers
//! it may serve, and a [`Dispatcher`] bound to both. Nothing is registered
//! until [`start`](Application::start); [`reload`](Application::reload)
//! swaps in a freshly built snapshot and [`stop`](Application::stop)
//! publishes an empty one. Several applications can live in one process
//! since none of this state is global.
//!
//! ```rust
//! use switchyard_core::{InvocationMode, InvocationRequest};
//! use switchyard_framework::{ControllerDescriptor, action, define_controller};
//! use switchyard_runtime::Application;
//!
//! async fn ping() -> &'static str {
//!     "pong"
//! }
//!
//! static PING: ControllerDescriptor = define_controller! {
//!     name: "ping",
//!     actions: [action("ping").handler(ping)],
//! };
//!
//! let app = Application::builder()
//!     .config(Default::default())
//!     .controller(PING)
//!     .build()
//!     .unwrap();
//! app.start().unwrap();
//!
//! let request = InvocationRequest::builder("ping", InvocationMode::Cli).build().unwrap();
//! let result = tokio_test::block_on(app.dispatch(request));
//! assert!(result.is_success());
//! ```

use std::fmt;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use switchyard_core::{InvocationRequest, InvocationResult};
use switchyard_framework::{
    ActionRegistry, ControllerDescriptor, Dispatcher, Manifest, RegistrySnapshot, StateMap,
};
use tracing::{info, warn};

use crate::config::{ConfigLoader, ControllersConfig, SwitchyardConfig, validate_config};
use crate::error::{RuntimeError, RuntimeResult};
use crate::logging;

/// Where an application is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Running,
    Stopped,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured set of controllers served through one dispatcher.
pub struct Application {
    config: RwLock<SwitchyardConfig>,
    manifest: Manifest,
    registry: Arc<ActionRegistry>,
    dispatcher: Dispatcher,
    lifecycle: Mutex<LifecycleState>,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::new()
    }

    fn new(config: SwitchyardConfig, manifest: Manifest, state: StateMap) -> Self {
        let registry = Arc::new(ActionRegistry::new());
        let dispatcher = Dispatcher::new(Arc::clone(&registry))
            .with_state(Arc::new(state))
            .explain_failures(config.dispatch.explain_failures);

        info!(
            controllers = manifest.len(),
            explain_failures = config.dispatch.explain_failures,
            "Application created"
        );

        Self {
            config: RwLock::new(config),
            manifest,
            registry,
            dispatcher,
            lifecycle: Mutex::new(LifecycleState::Created),
        }
    }

    /// Registers the enabled controllers and starts serving.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::InvalidState`] unless the application was just created.
    /// - [`RuntimeError::Registration`] if the controllers conflict; the
    ///   application stays in the created state.
    pub fn start(&self) -> RuntimeResult<()> {
        let mut lifecycle = self.lifecycle.lock();
        Self::expect_state(*lifecycle, LifecycleState::Created, "start")?;

        self.warn_unknown_controllers();
        let snapshot = self.build_snapshot()?;
        self.registry.publish(snapshot);
        *lifecycle = LifecycleState::Running;

        info!(actions = self.registry.load().len(), "Application started");
        Ok(())
    }

    /// Rebuilds the registry from the manifest and swaps it in atomically.
    ///
    /// In-flight dispatches finish against the snapshot they started with.
    /// On error the previous snapshot stays current.
    pub fn reload(&self) -> RuntimeResult<()> {
        let lifecycle = self.lifecycle.lock();
        Self::expect_state(*lifecycle, LifecycleState::Running, "reload")?;

        let snapshot = self.build_snapshot()?;
        self.registry.publish(snapshot);
        info!(generation = self.registry.generation(), "Application reloaded");
        Ok(())
    }

    /// Replaces the controller selection, reloading if the application is running.
    ///
    /// The new selection is validated first and only kept if the reload
    /// succeeds.
    pub fn reconfigure(&self, controllers: ControllersConfig) -> RuntimeResult<()> {
        let mut candidate = self.config.read().clone();
        candidate.controllers = controllers;
        validate_config(&candidate)?;

        let previous = std::mem::replace(&mut *self.config.write(), candidate);
        if self.state() != LifecycleState::Running {
            return Ok(());
        }
        if let Err(err) = self.reload() {
            *self.config.write() = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Stops serving; every later dispatch fails with `NotFound`.
    pub fn stop(&self) -> RuntimeResult<()> {
        let mut lifecycle = self.lifecycle.lock();
        Self::expect_state(*lifecycle, LifecycleState::Running, "stop")?;

        self.registry.clear();
        *lifecycle = LifecycleState::Stopped;
        info!("Application stopped");
        Ok(())
    }

    /// Starts, waits for `shutdown`, then stops.
    pub async fn run_until<F>(&self, shutdown: F) -> RuntimeResult<()>
    where
        F: Future<Output = ()>,
    {
        self.start()?;
        shutdown.await;
        self.stop()
    }

    /// Starts and serves until Ctrl+C (or SIGTERM on Unix).
    pub async fn run(&self) -> RuntimeResult<()> {
        self.run_until(wait_for_shutdown()).await
    }

    pub fn state(&self) -> LifecycleState {
        *self.lifecycle.lock()
    }

    /// Returns a snapshot of the current configuration.
    pub fn config(&self) -> SwitchyardConfig {
        self.config.read().clone()
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn registry(&self) -> &Arc<ActionRegistry> {
        &self.registry
    }

    /// The dispatcher front ends should call. Clones share this application's registry.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub async fn dispatch(&self, request: InvocationRequest) -> InvocationResult {
        self.dispatcher.dispatch(request).await
    }

    fn build_snapshot(&self) -> RuntimeResult<RegistrySnapshot> {
        let controllers = self.config.read().controllers.clone();
        let snapshot = self
            .manifest
            .build_snapshot(|c: &ControllerDescriptor| controllers.is_enabled(c.name))?;
        Ok(snapshot)
    }

    fn warn_unknown_controllers(&self) {
        let config = self.config.read();
        let known: Vec<&str> = self.manifest.names().collect();
        for name in config
            .controllers
            .enabled
            .iter()
            .chain(&config.controllers.disabled)
        {
            if !known.contains(&name.as_str()) {
                warn!(controller = %name, "Configured controller is not in the manifest");
            }
        }
    }

    fn expect_state(
        current: LifecycleState,
        expected: LifecycleState,
        operation: &'static str,
    ) -> RuntimeResult<()> {
        if current == expected {
            Ok(())
        } else {
            warn!(operation, state = %current, "Rejected lifecycle transition");
            Err(RuntimeError::InvalidState {
                operation,
                state: current,
            })
        }
    }
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("state", &self.state())
            .field("manifest", &self.manifest)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("Received Ctrl+C, shutting down"),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                }
                return;
            }
            Err(err) => warn!(error = %err, "Failed to register SIGTERM handler"),
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(err) => warn!(error = %err, "Failed to listen for Ctrl+C, shutting down"),
    }
}

/// Builder for an [`Application`].
pub struct ApplicationBuilder {
    config_loader: ConfigLoader,
    config: Option<SwitchyardConfig>,
    manifest: Manifest,
    state: StateMap,
    init_logging: bool,
}

impl ApplicationBuilder {
    pub fn new() -> Self {
        Self {
            config_loader: ConfigLoader::new(),
            config: None,
            manifest: Manifest::new(),
            state: StateMap::new(),
            init_logging: false,
        }
    }

    /// Loads this configuration file instead of searching.
    pub fn config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.file(path);
        self
    }

    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.config_loader = self.config_loader.profile(profile);
        self
    }

    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_loader = self.config_loader.search_path(path);
        self
    }

    pub fn without_env(mut self) -> Self {
        self.config_loader = self.config_loader.without_env();
        self
    }

    /// Merges configuration on top of the loaded sources.
    pub fn merge(mut self, config: SwitchyardConfig) -> Self {
        self.config_loader = self.config_loader.merge(config);
        self
    }

    /// Overrides one key on top of the loaded sources, e.g.
    /// `.set("dispatch.explain_failures", true)`.
    pub fn set<V: serde::Serialize>(mut self, key: &str, value: V) -> Self {
        self.config_loader = self.config_loader.set(key, value);
        self
    }

    /// Uses `config` as is; no files or environment variables are read.
    pub fn config(mut self, config: SwitchyardConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn controller(mut self, controller: ControllerDescriptor) -> Self {
        self.manifest.add(controller);
        self
    }

    pub fn manifest(mut self, manifest: Manifest) -> Self {
        for controller in manifest.controllers() {
            self.manifest.add(*controller);
        }
        self
    }

    /// Shares `value` with every handler through `State<T>`.
    pub fn state<T: Send + Sync + 'static>(mut self, value: T) -> Self {
        self.state.insert(value);
        self
    }

    /// Installs the global tracing subscriber from the logging config on build.
    pub fn with_logging(mut self) -> Self {
        self.init_logging = true;
        self
    }

    pub fn build(self) -> RuntimeResult<Application> {
        let config = match self.config {
            Some(config) => {
                validate_config(&config)?;
                config
            }
            None => self.config_loader.load()?,
        };

        if self.init_logging {
            logging::init_from_config(&config.logging);
        }

        Ok(Application::new(config, self.manifest, self.state))
    }
}

impl Default for ApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
