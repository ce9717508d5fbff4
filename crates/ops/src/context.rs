//! Operations context for dependency injection

use apack_config::{Config, PackageSpec};
use apack_errors::{Error, OpsError};
use apack_events::{EventEmitter, EventSender};
use apack_net::NetClient;

/// Operations context providing access to all pipeline components
#[derive(Debug)]
pub struct OpsCtx {
    /// Package spec for this build
    pub spec: PackageSpec,
    /// Tool configuration
    pub config: Config,
    /// Network client
    pub net: NetClient,
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// Remove a pre-existing environment instead of failing
    pub force: bool,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for operations context
pub struct OpsCtxBuilder {
    spec: Option<PackageSpec>,
    config: Option<Config>,
    net: Option<NetClient>,
    tx: Option<EventSender>,
    force: bool,
}

impl OpsCtxBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            spec: None,
            config: None,
            net: None,
            tx: None,
            force: false,
        }
    }

    /// Set package spec
    #[must_use]
    pub fn with_spec(mut self, spec: PackageSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Set tool configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set network client
    #[must_use]
    pub fn with_net(mut self, net: NetClient) -> Self {
        self.net = Some(net);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set the force flag
    #[must_use]
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if any required component is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let spec = self.spec.ok_or_else(|| OpsError::MissingComponent {
            component: "spec".to_string(),
        })?;

        let config = self.config.ok_or_else(|| OpsError::MissingComponent {
            component: "config".to_string(),
        })?;

        let net = self.net.ok_or_else(|| OpsError::MissingComponent {
            component: "net".to_string(),
        })?;

        let tx = self.tx.ok_or_else(|| OpsError::MissingComponent {
            component: "event_sender".to_string(),
        })?;

        Ok(OpsCtx {
            spec,
            config,
            net,
            tx,
            force: self.force,
        })
    }
}

impl Default for OpsCtxBuilder {
    fn default() -> Self {
        Self::new()
    }
}
