use crate::EngineConfig;
use std::sync::Arc;
use tagsmith_bus::EventBus;
use tagsmith_schema::FieldDescriptor;

/// Explicitly constructed application context.
///
/// Everything a collaborator needs is handed over at construction — there is
/// no global registry to look things up in. The bus is shared; descriptors
/// and config are moved into the orchestrator.
pub struct AppContext {
    pub bus: Arc<EventBus>,
    pub descriptors: Vec<FieldDescriptor>,
    pub config: EngineConfig,
}

impl AppContext {
    /// Creates a context with a fresh bus.
    #[must_use]
    pub fn new(descriptors: Vec<FieldDescriptor>, config: EngineConfig) -> Self {
        Self {
            bus: Arc::new(EventBus::new()),
            descriptors,
            config,
        }
    }

    /// Creates a context from the field-definition configuration blob.
    pub fn from_descriptor_json(
        json: &str,
        config: EngineConfig,
    ) -> Result<Self, serde_json::Error> {
        let descriptors: Vec<FieldDescriptor> = serde_json::from_str(json)?;
        Ok(Self::new(descriptors, config))
    }

    /// Replaces the bus with a shared one (for tests or multi-component
    /// wiring).
    #[must_use]
    pub fn with_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = bus;
        self
    }
}
