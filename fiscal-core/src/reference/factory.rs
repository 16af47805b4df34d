use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::source::{ReferenceSource, SourceError};

/// Backend-agnostic source configuration.
///
/// `backend` must match the [`SourceFactory::backend_name`] of a registered
/// factory. `location` is handed to that factory unchanged.
///
/// | backend     | location                          |
/// |-------------|-----------------------------------|
/// | `embedded`  | ignored                           |
/// | `directory` | folder holding the CSV/TOML files |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub backend: String,
    #[serde(default)]
    pub location: Option<PathBuf>,
}

impl SourceConfig {
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            location: None,
        }
    }

    pub fn with_location(
        mut self,
        location: impl Into<PathBuf>,
    ) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::new("embedded")
    }
}

/// One implementation per backend, registered with a [`SourceRegistry`] at
/// startup.
pub trait SourceFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn ReferenceSource>, SourceError>;
}

/// [`SourceFactory`] instances keyed by backend name.
pub struct SourceRegistry {
    factories: HashMap<&'static str, Box<dyn SourceFactory>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory, replacing any previous one with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn SourceFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Builds the source for `config.backend`.
    ///
    /// # Errors
    /// * [`SourceError::Configuration`] when no factory carries that name.
    /// * Any error the chosen factory returns.
    pub fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn ReferenceSource>, SourceError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                SourceError::Configuration(format!(
                    "unknown reference source '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::ReferenceData;

    // Never loaded; the registry tests only check routing.
    struct EmptySource;

    impl ReferenceSource for EmptySource {
        fn list_fiscal_years(&self) -> Result<Vec<i32>, SourceError> {
            Ok(Vec::new())
        }

        fn load(
            &self,
            fiscal_year: i32,
        ) -> Result<ReferenceData, SourceError> {
            Err(SourceError::YearNotFound(fiscal_year))
        }
    }

    struct StubFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    impl SourceFactory for StubFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }

        fn create(
            &self,
            _config: &SourceConfig,
        ) -> Result<Box<dyn ReferenceSource>, SourceError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(EmptySource))
        }
    }

    struct FailingFactory;

    impl SourceFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }

        fn create(
            &self,
            _config: &SourceConfig,
        ) -> Result<Box<dyn ReferenceSource>, SourceError> {
            Err(SourceError::Io("intentional failure".to_string()))
        }
    }

    fn stub_factory(name: &'static str) -> (Box<dyn SourceFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    #[test]
    fn default_config_is_embedded() {
        let config = SourceConfig::default();

        assert_eq!(config.backend, "embedded");
        assert_eq!(config.location, None);
    }

    #[test]
    fn config_deserializes_without_location() {
        let config: SourceConfig = serde_json::from_str(r#"{"backend":"directory"}"#).unwrap();

        assert_eq!(config, SourceConfig::new("directory"));
    }

    #[test]
    fn new_registry_has_no_backends() {
        assert!(SourceRegistry::new().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut registry = SourceRegistry::new();
        let (directory, _) = stub_factory("directory");
        let (embedded, _) = stub_factory("embedded");
        registry.register(embedded);
        registry.register(directory);

        assert_eq!(registry.available_backends(), vec!["directory", "embedded"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut registry = SourceRegistry::new();
        let (old, old_called) = stub_factory("embedded");
        let (new, new_called) = stub_factory("embedded");
        registry.register(old);
        registry.register(new);

        registry.create(&SourceConfig::default()).unwrap();

        assert_eq!(registry.available_backends(), vec!["embedded"]);
        assert!(!old_called.load(Ordering::SeqCst));
        assert!(new_called.load(Ordering::SeqCst));
    }

    #[test]
    fn create_calls_only_matching_factory() {
        let mut registry = SourceRegistry::new();
        let (embedded, embedded_called) = stub_factory("embedded");
        let (directory, directory_called) = stub_factory("directory");
        registry.register(embedded);
        registry.register(directory);

        let source = registry
            .create(&SourceConfig::new("directory").with_location("/tmp/data"))
            .unwrap();

        assert!(directory_called.load(Ordering::SeqCst));
        assert!(!embedded_called.load(Ordering::SeqCst));
        assert_eq!(source.list_fiscal_years(), Ok(Vec::new()));
    }

    #[test]
    fn unknown_backend_names_requested_and_available() {
        let mut registry = SourceRegistry::new();
        let (embedded, _) = stub_factory("embedded");
        registry.register(embedded);

        match registry.create(&SourceConfig::new("sqlite")) {
            Err(SourceError::Configuration(msg)) => {
                assert!(msg.contains("sqlite"), "should name the requested backend");
                assert!(msg.contains("embedded"), "should list available backends");
            }
            Err(other) => panic!("expected Configuration error, got {other:?}"),
            Ok(_) => panic!("expected Configuration error, got a source"),
        }
    }

    #[test]
    fn create_propagates_factory_error() {
        let mut registry = SourceRegistry::new();
        registry.register(Box::new(FailingFactory));

        assert!(matches!(
            registry.create(&SourceConfig::new("failing")),
            Err(SourceError::Io(msg)) if msg == "intentional failure"
        ));
    }
}
