//! Macros for declaring additional process-wide registries.

/// Declares a module holding its own lazily created, process-wide [`Registry`](crate::Registry).
///
/// The macro generates a module containing:
/// - A hidden static registry, isolated from [`Registry::shared`](crate::Registry::shared)
/// - `registry()` returning it
/// - Free functions delegating to it (`remember`, `remember_arc`, `make`, `make_as`,
///   `contains`, `set_trace_callback`, `clear_trace_callback`)
///
/// # Examples
///
/// ```rust
/// use named_singleton::define_registry;
///
/// struct Pool {
///     size: usize,
/// }
///
/// define_registry!(services);
///
/// services::remember(|| Pool { size: 8 }, "pool", false)?;
///
/// let pool = services::make_as::<Pool>("pool")?.unwrap();
/// assert_eq!(pool.size, 8);
/// # Ok::<(), named_singleton::RegistryError>(())
/// ```
///
/// # Multiple Registries
///
/// ```rust
/// use named_singleton::define_registry;
///
/// struct Url(&'static str);
///
/// define_registry!(database);
/// define_registry!(cache);
///
/// database::remember(|| Url("postgres://localhost"), "url", false)?;
/// cache::remember(|| Url("redis://localhost"), "url", false)?;
///
/// assert_eq!(database::make_as::<Url>("url")?.unwrap().0, "postgres://localhost");
/// assert_eq!(cache::make_as::<Url>("url")?.unwrap().0, "redis://localhost");
/// # Ok::<(), named_singleton::RegistryError>(())
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            // Storage for this module's registry (module-private)
            static REGISTRY: LazyLock<$crate::Registry> = LazyLock::new($crate::Registry::scoped);

            /// The registry behind this module's functions.
            pub fn registry() -> &'static $crate::Registry {
                &REGISTRY
            }

            /// Store the value produced by `factory`.
            pub fn remember<T: Send + Sync + 'static>(
                factory: impl FnOnce() -> T,
                name: &str,
                force: bool,
            ) -> Result<&'static $crate::Registry, $crate::RegistryError> {
                REGISTRY.remember(factory, name, force)
            }

            /// Store the `Arc` produced by `factory`.
            pub fn remember_arc<T: Send + Sync + 'static>(
                factory: impl FnOnce() -> Arc<T>,
                name: &str,
                force: bool,
            ) -> Result<&'static $crate::Registry, $crate::RegistryError> {
                REGISTRY.remember_arc(factory, name, force)
            }

            /// Look up a stored value.
            pub fn make(name: &str) -> Result<Option<$crate::Instance>, $crate::RegistryError> {
                REGISTRY.make(name)
            }

            /// Look up a stored value of type `T`.
            pub fn make_as<T: Send + Sync + 'static>(
                name: &str,
            ) -> Result<Option<Arc<T>>, $crate::RegistryError> {
                REGISTRY.make_as(name)
            }

            /// Check whether something is stored under `name`.
            pub fn contains(name: &str) -> bool {
                REGISTRY.contains(name)
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                REGISTRY.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                REGISTRY.clear_trace_callback()
            }
        }
    };
}
