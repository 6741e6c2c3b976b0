//! The named object registry.
//!
//! A [`Registry`] maps instance names to shared values. Names are digested into
//! a [`Key`] before they touch the map, and the last stored name is kept as a
//! one-shot fallback for [`Registry::make`].
//!
//! # Examples
//!
//! ```
//! use named_singleton::Registry;
//!
//! struct Mailer {
//!     host: String,
//! }
//!
//! let registry = Registry::scoped();
//! registry.remember(|| Mailer { host: "smtp.local".into() }, "mailer", false)?;
//!
//! let mailer = registry.make_as::<Mailer>("mailer")?.unwrap();
//! assert_eq!(mailer.host, "smtp.local");
//! # Ok::<(), named_singleton::RegistryError>(())
//! ```

use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, LazyLock, Mutex, MutexGuard},
};

use tracing::{debug, trace};

use crate::{Key, RegistryError, RegistryEvent, TraceCallback};

/// A stored value, type-erased.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// The process-wide registry behind [`Registry::shared`].
static SHARED: LazyLock<Registry> = LazyLock::new(|| {
    trace!("creating shared registry");
    Registry::new()
});

#[derive(Default)]
struct State {
    instances: HashMap<Key, Instance>,
    /// Name of the most recently remembered entry, empty when consumed.
    current: String,
}

/// Container storing shared values under names.
///
/// Obtain one with [`Registry::shared`] (the same instance for the whole
/// process) or [`Registry::scoped`] (a fresh, isolated instance owned by the
/// caller).
///
/// Every operation takes `&self`. The map and the fallback name sit behind a
/// single mutex, so a duplicate check and the insert that follows it are one
/// atomic step.
pub struct Registry {
    state: Mutex<State>,
    trace: Mutex<Option<TraceCallback>>,
}

impl Registry {
    fn new() -> Self {
        Registry {
            state: Mutex::new(State::default()),
            trace: Mutex::new(None),
        }
    }

    /// Returns the process-wide registry, creating it on first use.
    ///
    /// Every call returns a reference to the same instance. It is never torn down.
    pub fn shared() -> &'static Registry {
        &SHARED
    }

    /// Creates a new, empty registry independent from every other one.
    ///
    /// Its entries are dropped together with it. Values already handed out
    /// through [`make`](Self::make) stay alive through their own `Arc`.
    pub fn scoped() -> Registry {
        trace!("creating scoped registry");
        Registry::new()
    }

    // -------------------------------------------------------------------------------------------------
    // Storing
    // -------------------------------------------------------------------------------------------------

    /// Stores the value produced by `factory`.
    ///
    /// With an empty `name` the value is stored under its type name
    /// (`std::any::type_name::<T>()`). The stored name becomes the fallback for a
    /// later nameless [`make`](Self::make).
    ///
    /// Returns `self` so calls can be chained with `?`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidValue`] if `T` is a bare scalar (`bool`, `char`,
    ///   numbers, `()`, `&str`, `String`)
    /// - [`RegistryError::DuplicateName`] if the name is taken and `force` is `false`
    ///
    /// The registry is left untouched on error.
    pub fn remember<T, F>(
        &self,
        factory: F,
        name: &str,
        force: bool,
    ) -> Result<&Self, RegistryError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        self.remember_arc(|| Arc::new(factory()), name, force)
    }

    /// Stores the `Arc` produced by `factory`, sharing its allocation.
    ///
    /// Same contract as [`remember`](Self::remember). The inferred name is the
    /// name of `T`, not of `Arc<T>`.
    pub fn remember_arc<T, F>(
        &self,
        factory: F,
        name: &str,
        force: bool,
    ) -> Result<&Self, RegistryError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Arc<T>,
    {
        // Runs outside the lock so the factory may use this registry itself.
        let value = factory();

        if is_scalar::<T>() {
            return Err(RegistryError::InvalidValue {
                type_name: type_name::<T>(),
            });
        }

        let name = if name.is_empty() { type_name::<T>() } else { name };
        let key = Key::of(name);

        let replaced = {
            let mut state = self.lock();
            let replaced = state.instances.contains_key(&key);
            if replaced && !force {
                return Err(RegistryError::DuplicateName {
                    name: name.to_string(),
                });
            }
            state.instances.insert(key, value);
            state.current = name.to_string();
            replaced
        };

        debug!(name = %name, key = %key, replaced, "remembered instance");
        self.emit_event(&RegistryEvent::Remember {
            name: name.to_string(),
            replaced,
        });

        Ok(self)
    }

    // -------------------------------------------------------------------------------------------------
    // Retrieving
    // -------------------------------------------------------------------------------------------------

    /// Looks up a stored value.
    ///
    /// With an empty `name` the last remembered name is used. Any successful
    /// lookup clears that fallback, so two nameless calls in a row need a
    /// `remember` in between.
    ///
    /// Returns `Ok(None)` when nothing is stored under the name.
    ///
    /// # Errors
    ///
    /// [`RegistryError::MissingName`] if `name` is empty and there is no fallback.
    pub fn make(&self, name: &str) -> Result<Option<Instance>, RegistryError> {
        self.lookup(name).map(|(_, instance)| instance)
    }

    /// Typed variant of [`make`](Self::make).
    ///
    /// # Errors
    ///
    /// Everything `make` returns, plus [`RegistryError::TypeMismatch`] if the
    /// entry exists but does not hold a `T`. The fallback is consumed either way.
    pub fn make_as<T: Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Result<Option<Arc<T>>, RegistryError> {
        let (name, instance) = self.lookup(name)?;

        match instance {
            Some(instance) => instance
                .downcast::<T>()
                .map(Some)
                .map_err(|_| RegistryError::TypeMismatch {
                    name,
                    expected: type_name::<T>(),
                }),
            None => Ok(None),
        }
    }

    /// Checks whether something is stored under `name`.
    ///
    /// Does not read or clear the fallback; an empty name is never found.
    pub fn contains(&self, name: &str) -> bool {
        !name.is_empty() && self.lock().instances.contains_key(&Key::of(name))
    }

    /// The name a nameless [`make`](Self::make) would use, if any.
    pub fn current(&self) -> Option<String> {
        let state = self.lock();
        (!state.current.is_empty()).then(|| state.current.clone())
    }

    fn lookup(&self, name: &str) -> Result<(String, Option<Instance>), RegistryError> {
        let fallback = name.is_empty();

        let (name, instance) = {
            let mut state = self.lock();
            let name = if fallback {
                state.current.clone()
            } else {
                name.to_string()
            };

            if name.is_empty() {
                return Err(RegistryError::MissingName);
            }

            let instance = state.instances.get(&Key::of(&name)).cloned();
            if instance.is_some() {
                state.current.clear();
            }
            (name, instance)
        };

        let found = instance.is_some();
        debug!(name = %name, found, fallback, "looked up instance");
        self.emit_event(&RegistryEvent::Make {
            name: name.clone(),
            found,
            fallback,
        });

        Ok((name, instance))
    }

    // Poisoning is recovered: the state is only changed by single map and
    // string operations that cannot leave it half-written.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Sets a callback invoked after every successful `remember` and `make`.
    ///
    /// The callback runs without any registry lock held, so it may call back
    /// into this registry.
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clears the tracing callback. Stored values are not affected.
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    fn emit_event(&self, event: &RegistryEvent) {
        let callback = self
            .trace
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Registry")
            .field("instances", &state.instances.len())
            .field("current", &state.current)
            .finish()
    }
}

/// Types that are plain data rather than objects and cannot be stored.
fn is_scalar<T: 'static>() -> bool {
    let id = TypeId::of::<T>();
    [
        TypeId::of::<()>(),
        TypeId::of::<bool>(),
        TypeId::of::<char>(),
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<i128>(),
        TypeId::of::<isize>(),
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<u128>(),
        TypeId::of::<usize>(),
        TypeId::of::<f32>(),
        TypeId::of::<f64>(),
        TypeId::of::<&'static str>(),
        TypeId::of::<String>(),
    ]
    .contains(&id)
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
