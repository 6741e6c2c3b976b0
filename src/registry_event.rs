use std::sync::Arc;

/// Events emitted by a registry after a successful operation.
///
/// These events are passed to the tracing callback set via
/// [`Registry::set_trace_callback`](crate::Registry::set_trace_callback).
/// Calls that fail with a [`RegistryError`](crate::RegistryError) emit nothing.
///
/// # Examples
///
/// ```rust
/// use named_singleton::RegistryEvent;
///
/// let event = RegistryEvent::Remember { name: "svc".into(), replaced: false };
/// assert_eq!(event.to_string(), "remember { name: svc, replaced: false }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A value was stored.
    Remember {
        /// Effective name the value was stored under.
        name: String,
        /// Whether a previous entry was overwritten (`force` only).
        replaced: bool,
    },

    /// A value was looked up.
    Make {
        /// Effective name that was looked up.
        name: String,
        /// Whether an entry existed.
        found: bool,
        /// Whether the name came from the remembered fallback.
        fallback: bool,
    },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Remember { name, replaced } => {
                write!(f, "remember {{ name: {name}, replaced: {replaced} }}")
            }
            RegistryEvent::Make {
                name,
                found,
                fallback,
            } => write!(
                f,
                "make {{ name: {name}, found: {found}, fallback: {fallback} }}"
            ),
        }
    }
}

/// User-supplied tracing callback.
///
/// Thread-safe because a registry may be shared process-wide.
pub type TraceCallback = Arc<dyn Fn(&RegistryEvent) + Send + Sync + 'static>;
