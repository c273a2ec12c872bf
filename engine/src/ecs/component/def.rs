use std::{fmt, sync::Arc};

use crate::ecs::{
    State, Value,
    entity::Entity,
    event::Selector,
    system::{Context, Output},
};

/// The behavior of a component.
///
/// Called once per owning entity each time the component's system runs, with the entity, the
/// component's prior state for that entity, and the context built for it. Must be a pure,
/// synchronous function of its inputs; returning events is its only side channel.
pub type Function = Arc<dyn Fn(&Entity, &Value, &Context) -> Output<Value> + Send + Sync>;

/// Hook invoked when an entity owning the component is removed. Receives the state as it is before
/// any of the entity's component data is deleted and returns the state to continue the removal with.
pub type CleanupFn = Arc<dyn Fn(State, &Entity) -> State + Send + Sync>;

/// Optional parts of a component definition.
///
/// `None` means "not specified". When a registration is merged into an existing definition, only
/// the specified fields replace what was registered before.
#[derive(Clone, Default)]
pub struct Options {
    /// Selectors whose events are delivered into the component's inbox.
    pub subscriptions: Option<Vec<Selector>>,
    /// Other component state to expose in the context. A bare component selects that component's
    /// state for the same entity, an entity-scoped selector picks a specific entity.
    pub select_components: Option<Vec<Selector>>,
    /// Hook run on entity removal.
    pub cleanup: Option<CleanupFn>,
}

impl Options {
    /// Add a subscription.
    pub fn subscribe(mut self, selector: impl Into<Selector>) -> Self {
        self.subscriptions
            .get_or_insert_with(Vec::new)
            .push(selector.into());
        self
    }

    /// Add a selected component.
    pub fn select(mut self, selector: impl Into<Selector>) -> Self {
        self.select_components
            .get_or_insert_with(Vec::new)
            .push(selector.into());
        self
    }

    /// Set the cleanup hook.
    pub fn cleanup<F>(mut self, cleanup: F) -> Self
    where
        F: Fn(State, &Entity) -> State + Send + Sync + 'static,
    {
        self.cleanup = Some(Arc::new(cleanup));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("subscriptions", &self.subscriptions)
            .field("select_components", &self.select_components)
            .field("cleanup", &self.cleanup.is_some())
            .finish()
    }
}

/// A component function together with optional settings, as handed to
/// [`State::register_component`].
#[derive(Clone)]
pub struct Registration {
    function: Function,
    options: Options,
}

impl Registration {
    /// Register a bare function with no options.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&Entity, &Value, &Context) -> Output<Value> + Send + Sync + 'static,
    {
        Self {
            function: Arc::new(function),
            options: Options::default(),
        }
    }

    /// Replace the options carried by this registration.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Add a subscription.
    pub fn subscribe(mut self, selector: impl Into<Selector>) -> Self {
        self.options = self.options.subscribe(selector);
        self
    }

    /// Add a selected component.
    pub fn select(mut self, selector: impl Into<Selector>) -> Self {
        self.options = self.options.select(selector);
        self
    }

    /// Set the cleanup hook.
    pub fn cleanup<F>(mut self, cleanup: F) -> Self
    where
        F: Fn(State, &Entity) -> State + Send + Sync + 'static,
    {
        self.options = self.options.cleanup(cleanup);
        self
    }
}

/// A registered component definition.
#[derive(Clone)]
pub struct Def {
    function: Function,
    subscriptions: Option<Vec<Selector>>,
    select_components: Option<Vec<Selector>>,
    cleanup: Option<CleanupFn>,
}

impl Def {
    /// Get the component function.
    #[inline]
    pub fn function(&self) -> &Function {
        &self.function
    }

    /// Get the declared subscriptions, empty when none were declared.
    #[inline]
    pub fn subscriptions(&self) -> &[Selector] {
        self.subscriptions.as_deref().unwrap_or_default()
    }

    /// Get the declared selected components, empty when none were declared.
    #[inline]
    pub fn select_components(&self) -> &[Selector] {
        self.select_components.as_deref().unwrap_or_default()
    }

    /// Get the cleanup hook, if one was registered.
    #[inline]
    pub fn cleanup(&self) -> Option<&CleanupFn> {
        self.cleanup.as_ref()
    }

    /// Merge a registration into this definition. The function is always replaced, each option is
    /// replaced only when the registration specifies it.
    pub(crate) fn merge(&mut self, registration: Registration) {
        let Registration { function, options } = registration;
        self.function = function;
        if let Some(subscriptions) = options.subscriptions {
            self.subscriptions = Some(subscriptions);
        }
        if let Some(select_components) = options.select_components {
            self.select_components = Some(select_components);
        }
        if let Some(cleanup) = options.cleanup {
            self.cleanup = Some(cleanup);
        }
    }
}

impl From<Registration> for Def {
    fn from(registration: Registration) -> Self {
        let Registration { function, options } = registration;
        Self {
            function,
            subscriptions: options.subscriptions,
            select_components: options.select_components,
            cleanup: options.cleanup,
        }
    }
}

impl fmt::Debug for Def {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Def")
            .field("subscriptions", &self.subscriptions)
            .field("select_components", &self.select_components)
            .field("cleanup", &self.cleanup.is_some())
            .finish_non_exhaustive()
    }
}
