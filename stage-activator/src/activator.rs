use crate::binding::ActiveBinding;
use crate::collection;
use crate::error::ActivatorError;
use crate::settings::Settings;
use async_trait::async_trait;
use stage0::{
    Capability, GuardValue, LifecycleHost, OrderedCollection, Screen, ScreenError, ScreenRef,
    Spawner, TokioSpawner, TracingLog, TransitionLog, same_screen,
};
use stage_cell::{ReactiveCell, Receiver};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Operating mode, fixed when the activator is built.
enum Mode {
    /// One active slot, nothing else.
    Single,
    /// One active slot chosen from, and kept in sync with, an ordered list.
    Collection(Arc<dyn OrderedCollection>),
}

/// Guarded, asynchronous transitions of a single active screen.
///
/// Every transition runs the same four phases, strictly in order: ask the
/// current screen whether it may be deactivated, ask the candidate whether
/// it may be activated, deactivate the current screen, then activate the
/// candidate. Any refusal leaves the current screen in place, re-announces
/// it to subscribers and resolves `Ok(false)`.
///
/// Overlapping [`activate_item`](Self::activate_item) calls on one
/// activator are queued and run one after another. Hooks must not await
/// `activate_item` on the activator that is running them.
///
/// Built with [`Activator::builder`] or [`Activator::new`]; always shared
/// as `Arc<Activator>`.
pub struct Activator {
    active: ReactiveCell<Option<ScreenRef>>,
    initial: Mutex<Option<ScreenRef>>,
    settings: Settings,
    mode: Mode,
    log: Arc<dyn TransitionLog>,
    gate: tokio::sync::Mutex<()>,
}

/// Builder for [`Activator`].
pub struct ActivatorBuilder {
    initial: Option<ScreenRef>,
    settings: Settings,
    items: Option<Arc<dyn OrderedCollection>>,
    log: Arc<dyn TransitionLog>,
    spawner: Arc<dyn Spawner>,
}

impl ActivatorBuilder {
    fn new() -> Self {
        Self {
            initial: None,
            settings: Settings::default(),
            items: None,
            log: Arc::new(TracingLog),
            spawner: Arc::new(TokioSpawner),
        }
    }

    /// Screen to activate on the first `activate()` / `can_activate()` call.
    pub fn initial(mut self, screen: ScreenRef) -> Self {
        self.initial = Some(screen);
        self
    }

    /// Replace the settings.
    pub fn settings(mut self, settings: impl Into<Settings>) -> Self {
        self.settings = settings.into();
        self
    }

    /// Bind the activator to `items`, switching it to collection mode.
    pub fn collection(mut self, items: Arc<dyn OrderedCollection>) -> Self {
        self.items = Some(items);
        self
    }

    /// Transition log sink. Defaults to [`TracingLog`].
    pub fn log(mut self, log: Arc<dyn TransitionLog>) -> Self {
        self.log = log;
        self
    }

    /// Executor for fire-and-forget work. Defaults to [`TokioSpawner`].
    pub fn spawner(mut self, spawner: Arc<dyn Spawner>) -> Self {
        self.spawner = spawner;
        self
    }

    /// Build the activator.
    ///
    /// With a `parent` in the settings, the parent's lifecycle is handed to
    /// the new activator. Otherwise, with `activate` set, an activation is
    /// spawned and its outcome is only logged.
    pub fn build(self) -> Arc<Activator> {
        let mut settings = self.settings;
        let mode = match self.items {
            Some(items) => {
                settings.close_on_deactivate = false;
                Mode::Collection(items)
            }
            None => Mode::Single,
        };
        let parent = settings.parent.take();
        let eager = settings.activate;

        let activator = Arc::new(Activator {
            active: ReactiveCell::new(None),
            initial: Mutex::new(self.initial),
            settings,
            mode,
            log: self.log,
            gate: tokio::sync::Mutex::new(()),
        });

        if let Some(parent) = parent {
            activator.include_in(&parent);
        } else if eager {
            let eager_activator = Arc::clone(&activator);
            self.spawner.spawn(Box::pin(async move {
                if let Err(e) = eager_activator.activate().await {
                    tracing::warn!(error = %e, "eager activation failed");
                }
            }));
        }

        activator
    }
}

impl Activator {
    /// Start building an activator.
    pub fn builder() -> ActivatorBuilder {
        ActivatorBuilder::new()
    }

    /// Single-item activator with the default collaborators.
    pub fn new(initial: Option<ScreenRef>, settings: impl Into<Settings>) -> Arc<Self> {
        let builder = Self::builder().settings(settings);
        match initial {
            Some(screen) => builder.initial(screen),
            None => builder,
        }
        .build()
    }

    /// The active screen.
    pub fn active(&self) -> Option<ScreenRef> {
        self.active.get()
    }

    /// Receiver that sees every slot write and every re-announcement.
    pub fn subscribe(&self) -> Receiver<Option<ScreenRef>> {
        self.active.subscribe()
    }

    /// Write facade for UI bindings.
    pub fn binding(self: &Arc<Self>) -> ActiveBinding {
        ActiveBinding::new(Arc::clone(self))
    }

    /// The effective settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The bound collection, in collection mode.
    pub fn items(&self) -> Option<&Arc<dyn OrderedCollection>> {
        match &self.mode {
            Mode::Single => None,
            Mode::Collection(items) => Some(items),
        }
    }

    /// Whether the screen may stop being active. Screens without the
    /// guard, and the absent screen, always may.
    pub async fn can_deactivate_item(
        &self,
        item: Option<&ScreenRef>,
        close: bool,
    ) -> Result<bool, ActivatorError> {
        let Some(screen) = item.filter(|s| s.supports(Capability::CanDeactivate)) else {
            return Ok(true);
        };
        let raw = screen
            .can_deactivate(close)
            .await
            .map_err(|e| ActivatorError::hook(screen.as_ref(), Capability::CanDeactivate, e))?;
        Ok(self.interpret(&raw))
    }

    /// Whether the screen may become active. The active screen always may.
    pub async fn can_activate_item(&self, item: Option<&ScreenRef>) -> Result<bool, ActivatorError> {
        if same_screen(item, self.active.get().as_ref()) {
            return Ok(true);
        }
        let Some(screen) = item.filter(|s| s.supports(Capability::CanActivate)) else {
            return Ok(true);
        };
        let raw = screen
            .can_activate()
            .await
            .map_err(|e| ActivatorError::hook(screen.as_ref(), Capability::CanActivate, e))?;
        Ok(self.interpret(&raw))
    }

    /// Deactivate a screen if its guard allows it.
    ///
    /// On refusal subscribers are re-notified and `Ok(false)` is returned.
    /// The active slot is not touched either way.
    pub async fn deactivate_item(
        &self,
        item: Option<&ScreenRef>,
        close: bool,
    ) -> Result<bool, ActivatorError> {
        if !self.guard_or_revert(self.can_deactivate_item(item, close).await)? {
            tracing::debug!(screen = item.map(|s| s.name()), close, "deactivation refused");
            return Ok(false);
        }
        self.run_deactivation(item, close).await?;
        Ok(true)
    }

    /// Make `new_item` the active screen.
    ///
    /// Resolves `Ok(true)` when the transition completed or `new_item` is
    /// already active, and `Ok(false)` when a guard refused it. A failing
    /// hook aborts the transition with [`ActivatorError::Hook`].
    pub async fn activate_item(&self, new_item: Option<ScreenRef>) -> Result<bool, ActivatorError> {
        let _transition = self.gate.lock().await;

        let current = self.active.get();
        if same_screen(current.as_ref(), new_item.as_ref()) {
            tracing::debug!(screen = current.as_ref().map(|s| s.name()), "screen already active");
            return Ok(true);
        }

        let close = self.settings.close_on_deactivate;
        if !self.guard_or_revert(self.can_deactivate_item(current.as_ref(), close).await)? {
            tracing::debug!(
                screen = current.as_ref().map(|s| s.name()),
                "deactivation refused"
            );
            return Ok(false);
        }
        if !self.guard_or_revert(self.can_activate_item(new_item.as_ref()).await)? {
            tracing::debug!(
                screen = new_item.as_ref().map(|s| s.name()),
                "activation refused"
            );
            return Ok(false);
        }

        self.run_deactivation(current.as_ref(), close).await?;
        let next = self.before_activate(new_item);
        self.run_activation(next).await?;
        Ok(true)
    }

    /// Guard for [`activate`](Self::activate): the first call after
    /// construction consumes the initial screen, later calls check the
    /// active one.
    pub async fn can_activate(&self) -> Result<bool, ActivatorError> {
        let target = self.take_initial().or_else(|| self.active.get());
        self.can_activate_item(target.as_ref()).await
    }

    /// Activate the initial screen on the first call after construction,
    /// the active one afterwards.
    pub async fn activate(&self) -> Result<bool, ActivatorError> {
        let target = self.take_initial().or_else(|| self.active.get());
        self.activate_item(target).await
    }

    /// Whether the active screen may stop being active. In collection mode
    /// with `close`, whether every screen of the collection may be closed.
    pub async fn can_deactivate(&self, close: bool) -> Result<bool, ActivatorError> {
        match &self.mode {
            Mode::Collection(items) if close => collection::can_close_all(self, items.as_ref()).await,
            _ => self.can_deactivate_item(self.active.get().as_ref(), close).await,
        }
    }

    /// Deactivate the active screen. In collection mode with `close`, close
    /// every screen of the collection and resolve `Ok(true)` once all have
    /// settled.
    pub async fn deactivate(&self, close: bool) -> Result<bool, ActivatorError> {
        match &self.mode {
            Mode::Collection(items) if close => {
                collection::close_all(self, items.as_ref()).await?;
                Ok(true)
            }
            _ => self.deactivate_item(self.active.get().as_ref(), close).await,
        }
    }

    /// Forward `parent`'s four lifecycle hooks to this activator.
    pub fn include_in(self: &Arc<Self>, parent: &LifecycleHost) {
        let delegate: ScreenRef = Arc::clone(self) as ScreenRef;
        parent.delegate_to(delegate);
        tracing::debug!(parent = parent.name(), "activator included in parent");
    }

    fn take_initial(&self) -> Option<ScreenRef> {
        self.initial
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn interpret(&self, raw: &GuardValue) -> bool {
        (self.settings.interpret_guard)(raw)
    }

    fn guard_or_revert(
        &self,
        verdict: Result<bool, ActivatorError>,
    ) -> Result<bool, ActivatorError> {
        if !matches!(verdict, Ok(true)) {
            self.active.reannounce();
        }
        verdict
    }

    fn before_activate(&self, candidate: Option<ScreenRef>) -> Option<ScreenRef> {
        match &self.mode {
            Mode::Single => (self.settings.before_activate)(candidate),
            Mode::Collection(items) => collection::resolve_candidate(
                items.as_ref(),
                self.active.get().as_ref(),
                candidate,
                &self.settings.determine_next_item,
            ),
        }
    }

    fn after_deactivate(&self, screen: &ScreenRef, close: bool) {
        match &self.mode {
            Mode::Single => (self.settings.after_deactivate)(screen, close),
            Mode::Collection(items) => {
                if close {
                    items.remove(screen);
                }
            }
        }
    }

    async fn run_deactivation(
        &self,
        item: Option<&ScreenRef>,
        close: bool,
    ) -> Result<(), ActivatorError> {
        let Some(screen) = item else {
            return Ok(());
        };
        if screen.supports(Capability::Deactivate) {
            self.log.log("Deactivating", screen.as_ref());
            screen
                .deactivate(close)
                .await
                .map_err(|e| ActivatorError::hook(screen.as_ref(), Capability::Deactivate, e))?;
        }
        self.after_deactivate(screen, close);
        Ok(())
    }

    /// The slot is written before the hook runs, so subscribers see the
    /// new screen while its activation is still in flight.
    async fn run_activation(&self, item: Option<ScreenRef>) -> Result<(), ActivatorError> {
        self.active.set(item.clone());
        if let Some(screen) = item.filter(|s| s.supports(Capability::Activate)) {
            self.log.log("Activating", screen.as_ref());
            screen
                .activate()
                .await
                .map_err(|e| ActivatorError::hook(screen.as_ref(), Capability::Activate, e))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Activator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activator")
            .field("active", &self.active.get().map(|s| s.name().to_owned()))
            .field("collection", &self.items().map(|items| items.len()))
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// An activator is itself a screen, so it can be nested: a parent screen
/// hosts it through [`LifecycleHost`], or another activator activates it.
#[async_trait]
impl Screen for Activator {
    fn name(&self) -> &str {
        "activator"
    }

    fn capabilities(&self) -> &[Capability] {
        Capability::ALL
    }

    async fn can_activate(&self) -> Result<GuardValue, ScreenError> {
        Ok(Activator::can_activate(self).await?.into())
    }

    async fn activate(&self) -> Result<(), ScreenError> {
        Activator::activate(self).await?;
        Ok(())
    }

    async fn can_deactivate(&self, close: bool) -> Result<GuardValue, ScreenError> {
        Ok(Activator::can_deactivate(self, close).await?.into())
    }

    async fn deactivate(&self, close: bool) -> Result<(), ScreenError> {
        Activator::deactivate(self, close).await?;
        Ok(())
    }
}
