use crate::errors::ThemeResult;
use crate::preference::{ResolvedAppearance, ThemePreference, ThemeState};
use crate::presentation::AppearanceSink;
use crate::probe::AppearanceProbe;
use crate::storage::{PreferenceStore, THEME_KEY};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Callback invoked with the newly resolved appearance
pub type AppearanceCallback = Arc<dyn Fn(ResolvedAppearance) + Send + Sync>;

struct Shared {
    state: ThemeState,
    /// Most recent OS appearance, tracked even while it does not drive `state`
    os: ResolvedAppearance,
    listeners: Vec<(u64, AppearanceCallback)>,
    next_listener_id: u64,
}

/// Owner of the process-wide [`ThemeState`].
///
/// Constructed once by the composition root and shared by cloning; all clones
/// refer to the same state. The preference/resolved pair is only ever updated
/// under a single lock, so no observer can see a pair that disagrees with the
/// OS appearance the controller last observed.
///
/// Writes (`set_preference`, `notify_os_preference`) are serialized end to
/// end: commit, persist and dispatch of one write finish before the next
/// begins, so the stored value and the last callback always match the state.
///
/// Subscribers are invoked synchronously, after the state change is committed
/// and outside the state lock, so they may read the controller. They must not
/// write to it from inside the callback.
#[derive(Clone)]
pub struct ThemeController {
    shared: Arc<Mutex<Shared>>,
    writer: Arc<Mutex<()>>,
    store: Arc<dyn PreferenceStore>,
    probe: Arc<dyn AppearanceProbe>,
    sink: Arc<dyn AppearanceSink>,
}

impl ThemeController {
    /// Build the controller from persisted state and the current OS appearance.
    ///
    /// Never fails: an unreadable store or an unrecognized stored value falls
    /// back to `default_preference`, and a host that cannot report its
    /// appearance is treated as light.
    pub fn initialize(
        store: Arc<dyn PreferenceStore>,
        probe: Arc<dyn AppearanceProbe>,
        sink: Arc<dyn AppearanceSink>,
        default_preference: ThemePreference,
    ) -> Self {
        let preference = match read_stored_preference(store.as_ref()) {
            Ok(Some(preference)) => preference,
            Ok(None) => default_preference,
            Err(e) => {
                log::warn!("{e}; using default theme '{default_preference}'");
                default_preference
            }
        };

        let os = probe.appearance();
        let state = ThemeState::new(preference, os);
        sink.apply(state.resolved);

        log::info!(
            "Theme initialized: preference={}, resolved={}",
            state.preference,
            state.resolved
        );

        Self {
            shared: Arc::new(Mutex::new(Shared {
                state,
                os,
                listeners: Vec::new(),
                next_listener_id: 0,
            })),
            writer: Arc::new(Mutex::new(())),
            store,
            probe,
            sink,
        }
    }

    /// Current preference and resolved appearance
    pub fn snapshot(&self) -> ThemeState {
        self.lock().state
    }

    /// Last OS appearance the controller observed
    pub fn latest_os_appearance(&self) -> ResolvedAppearance {
        self.lock().os
    }

    /// Select a new preference, persist it best-effort, apply the result and
    /// notify every subscriber before returning.
    pub fn set_preference(&self, preference: ThemePreference) {
        let _writer = self.write_guard();
        let (state, listeners) = {
            let mut shared = self.lock();
            shared.state = ThemeState::new(preference, shared.os);
            self.sink.apply(shared.state.resolved);
            (shared.state, collect_listeners(&shared))
        };

        if let Err(e) = self.store.set(THEME_KEY, preference.as_str()) {
            log::warn!("Failed to persist theme '{preference}': {e}");
        }

        log::info!(
            "Theme preference set to {} (resolved {})",
            state.preference,
            state.resolved
        );

        for listener in listeners {
            listener(state.resolved);
        }
    }

    /// Report an OS appearance change.
    ///
    /// The value is always recorded. It only changes the resolved appearance,
    /// and only reaches subscribers, while the preference is `System` and the
    /// resolved value actually differs.
    pub fn notify_os_preference(&self, os: ResolvedAppearance) {
        let _writer = self.write_guard();
        let (resolved, listeners) = {
            let mut shared = self.lock();
            shared.os = os;

            if !shared.state.preference.is_system() {
                log::debug!(
                    "OS appearance changed to {os}; ignored while preference is {}",
                    shared.state.preference
                );
                return;
            }
            if shared.state.resolved == os {
                return;
            }

            shared.state.resolved = os;
            self.sink.apply(os);
            (os, collect_listeners(&shared))
        };

        log::info!("Following OS appearance: {resolved}");
        for listener in listeners {
            listener(resolved);
        }
    }

    /// Query the OS appearance now and feed it through [`Self::notify_os_preference`]
    pub fn refresh_os_preference(&self) -> ThemeState {
        let os = self.probe.appearance();
        self.notify_os_preference(os);
        self.snapshot()
    }

    /// Register interest in resolved appearance changes.
    ///
    /// The callback fires after every [`Self::set_preference`] and after OS
    /// changes that alter the resolved appearance while `System` is selected.
    pub fn subscribe_to_os_preference_change<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(ResolvedAppearance) + Send + Sync + 'static,
    {
        let mut shared = self.lock();
        let id = shared.next_listener_id;
        shared.next_listener_id += 1;
        shared.listeners.push((id, Arc::new(callback)));
        log::debug!("Registered appearance listener {id}");

        Unsubscribe {
            shared: Arc::downgrade(&self.shared),
            id,
            active: AtomicBool::new(true),
        }
    }

    /// Make `value` visually active. Idempotent.
    pub fn apply_appearance(&self, value: ResolvedAppearance) {
        self.sink.apply(value);
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn collect_listeners(shared: &Shared) -> Vec<AppearanceCallback> {
    shared
        .listeners
        .iter()
        .map(|(_, listener)| Arc::clone(listener))
        .collect()
}

/// Read and validate the persisted preference
pub fn read_stored_preference(
    store: &dyn PreferenceStore,
) -> ThemeResult<Option<ThemePreference>> {
    store
        .get(THEME_KEY)?
        .map(|value| value.parse::<ThemePreference>())
        .transpose()
}

/// Handle returned by [`ThemeController::subscribe_to_os_preference_change`].
///
/// Only holds a weak reference, so it stays safe to use after every
/// controller clone has been dropped.
#[derive(Debug)]
pub struct Unsubscribe {
    shared: Weak<Mutex<Shared>>,
    id: u64,
    active: AtomicBool,
}

impl Unsubscribe {
    /// Permanently deregister the callback. Later calls do nothing.
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }

        if let Some(shared) = self.shared.upgrade() {
            let mut shared = shared.lock().unwrap_or_else(PoisonError::into_inner);
            shared.listeners.retain(|(id, _)| *id != self.id);
            log::debug!("Removed appearance listener {}", self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::RootClassList;
    use crate::probe::StaticProbe;
    use crate::storage::MemoryStore;
    use std::sync::Mutex as StdMutex;

    struct Fixture {
        store: Arc<MemoryStore>,
        probe: Arc<StaticProbe>,
        root: Arc<RootClassList>,
    }

    impl Fixture {
        fn new(os: ResolvedAppearance) -> Self {
            Self {
                store: Arc::new(MemoryStore::new()),
                probe: Arc::new(StaticProbe::new(os)),
                root: Arc::new(RootClassList::new()),
            }
        }

        fn controller(&self, default: ThemePreference) -> ThemeController {
            ThemeController::initialize(
                self.store.clone(),
                self.probe.clone(),
                self.root.clone(),
                default,
            )
        }
    }

    fn recorder() -> (
        Arc<StdMutex<Vec<ResolvedAppearance>>>,
        impl Fn(ResolvedAppearance) + Send + Sync + 'static,
    ) {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value| sink.lock().unwrap().push(value))
    }

    #[test]
    fn test_initialize_without_stored_value_uses_default() {
        let fixture = Fixture::new(ResolvedAppearance::Dark);
        let controller = fixture.controller(ThemePreference::System);

        let state = controller.snapshot();
        assert_eq!(state.preference, ThemePreference::System);
        assert_eq!(state.resolved, ResolvedAppearance::Dark);
        assert!(fixture.root.is_dark());
    }

    #[test]
    fn test_initialize_prefers_stored_value_over_default() {
        let fixture = Fixture::new(ResolvedAppearance::Dark);
        fixture.store.insert(THEME_KEY, "light");

        let controller = fixture.controller(ThemePreference::Dark);
        assert_eq!(controller.snapshot().preference, ThemePreference::Light);
        assert!(!fixture.root.is_dark());
    }

    #[test]
    fn test_set_preference_persists_and_notifies_before_returning() {
        let fixture = Fixture::new(ResolvedAppearance::Light);
        let controller = fixture.controller(ThemePreference::System);
        let (seen, callback) = recorder();
        let _handle = controller.subscribe_to_os_preference_change(callback);

        controller.set_preference(ThemePreference::Dark);

        assert_eq!(*seen.lock().unwrap(), vec![ResolvedAppearance::Dark]);
        assert_eq!(fixture.store.peek(THEME_KEY).as_deref(), Some("dark"));
        assert!(fixture.root.is_dark());
    }

    #[test]
    fn test_system_preference_tracks_os_changes() {
        let fixture = Fixture::new(ResolvedAppearance::Light);
        let controller = fixture.controller(ThemePreference::System);
        let (seen, callback) = recorder();
        let _handle = controller.subscribe_to_os_preference_change(callback);

        controller.notify_os_preference(ResolvedAppearance::Dark);
        controller.notify_os_preference(ResolvedAppearance::Dark);
        controller.notify_os_preference(ResolvedAppearance::Light);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ResolvedAppearance::Dark, ResolvedAppearance::Light]
        );
        assert_eq!(controller.snapshot().resolved, ResolvedAppearance::Light);
    }

    #[test]
    fn test_explicit_preference_ignores_os_but_remembers_it() {
        let fixture = Fixture::new(ResolvedAppearance::Light);
        let controller = fixture.controller(ThemePreference::Light);
        let (seen, callback) = recorder();
        let _handle = controller.subscribe_to_os_preference_change(callback);

        controller.notify_os_preference(ResolvedAppearance::Dark);
        assert_eq!(controller.snapshot().resolved, ResolvedAppearance::Light);
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(controller.latest_os_appearance(), ResolvedAppearance::Dark);

        controller.set_preference(ThemePreference::System);
        assert_eq!(controller.snapshot().resolved, ResolvedAppearance::Dark);
        assert_eq!(*seen.lock().unwrap(), vec![ResolvedAppearance::Dark]);
    }

    #[test]
    fn test_refresh_queries_probe() {
        let fixture = Fixture::new(ResolvedAppearance::Light);
        let controller = fixture.controller(ThemePreference::System);

        fixture.probe.set(ResolvedAppearance::Dark);
        let state = controller.refresh_os_preference();
        assert_eq!(state.resolved, ResolvedAppearance::Dark);
    }

    #[test]
    fn test_callback_may_reenter_controller() {
        let fixture = Fixture::new(ResolvedAppearance::Light);
        let controller = fixture.controller(ThemePreference::System);
        let observed = Arc::new(StdMutex::new(None));

        let inner = controller.clone();
        let slot = Arc::clone(&observed);
        let _handle = controller.subscribe_to_os_preference_change(move |resolved| {
            let state = inner.snapshot();
            assert_eq!(state.resolved, resolved);
            *slot.lock().unwrap() = Some(state);
        });

        controller.set_preference(ThemePreference::Dark);
        assert_eq!(
            observed.lock().unwrap().map(|s| s.preference),
            Some(ThemePreference::Dark)
        );
    }

    #[test]
    fn test_unsubscribe_twice_is_safe() {
        let fixture = Fixture::new(ResolvedAppearance::Light);
        let controller = fixture.controller(ThemePreference::System);
        let (seen, callback) = recorder();
        let handle = controller.subscribe_to_os_preference_change(callback);
        assert_eq!(controller.listener_count(), 1);

        handle.unsubscribe();
        handle.unsubscribe();
        assert!(!handle.is_active());
        assert_eq!(controller.listener_count(), 0);

        controller.set_preference(ThemePreference::Dark);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unsubscribe_after_controller_dropped() {
        let fixture = Fixture::new(ResolvedAppearance::Light);
        let controller = fixture.controller(ThemePreference::System);
        let handle = controller.subscribe_to_os_preference_change(|_| {});

        drop(controller);
        handle.unsubscribe();
        handle.unsubscribe();
        assert!(!handle.is_active());
    }

    #[test]
    fn test_unsubscribe_leaves_other_listeners() {
        let fixture = Fixture::new(ResolvedAppearance::Light);
        let controller = fixture.controller(ThemePreference::System);
        let (first_seen, first) = recorder();
        let (second_seen, second) = recorder();
        let first_handle = controller.subscribe_to_os_preference_change(first);
        let _second_handle = controller.subscribe_to_os_preference_change(second);

        first_handle.unsubscribe();
        controller.notify_os_preference(ResolvedAppearance::Dark);

        assert!(first_seen.lock().unwrap().is_empty());
        assert_eq!(*second_seen.lock().unwrap(), vec![ResolvedAppearance::Dark]);
    }

    /// Store whose writes of `slow_value` stall, widening race windows
    struct StallingStore {
        inner: MemoryStore,
        slow_value: &'static str,
    }

    impl PreferenceStore for StallingStore {
        fn get(&self, key: &str) -> ThemeResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> ThemeResult<()> {
            if value == self.slow_value {
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_concurrent_writes_persist_and_notify_the_final_state() {
        let store = Arc::new(StallingStore {
            inner: MemoryStore::new(),
            slow_value: "dark",
        });
        let controller = ThemeController::initialize(
            store.clone(),
            Arc::new(StaticProbe::new(ResolvedAppearance::Light)),
            Arc::new(RootClassList::new()),
            ThemePreference::System,
        );
        let (seen, callback) = recorder();
        let _handle = controller.subscribe_to_os_preference_change(callback);

        let slow = controller.clone();
        let writer = std::thread::spawn(move || slow.set_preference(ThemePreference::Dark));
        std::thread::sleep(std::time::Duration::from_millis(10));
        controller.set_preference(ThemePreference::Light);
        writer.join().unwrap();

        let state = controller.snapshot();
        assert_eq!(
            store.inner.peek(THEME_KEY).as_deref(),
            Some(state.preference.as_str())
        );
        assert_eq!(seen.lock().unwrap().last().copied(), Some(state.resolved));
    }
}
