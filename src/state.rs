use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::meals::{MealPlanner, Notifier, NullNotifier, PlanEvent, TracingNotifier};

pub type SessionId = Uuid;

/// Holds a session's events until the store lock is released.
#[derive(Default)]
struct Outbox {
    pending: Mutex<Vec<PlanEvent>>,
}

impl Outbox {
    fn take(&self) -> Vec<PlanEvent> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Notifier for Outbox {
    fn notify(&self, event: &PlanEvent) {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}

struct Session {
    planner: MealPlanner,
    outbox: Arc<Outbox>,
}

/// Independent planners, one per session. All access is serialized.
///
/// Events are handed to the notifier after the lock is released, so a
/// notifier may call back into the store.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
    notifier: Arc<dyn Notifier>,
}

impl SessionStore {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            notifier,
        }
    }

    pub fn open(&self) -> SessionId {
        let id = Uuid::new_v4();
        let outbox = Arc::new(Outbox::default());
        let planner = MealPlanner::with_notifier(outbox.clone());
        self.lock().insert(id, Session { planner, outbox });
        info!(session = %id, "session opened");
        id
    }

    /// Runs `f` on the session's planner while holding the store lock.
    pub fn with_session<T, F>(&self, id: SessionId, f: F) -> PlannerResult<T>
    where
        F: FnOnce(&mut MealPlanner) -> T,
    {
        let (value, events) = {
            let mut sessions = self.lock();
            let session = sessions
                .get_mut(&id)
                .ok_or(PlannerError::UnknownSession(id))?;
            let value = f(&mut session.planner);
            (value, session.outbox.take())
        };
        for event in &events {
            self.notifier.notify(event);
        }
        Ok(value)
    }

    pub fn reset(&self, id: SessionId) -> PlannerResult<()> {
        self.with_session(id, MealPlanner::reset)?;
        debug!(session = %id, "session reset");
        Ok(())
    }

    pub fn close(&self, id: SessionId) -> bool {
        let closed = self.lock().remove(&id).is_some();
        if closed {
            info!(session = %id, "session closed");
        }
        closed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<SessionId, Session>> {
        // Planner mutations are a single push or remove, so poisoning is ignored.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn init(config: AppConfig) -> Self {
        Self::from_parts(Arc::new(config), Arc::new(TracingNotifier))
    }

    pub fn from_parts(config: Arc<AppConfig>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config,
            sessions: SessionStore::new(notifier),
        }
    }

    pub fn fake() -> Self {
        Self::from_parts(Arc::new(AppConfig::default()), Arc::new(NullNotifier))
    }
}
