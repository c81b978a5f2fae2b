use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::models::catalog::Catalog;
use crate::models::language::Language;
use crate::models::wizard::WizardState;
use crate::services::translation_service::Translator;
use crate::services::wizard_service::WizardSession;

const IDLE_MINUTES: i64 = 60;
const MAX_SESSIONS: usize = 10_000;

/// How long an untouched session is kept and how many are held at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionLimits {
    pub idle_ttl: Duration,
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::minutes(IDLE_MINUTES),
            max_sessions: MAX_SESSIONS,
        }
    }
}

struct StoredSession {
    session: WizardSession,
    last_touched: DateTime<Utc>,
}

type Sessions = HashMap<Uuid, StoredSession>;

/// In-memory home for the wizard sessions served over HTTP.
///
/// Sessions idle for longer than the TTL are dropped on the next access to
/// the store. When the store is full, creating a session evicts the one that
/// has gone longest without a request.
pub struct SessionStore {
    catalog: Arc<Catalog>,
    translator: Arc<dyn Translator>,
    default_language: Language,
    limits: SessionLimits,
    sessions: Mutex<Sessions>,
}

impl SessionStore {
    pub fn new(
        catalog: Arc<Catalog>,
        translator: Arc<dyn Translator>,
        default_language: Language,
        limits: SessionLimits,
    ) -> Self {
        Self {
            catalog,
            translator,
            default_language,
            limits,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    fn lock(&self) -> MutexGuard<'_, Sessions> {
        // a panicking handler must not take every other session down with it
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn prune(&self, sessions: &mut Sessions, now: DateTime<Utc>) -> usize {
        let before = sessions.len();
        let ttl = self.limits.idle_ttl;
        sessions.retain(|_, stored| now - stored.last_touched <= ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            log::info!("Expired {} idle wizard sessions", expired);
        }
        expired
    }

    fn evict_oldest(sessions: &mut Sessions) {
        let oldest = sessions
            .iter()
            .min_by_key(|(_, stored)| stored.last_touched)
            .map(|(id, _)| *id);
        if let Some(id) = oldest {
            sessions.remove(&id);
            log::warn!("Session store full, evicted wizard session {}", id);
        }
    }

    /// Drop every session that has been idle past the TTL as of `now`.
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.lock();
        self.prune(&mut sessions, now)
    }

    pub fn create(&self, language: Option<Language>) -> (Uuid, serde_json::Value) {
        let id = Uuid::new_v4();
        let mut session = WizardSession::new(
            self.catalog.clone(),
            self.translator.clone(),
            language.unwrap_or(self.default_language),
        );
        session.subscribe(Box::new(move |state: &WizardState| {
            log::debug!(
                "Wizard session {} now on step {} ({} errors)",
                id,
                state.current_step.number(),
                state.errors.len()
            );
        }));
        let snapshot = serde_json::to_value(session.state()).unwrap_or_default();

        let now = Utc::now();
        let mut sessions = self.lock();
        self.prune(&mut sessions, now);
        while !sessions.is_empty() && sessions.len() >= self.limits.max_sessions {
            Self::evict_oldest(&mut sessions);
        }
        sessions.insert(
            id,
            StoredSession {
                session,
                last_touched: now,
            },
        );
        drop(sessions);

        log::info!("Created wizard session {}", id);
        (id, snapshot)
    }

    /// Run `f` against one session while holding the store lock. Counts as
    /// activity for the idle TTL.
    pub fn with_session<T>(&self, id: &Uuid, f: impl FnOnce(&mut WizardSession) -> T) -> Option<T> {
        let now = Utc::now();
        let mut sessions = self.lock();
        self.prune(&mut sessions, now);
        sessions.get_mut(id).map(|stored| {
            stored.last_touched = now;
            f(&mut stored.session)
        })
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.lock().remove(id).is_some();
        if removed {
            log::info!("Removed wizard session {}", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
