//! In-memory Session Store
//!
//! Holds live interview sessions keyed by id for the lifetime of the process.
//! Each session sits behind its own mutex; a request that finds the session
//! already busy is rejected rather than queued, so turns are never
//! interleaved. Different sessions proceed independently.

use crate::{
    error::{InterviewError, Result},
    llm_client::ChatCompletion,
    session::{FinalizeOutcome, InterviewSession},
    types::Message,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<InterviewSession>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a session under a freshly generated id.
    pub async fn insert(&self, session: InterviewSession) -> Uuid {
        let mut sessions = self.sessions.write().await;
        let mut id = Uuid::new_v4();
        while sessions.contains_key(&id) {
            id = Uuid::new_v4();
        }
        sessions.insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Stores a session under a caller-assigned id.
    pub async fn insert_with_id(&self, id: Uuid, session: InterviewSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&id) {
            return Err(InterviewError::SessionExists(id));
        }
        sessions.insert(id, Arc::new(Mutex::new(session)));
        Ok(())
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Discards a session without evaluating it. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Takes the session's lock while the map is read-locked, so a session
    /// that `finalize` has already removed can never be reached again.
    async fn acquire(&self, id: Uuid) -> Result<OwnedMutexGuard<InterviewSession>> {
        let sessions = self.sessions.read().await;
        let entry = sessions
            .get(&id)
            .ok_or(InterviewError::SessionNotFound(id))?;
        entry
            .clone()
            .try_lock_owned()
            .map_err(|_| InterviewError::SessionBusy(id))
    }

    /// Runs one user turn on the session.
    #[instrument(name = "session_turn", skip_all, fields(session_id = %id))]
    pub async fn advance(
        &self,
        id: Uuid,
        llm: &dyn ChatCompletion,
        user_text: &str,
    ) -> Result<String> {
        let mut session = self.acquire(id).await?;
        session.advance(llm, user_text).await
    }

    /// Removes the session and evaluates it.
    ///
    /// The session is consumed even if evaluation fails.
    #[instrument(name = "session_finalize", skip_all, fields(session_id = %id))]
    pub async fn finalize(&self, id: Uuid, llm: &dyn ChatCompletion) -> Result<FinalizeOutcome> {
        let session = {
            let mut sessions = self.sessions.write().await;
            let guard = sessions
                .get(&id)
                .ok_or(InterviewError::SessionNotFound(id))?
                .clone()
                .try_lock_owned()
                .map_err(|_| InterviewError::SessionBusy(id))?;
            sessions.remove(&id);
            guard
        };
        info!("Session removed for evaluation");
        session.finalize(llm).await
    }

    /// A copy of the session's transcript.
    pub async fn snapshot(&self, id: Uuid) -> Result<Vec<Message>> {
        let session = self.acquire(id).await?;
        Ok(session.history().to_vec())
    }
}
