// Repository trait for session telemetry access
use async_trait::async_trait;

use crate::domain::session::SessionData;

/// Identifies one timed session at the timing provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionQuery {
    pub year: u16,
    pub circuit: String,
    pub session_type: String,
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch all laps and their telemetry for a session, units normalized
    /// (seconds, metres, km/h).
    async fn fetch_session(&self, query: &SessionQuery) -> anyhow::Result<SessionData>;
}
