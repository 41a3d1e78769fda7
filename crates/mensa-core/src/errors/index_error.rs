/// Index-layer errors for the relational, keyword, and vector backends.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("connection pool exhausted: {active_connections} active connections")]
    PoolExhausted { active_connections: usize },

    #[error("{backend} backend unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    #[error("all retrieval backends unavailable: vector: {vector}; keyword: {keyword}")]
    AllBackendsUnavailable { vector: String, keyword: String },
}
