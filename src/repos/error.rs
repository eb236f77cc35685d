/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),

    // Recipe column that no longer parses as ingredient JSON. Indicates
    // out-of-band writes, not a client mistake.
    #[error("corrupt recipe column")]
    CorruptRecipe(#[from] serde_json::Error),
}
