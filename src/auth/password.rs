use crate::error::VitiError;

/// Hash `password` with bcrypt on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, VitiError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

pub async fn verify_password(password: String, hashed: String) -> Result<bool, VitiError> {
    let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed)).await??;
    Ok(ok)
}
