use tracing::info;

use crate::errors::ApiError;
use crate::external::DataSource;
use crate::session::SessionGuard;

/// Exchanges credentials for a bearer token and installs it as the live
/// session credential.
pub async fn login(
    source: &dyn DataSource,
    session: &SessionGuard,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let credential = source.login(email, password).await?;
    session.set(credential);
    info!("login succeeded");
    Ok(())
}

/// Registers a new account; the API hands back a token straight away, so a
/// successful registration also opens a session.
pub async fn register(
    source: &dyn DataSource,
    session: &SessionGuard,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let credential = source.register(email, password).await?;
    session.set(credential);
    info!("registration succeeded");
    Ok(())
}

pub fn logout(session: &SessionGuard) {
    session.clear();
    info!("logged out");
}
