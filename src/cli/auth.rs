use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error, info,
    management::{FileSessionStore, SessionStore},
    spotify, success,
    types::PkceToken,
};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let token = match spotify::auth::auth(shared_state).await {
        Ok(token) => token,
        Err(e) => error!("Authentication failed or timed out. Err: {}", e),
    };

    let store = FileSessionStore::new();
    if let Err(e) = store.set(&token).await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
}

pub async fn logout() {
    let store = FileSessionStore::new();
    match store.get().await {
        Ok(None) => {
            info!("Not logged in.");
            return;
        }
        Ok(Some(_)) => {}
        Err(e) => error!("Cannot read session. Err: {}", e),
    }

    if let Err(e) = store.clear().await {
        error!("Failed to remove session. Err: {}", e);
    }
    success!("Logged out.");
}
