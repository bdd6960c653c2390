use crate::{config, error::Result, types::UserProfile};

/// Full-track playback on Connect devices needs a premium account.
pub fn is_premium(profile: &UserProfile) -> bool {
    profile.product.as_deref() == Some("premium")
}

/// Retrieves the profile of the logged-in user.
///
/// Calls `GET /me`. The `product` field tells premium accounts apart (see
/// [`is_premium`]); it is only present when the session was granted the
/// `user-read-private` scope.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(UserProfile)` - Id, display name and account product
/// - `Err(Error)` - Network failure, expired session or API error
///
/// # Example
///
/// ```
/// let profile = get_current_user(&token).await?;
/// if !is_premium(&profile) {
///     warning!("Playback needs Spotify Premium");
/// }
/// ```
pub async fn get_current_user(token: &str) -> Result<UserProfile> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());
    let response = super::send(|client| client.get(&api_url).bearer_auth(token)).await?;
    Ok(response.json::<UserProfile>().await?)
}
