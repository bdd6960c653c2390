use crate::{
    config,
    error::Result,
    types::{Artist, Image, SeveralArtistsResponse},
};

/// Returns the url of the widest image in `images`, if there is one.
///
/// Spotify lists images widest first, but the order is not guaranteed, so the
/// widths are compared. Images without a width count as zero wide.
pub fn widest_image(images: &[Image]) -> Option<String> {
    images
        .iter()
        .max_by_key(|i| i.width.unwrap_or(0))
        .map(|i| i.url.clone())
}

/// Picks the widest artist image.
pub fn primary_image(artist: &Artist) -> Option<String> {
    widest_image(&artist.images)
}

/// Looks up image urls for a batch of artists.
///
/// Calls `GET /artists?ids=…` once for the whole batch and keeps the widest
/// image of every artist Spotify knows.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `artist_ids` - Up to 50 Spotify artist ids
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<(String, Option<String>)>)` - Artist id and image url pairs. Ids
///   Spotify answers with `null` are left out; artists without images map to `None`
/// - `Err(Error)` - Network failure, expired session or API error
///
/// An empty `artist_ids` returns an empty list without a request.
///
/// # Retry Logic
///
/// Transient failures are retried by [`super::send`].
///
/// # Example
///
/// ```
/// let images = get_artist_images(&token, vec!["0OdUWJ0sBjDrqHygGUXeCF".into()]).await?;
/// ```
pub async fn get_artist_images(
    token: &str,
    artist_ids: Vec<String>,
) -> Result<Vec<(String, Option<String>)>> {
    if artist_ids.is_empty() {
        return Ok(Vec::new());
    }

    let api_url = format!(
        "{uri}/artists?ids={ids}",
        uri = &config::spotify_apiurl(),
        ids = artist_ids.join(","),
    );

    let response = super::send(|client| client.get(&api_url).bearer_auth(token)).await?;
    let body = response.json::<SeveralArtistsResponse>().await?;

    Ok(body
        .artists
        .into_iter()
        .flatten()
        .map(|artist| {
            let image = primary_image(&artist);
            (artist.id, image)
        })
        .collect())
}
