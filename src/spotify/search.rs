use crate::{
    config,
    error::Result,
    playlist::{SearchTerm, Track, candidates_from_records},
    types::SearchResponse,
};

/// Largest page the search endpoint serves.
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Appends each genre hint to the free-text term as a `genre:"…"` filter.
pub fn build_query(term: &SearchTerm, genres: &[String]) -> String {
    let mut query = term.as_str().to_string();
    for genre in genres {
        query.push_str(&format!(" genre:\"{}\"", genre.replace('"', "")));
    }
    query
}

/// Resolves the page size for a search.
///
/// An explicit `limit` wins over `SPOTFILL_SEARCH_LIMIT`; either way the value
/// ends up in `1..=MAX_SEARCH_LIMIT`.
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or_else(config::search_limit)
        .clamp(1, MAX_SEARCH_LIMIT)
}

/// Searches the catalog for tracks and returns the ones eligible for selection.
///
/// Runs a single `GET /search?type=track` request. Records without an id,
/// without artists or without a positive duration are dropped here, so every
/// returned [`Track`] can be handed to the selector as is.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `term` - Validated free-text query
/// * `genres` - Genre hints, appended as `genre:"…"` filters (see [`build_query`])
/// * `limit` - Result ceiling; `None` uses the configured default (see [`clamp_limit`])
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Track>)` - Eligible tracks in the order Spotify ranked them, possibly empty
/// - `Err(Error)` - Network failure, expired session or API error
///
/// An empty result is not an error; the caller decides how to report it.
///
/// # Example
///
/// ```
/// let term = SearchTerm::parse("lofi")?;
/// let candidates = search_tracks(&token, &term, &["jazz".into()], Some(20)).await?;
/// ```
pub async fn search_tracks(
    token: &str,
    term: &SearchTerm,
    genres: &[String],
    limit: Option<u32>,
) -> Result<Vec<Track>> {
    let api_url = format!(
        "{uri}/search?q={query}&type=track&limit={limit}",
        uri = &config::spotify_apiurl(),
        query = urlencoding::encode(&build_query(term, genres)),
        limit = clamp_limit(limit),
    );

    let response = super::send(|client| client.get(&api_url).bearer_auth(token)).await?;
    let body = response.json::<SearchResponse>().await?;

    Ok(candidates_from_records(body.tracks.items))
}
