mod artist_images;
mod session;

pub use artist_images::ARTIST_BATCH_SIZE;
pub use artist_images::ArtistImageCache;
pub use session::EXPIRY_MARGIN_SECS;
pub use session::FileSessionStore;
pub use session::MemorySessionStore;
pub use session::SessionManager;
pub use session::SessionStore;
pub use session::{expires_at, is_expired, now_secs};
