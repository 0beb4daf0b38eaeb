mod auth;
mod genre;

pub use auth::TokenManager;
pub use genre::GenreCache;
pub use genre::GenreCacheStats;
pub use genre::GenreStore;
pub use genre::StoreError;
