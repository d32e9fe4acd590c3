pub mod api_server;
pub mod memory;
pub mod postgres;
pub mod traits;

pub use api_server::start_api_server;
pub use memory::MemoryTeamStore;
pub use postgres::PostgresStore;
pub use traits::{clamp_game_limit, TeamStore, DEFAULT_RECENT_GAMES, MAX_RECENT_GAMES};

#[cfg(test)]
pub use traits::MockTeamStore;
