//! Re-exports of the third-party crates used in the public API, so that
//! downstream crates build against the same versions.

pub use {anyhow,
         hashbrown,
         indexmap,
         itertools,
         log,
         once_cell,
         plotly,
         pretty_env_logger,
         rand,
         serde,
         serde_json};
