pub mod identifier;
pub mod natural;
pub mod title;

pub use identifier::{episode_param, resolve, resolve_episode_ref};
pub use natural::{natural_cmp, sort_natural};
pub use title::{normalize_for_matching, strip_season_qualifiers};
