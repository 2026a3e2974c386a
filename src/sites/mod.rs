//! Per-site extractors.
//!
//! Each module knows where one site keeps the artist credit, title, cover and
//! track rows, and how that site marks disc boundaries.

mod allmusic;
mod bugs;
mod melon;
mod naver;

pub use allmusic::AllMusicExtractor;
pub use bugs::BugsExtractor;
pub use melon::MelonExtractor;
pub use naver::NaverMusicExtractor;
