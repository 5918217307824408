mod ids;
mod song;
mod view;

pub use ids::SongId;
pub use song::Song;
pub use view::ActiveView;
