//! Track design repository.

mod design;
mod index;
mod item;
mod repository;

pub use design::{encode_td4, encode_td6, read_track_design, TrackDesignInfo};
pub use index::{decode_index, encode_index};
pub use item::TrackRepositoryItem;
pub use repository::{compare_items, TrackDesignRepository};
