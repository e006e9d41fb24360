//! Text save format for towns: a version header, the camera and world name,
//! every committed road on one line and one line per committed building.

pub mod file_header;
mod restore;
pub mod save_error;
mod save_plugin;
pub mod serialization;


pub use restore::restore_town;
pub use save_error::SaveError;
pub use save_plugin::{LastSave, LoadFailedEvent, LoadTownEvent, SavePlugin, SaveTownEvent};
pub use serialization::{BuildingRecord, CameraRecord, RoadRecord, SaveData};
