mod builder;
mod categories;
mod presets;
mod types;

pub use builder::{build, merge_persona, merge_subject, resolve_activity};
pub use categories::{RoomCategory, SubjectCategory, UnknownCategory};
pub use presets::{
    room_details, subject_details, PersonaOverrides, RoomDetails, SubjectDetails,
    SubjectOverrides,
};
pub use types::{
    CameraSettings, HeroWall, LightingSettings, MockupConfiguration, NarrativeIntent,
    OutputSettings, Persona, RoomSetting, SubjectDirection, VisualEffects, WallpaperRendering,
};
