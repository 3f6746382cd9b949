use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeIntent {
    pub message: String,
    pub emotion: String,
    pub concept: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub identity: String,
    pub vibe: String,
    pub appearance: String,
    pub ethnicity_variation: String,
}

/// The single wall that carries the wallpaper and must stay dominant in frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroWall {
    pub role: String,
    pub position: String,
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSetting {
    #[serde(rename = "type")]
    pub kind: String,
    pub location_flavor: String,
    pub style: String,
    pub furniture: String,
    pub clutter_level: String,
    pub hero_wall: HeroWall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperRendering {
    pub coverage: String,
    pub pattern_scale: String,
    pub alignment: String,
    pub lighting_impact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDirection {
    pub activity: String,
    pub pose: String,
    pub outfit: String,
    pub details: String,
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub angle: String,
    pub framing: String,
    pub composition_rules: Vec<String>,
    pub focus: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightingSettings {
    #[serde(rename = "type")]
    pub kind: String,
    pub source: String,
    pub mood: String,
    pub time_of_day_variations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualEffects {
    pub atmosphere: Vec<String>,
    pub prohibitions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub style: String,
    pub resolution: String,
    pub use_case: String,
}

/// Fully resolved scene description for one room/subject selection.
///
/// Built fresh per submission by [`super::build`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockupConfiguration {
    pub narrative_intent: NarrativeIntent,
    pub persona: Persona,
    pub room: RoomSetting,
    pub wallpaper: WallpaperRendering,
    pub subject: SubjectDirection,
    pub camera: CameraSettings,
    pub lighting: LightingSettings,
    pub fx: VisualEffects,
    pub output: OutputSettings,
}

impl MockupConfiguration {
    /// Names of any text fields or lists left empty. A built configuration
    /// always returns an empty vector.
    pub fn empty_fields(&self) -> Vec<&'static str> {
        let text_fields: [(&'static str, &str); 32] = [
            ("narrative_intent.message", &self.narrative_intent.message),
            ("narrative_intent.emotion", &self.narrative_intent.emotion),
            ("narrative_intent.concept", &self.narrative_intent.concept),
            ("persona.identity", &self.persona.identity),
            ("persona.vibe", &self.persona.vibe),
            ("persona.appearance", &self.persona.appearance),
            ("persona.ethnicity_variation", &self.persona.ethnicity_variation),
            ("room.type", &self.room.kind),
            ("room.location_flavor", &self.room.location_flavor),
            ("room.style", &self.room.style),
            ("room.furniture", &self.room.furniture),
            ("room.clutter_level", &self.room.clutter_level),
            ("room.hero_wall.role", &self.room.hero_wall.role),
            ("room.hero_wall.position", &self.room.hero_wall.position),
            ("wallpaper.coverage", &self.wallpaper.coverage),
            ("wallpaper.pattern_scale", &self.wallpaper.pattern_scale),
            ("wallpaper.alignment", &self.wallpaper.alignment),
            ("wallpaper.lighting_impact", &self.wallpaper.lighting_impact),
            ("subject.activity", &self.subject.activity),
            ("subject.pose", &self.subject.pose),
            ("subject.outfit", &self.subject.outfit),
            ("subject.details", &self.subject.details),
            ("subject.expression", &self.subject.expression),
            ("camera.angle", &self.camera.angle),
            ("camera.framing", &self.camera.framing),
            ("camera.focus", &self.camera.focus),
            ("lighting.type", &self.lighting.kind),
            ("lighting.source", &self.lighting.source),
            ("lighting.mood", &self.lighting.mood),
            ("output.style", &self.output.style),
            ("output.resolution", &self.output.resolution),
            ("output.use_case", &self.output.use_case),
        ];
        let list_fields: [(&'static str, &[String]); 5] = [
            ("room.hero_wall.constraints", &self.room.hero_wall.constraints),
            ("camera.composition_rules", &self.camera.composition_rules),
            ("lighting.time_of_day_variations", &self.lighting.time_of_day_variations),
            ("fx.atmosphere", &self.fx.atmosphere),
            ("fx.prohibitions", &self.fx.prohibitions),
        ];

        let mut empty = text_fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect::<Vec<&'static str>>();
        for (name, items) in list_fields {
            if items.is_empty() || items.iter().any(|item| item.trim().is_empty()) {
                empty.push(name);
            }
        }
        empty
    }
}
