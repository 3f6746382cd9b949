use super::categories::{RoomCategory, SubjectCategory};
use super::presets::{room_details, subject_details, PersonaOverrides, RoomDetails, SubjectOverrides};
use super::types::{
    CameraSettings, HeroWall, LightingSettings, MockupConfiguration, NarrativeIntent,
    OutputSettings, Persona, RoomSetting, SubjectDirection, VisualEffects, WallpaperRendering,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

fn base_persona() -> Persona {
    Persona {
        identity: "Young American woman in her mid-20s to early-30s living in California".to_string(),
        vibe: "Creative, internet-savvy, casual but stylish, middle-class urban lifestyle".to_string(),
        appearance: "Natural makeup or no-makeup look, healthy skin tone, hair in loose waves or messy bun, realistic body proportions".to_string(),
        ethnicity_variation: "Rotate between diverse, realistic American backgrounds (White, Latina, Black, Asian, mixed) across different generations of mockups".to_string(),
    }
}

fn base_subject(activity: &str) -> SubjectDirection {
    SubjectDirection {
        activity: activity.to_string(),
        pose: "Natural and comfortable seated or standing pose, not sexualized or over-posed".to_string(),
        outfit: "Casual California style: soft knit sweater, t-shirt and jeans, comfy loungewear, cotton dress, or athleisure set".to_string(),
        details: "Bare feet or simple socks at home, simple jewelry, maybe a scrunchie or hair clip".to_string(),
        expression: "Soft smile, focused, relaxed, or slightly dreamy — feels like a candid moment at home".to_string(),
    }
}

fn base_room(details: &RoomDetails) -> RoomSetting {
    RoomSetting {
        kind: details.kind.to_string(),
        location_flavor: "California apartment in Los Angeles or coastal city, small-to-medium size rental space".to_string(),
        style: "Modern, cozy, slightly boho or minimalist, not luxury mansion".to_string(),
        furniture: details.furniture.to_string(),
        clutter_level: "Lightly lived-in (mug, book, throw blanket), but not messy, keeps focus on the wallpaper wall".to_string(),
        hero_wall: HeroWall {
            role: "Main wall where the wallpaper is applied and must be clearly visible".to_string(),
            position: details.hero_wall_position.to_string(),
            constraints: strings(&[
                "No large artwork, posters or shelves covering the wallpaper",
                "Subject can overlap maximum 20–30% of the wallpaper area",
                "No logos or brand names on decor",
            ]),
        },
    }
}

fn base_configuration(details: &RoomDetails) -> MockupConfiguration {
    MockupConfiguration {
        narrative_intent: NarrativeIntent {
            message: "Real-life California apartment with a relaxed subject and hero wallpaper wall".to_string(),
            emotion: "Cozy, lived-in, effortless West Coast comfort".to_string(),
            concept: "Everyday California moment unwinding in a stylish rental apartment, with the wallpaper wall as the subtle design hero".to_string(),
        },
        persona: base_persona(),
        room: base_room(details),
        wallpaper: WallpaperRendering {
            coverage: "Full-height wallpaper covering the entire hero wall from floor or baseboard to ceiling".to_string(),
            pattern_scale: "Pattern scale should look realistic for a standard US wall (not tiny, not oversized)".to_string(),
            alignment: "Wallpaper lines and motifs must be straight and vertical, no distortion, no extreme wide-angle bending".to_string(),
            lighting_impact: "Wallpaper colors must remain accurate and not washed out by lighting".to_string(),
        },
        subject: base_subject(details.subject_activity),
        camera: CameraSettings {
            angle: "Room-perspective shot from human eye-level, slightly diagonal to the hero wall so we see depth but the wall remains clearly readable".to_string(),
            framing: "4:5 aspect ratio".to_string(),
            composition_rules: strings(&[
                "Wallpaper wall must occupy at least 40–60% of the image width",
                "Avoid extreme corner angles where wallpaper becomes too narrow",
                "Avoid fisheye or ultra-wide distortion",
            ]),
            focus: "Wallpaper wall and subject both in clear, sharp focus".to_string(),
        },
        lighting: LightingSettings {
            kind: "Soft natural daylight".to_string(),
            source: "Large window light coming from the side of the room (not directly behind the camera), like a California afternoon sun".to_string(),
            mood: "Warm and inviting, without harsh shadows or overexposed highlights".to_string(),
            time_of_day_variations: strings(&[
                "Midday bright but soft light",
                "Late afternoon golden hour with gentle warmth",
            ]),
        },
        fx: VisualEffects {
            atmosphere: strings(&[
                "Slight depth of field so background stays readable",
                "No heavy film grain, no extreme color grading, keep colors realistic",
            ]),
            prohibitions: strings(&[
                "No text, no brand logos, no UI overlays",
                "No surreal or fantasy elements",
                "No messy artifacts on the wallpaper area",
            ]),
        },
        output: OutputSettings {
            style: "Photorealistic high-resolution interior photograph".to_string(),
            resolution: "2048x2560 pixels".to_string(),
            use_case: "Etsy product mockups for wallpaper listings showing real-life usage in a California apartment".to_string(),
        },
    }
}

fn apply(target: &mut String, value: Option<&str>) {
    if let Some(value) = value {
        *target = value.to_string();
    }
}

/// Field-by-field merge: only fields present in `overrides` replace the base.
pub fn merge_persona(base: &Persona, overrides: &PersonaOverrides) -> Persona {
    let mut merged = base.clone();
    apply(&mut merged.identity, overrides.identity);
    apply(&mut merged.vibe, overrides.vibe);
    apply(&mut merged.appearance, overrides.appearance);
    apply(&mut merged.ethnicity_variation, overrides.ethnicity_variation);
    merged
}

pub fn merge_subject(base: &SubjectDirection, overrides: &SubjectOverrides) -> SubjectDirection {
    let mut merged = base.clone();
    apply(&mut merged.activity, overrides.activity);
    apply(&mut merged.pose, overrides.pose);
    apply(&mut merged.outfit, overrides.outfit);
    apply(&mut merged.details, overrides.details);
    apply(&mut merged.expression, overrides.expression);
    merged
}

/// The subject's own activity wins over the room default.
pub fn resolve_activity(room_default: &str, subject_override: Option<&str>) -> String {
    subject_override
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(room_default)
        .to_string()
}

pub fn build(room: RoomCategory, subject: SubjectCategory) -> MockupConfiguration {
    let room_details = room_details(room);
    let subject_details = subject_details(subject);

    let mut config = base_configuration(room_details);
    config.persona = merge_persona(&config.persona, &subject_details.persona);
    config.subject = merge_subject(&config.subject, &subject_details.subject);
    config.subject.activity =
        resolve_activity(room_details.subject_activity, subject_details.subject.activity);
    config
}
