use super::categories::{RoomCategory, SubjectCategory};

/// Per-room substitutions applied on top of the base apartment preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomDetails {
    pub kind: &'static str,
    pub furniture: &'static str,
    pub hero_wall_position: &'static str,
    pub subject_activity: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonaOverrides {
    pub identity: Option<&'static str>,
    pub vibe: Option<&'static str>,
    pub appearance: Option<&'static str>,
    pub ethnicity_variation: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubjectOverrides {
    pub activity: Option<&'static str>,
    pub pose: Option<&'static str>,
    pub outfit: Option<&'static str>,
    pub details: Option<&'static str>,
    pub expression: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectDetails {
    pub persona: PersonaOverrides,
    pub subject: SubjectOverrides,
}

const LIVING_ROOM: RoomDetails = RoomDetails {
    kind: "LIVING ROOM",
    furniture: "Comfortable sofa, simple coffee table, floor lamp, rug, maybe some books or plants.",
    hero_wall_position: "Wall behind the sofa.",
    subject_activity:
        "Relaxed everyday moment: reading on the sofa, scrolling on phone, sipping coffee.",
};

const BEDROOM: RoomDetails = RoomDetails {
    kind: "BEDROOM",
    furniture: "Cozy bed with simple headboard, nightstand, soft rug, maybe a small armchair.",
    hero_wall_position: "Wall behind the bed headboard.",
    subject_activity: "Waking up, stretching, reading a book in bed, or getting ready.",
};

const HOME_OFFICE: RoomDetails = RoomDetails {
    kind: "HOME OFFICE",
    furniture: "Minimalist desk, comfortable chair, bookshelf, maybe a small plant.",
    hero_wall_position: "Main wall behind the desk.",
    subject_activity: "Working on a laptop, sketching in a notebook, or on a video call.",
};

pub fn room_details(room: RoomCategory) -> &'static RoomDetails {
    match room {
        RoomCategory::LivingRoom => &LIVING_ROOM,
        RoomCategory::Bedroom => &BEDROOM,
        RoomCategory::HomeOffice => &HOME_OFFICE,
    }
}

const WOMAN: SubjectDetails = SubjectDetails {
    persona: PersonaOverrides {
        identity: Some("Young American woman in her mid-20s to early-30s living in California"),
        vibe: Some("Creative, internet-savvy, casual but stylish, middle-class urban lifestyle"),
        appearance: Some(
            "Natural makeup or no-makeup look, healthy skin tone, hair in loose waves or messy bun, realistic body proportions",
        ),
        ethnicity_variation: None,
    },
    subject: SubjectOverrides {
        activity: None,
        pose: Some("Natural and comfortable seated or standing pose, not sexualized or over-posed"),
        outfit: Some(
            "Casual California style: soft knit sweater, t-shirt and jeans, comfy loungewear, cotton dress, or athleisure set",
        ),
        details: None,
        expression: Some(
            "Soft smile, focused, relaxed, or slightly dreamy — feels like a candid moment at home",
        ),
    },
};

const MAN: SubjectDetails = SubjectDetails {
    persona: PersonaOverrides {
        identity: Some("Young American man in his mid-20s to early-30s living in California"),
        vibe: Some("Creative, tech-savvy, relaxed and casual, middle-class urban lifestyle"),
        appearance: Some(
            "Natural, healthy appearance, short or medium-length hair, realistic body proportions",
        ),
        ethnicity_variation: None,
    },
    subject: SubjectOverrides {
        activity: None,
        pose: Some(
            "Natural, relaxed pose, such as leaning against a wall, sitting on the sofa, or at a desk",
        ),
        outfit: Some(
            "Casual California style: t-shirt and jeans, henley shirt, comfortable sweater, or hoodie",
        ),
        details: None,
        expression: Some("Thoughtful, relaxed, or a gentle smile"),
    },
};

const CHILD: SubjectDetails = SubjectDetails {
    persona: PersonaOverrides {
        identity: Some("A young child, boy or girl, aged 5-8"),
        vibe: Some("Playful, imaginative, happy, and engrossed in an activity"),
        appearance: Some("A natural, candid appearance suitable for a child"),
        ethnicity_variation: None,
    },
    subject: SubjectOverrides {
        activity: Some(
            "Playing with wooden toys on the rug, drawing at a small table, reading a picture book.",
        ),
        pose: Some(
            "Natural childhood poses: sitting on the floor, kneeling, or sitting in a small chair",
        ),
        outfit: Some(
            "Comfortable and simple play clothes (e.g., t-shirt and leggings, simple dress, shorts)",
        ),
        details: None,
        expression: Some("Focused, happy, or curious"),
    },
};

const COUPLE: SubjectDetails = SubjectDetails {
    persona: PersonaOverrides {
        identity: Some("A young couple, man and woman, in their late 20s to early 30s"),
        vibe: Some("Affectionate, relaxed, happy together, sharing a quiet moment"),
        appearance: Some("Natural, healthy appearance, reflecting a casual California lifestyle"),
        ethnicity_variation: None,
    },
    subject: SubjectOverrides {
        activity: Some(
            "Chatting on the sofa with coffee, looking at a laptop together, reading side-by-side, a quiet shared moment.",
        ),
        pose: Some(
            "Comfortable and close, but natural. Sitting together on a sofa or standing near each other",
        ),
        outfit: Some("Coordinated casual loungewear or comfortable home attire"),
        details: None,
        expression: Some("Happy, content, and relaxed expressions"),
    },
};

const FAMILY: SubjectDetails = SubjectDetails {
    persona: PersonaOverrides {
        identity: Some(
            "A young family, parents in their 30s with one young child (4-7 years old)",
        ),
        vibe: Some("Warm, loving, candid family moment, not overly posed"),
        appearance: Some("Natural and relatable appearance for a young family"),
        ethnicity_variation: None,
    },
    subject: SubjectOverrides {
        activity: Some(
            "Reading a book together on the sofa, playing a board game on the floor, parents watching the child play.",
        ),
        pose: Some(
            "Grouped together in a natural, interactive way, like sitting on a rug or sofa",
        ),
        outfit: Some("Casual, comfortable home clothes that are complementary but not matching"),
        details: None,
        expression: Some("Joyful, loving, and engaged with each other"),
    },
};

const GRANDPARENTS: SubjectDetails = SubjectDetails {
    persona: PersonaOverrides {
        identity: Some("An older couple in their late 60s or 70s"),
        vibe: Some("Content, peaceful, loving, enjoying their retirement"),
        appearance: Some(
            "Kind faces, gray or white hair, reflecting a healthy and active older age",
        ),
        ethnicity_variation: None,
    },
    subject: SubjectOverrides {
        activity: Some(
            "One is reading a newspaper while the other knits, doing a puzzle together, enjoying tea and looking out a window.",
        ),
        pose: Some(
            "Comfortably seated in armchairs or on a sofa, engaged in their individual or shared activities",
        ),
        outfit: Some(
            "Comfortable, classic clothing such as cardigans, slacks, and comfortable shirts",
        ),
        details: None,
        expression: Some("Peaceful, content, and serene expressions"),
    },
};

pub fn subject_details(subject: SubjectCategory) -> &'static SubjectDetails {
    match subject {
        SubjectCategory::Woman => &WOMAN,
        SubjectCategory::Man => &MAN,
        SubjectCategory::Child => &CHILD,
        SubjectCategory::Couple => &COUPLE,
        SubjectCategory::Family => &FAMILY,
        SubjectCategory::Grandparents => &GRANDPARENTS,
    }
}
