use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomCategory {
    LivingRoom,
    Bedroom,
    HomeOffice,
}

impl RoomCategory {
    pub const ALL: [RoomCategory; 3] = [Self::LivingRoom, Self::Bedroom, Self::HomeOffice];

    pub fn id(self) -> &'static str {
        match self {
            Self::LivingRoom => "living_room",
            Self::Bedroom => "bedroom",
            Self::HomeOffice => "home_office",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LivingRoom => "Living Room",
            Self::Bedroom => "Bedroom",
            Self::HomeOffice => "Home Office",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectCategory {
    Woman,
    Man,
    Child,
    Couple,
    Family,
    Grandparents,
}

impl SubjectCategory {
    pub const ALL: [SubjectCategory; 6] = [
        Self::Woman,
        Self::Man,
        Self::Child,
        Self::Couple,
        Self::Family,
        Self::Grandparents,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Woman => "woman",
            Self::Man => "man",
            Self::Child => "child",
            Self::Couple => "couple",
            Self::Family => "family",
            Self::Grandparents => "grandparents",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Woman => "Woman",
            Self::Man => "Man",
            Self::Child => "Child",
            Self::Couple => "Couple",
            Self::Family => "Family",
            Self::Grandparents => "Grandparents",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownCategory {}

/// Accepts the snake_case id, the label, or a hyphenated id; case-insensitive.
fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|ch| if ch == ' ' || ch == '-' { '_' } else { ch })
        .collect()
}

impl FromStr for RoomCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = normalize_token(raw);
        Self::ALL
            .into_iter()
            .find(|room| room.id() == token)
            .ok_or_else(|| UnknownCategory {
                kind: "room",
                value: raw.to_string(),
            })
    }
}

impl FromStr for SubjectCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = normalize_token(raw);
        Self::ALL
            .into_iter()
            .find(|subject| subject.id() == token)
            .ok_or_else(|| UnknownCategory {
                kind: "subject",
                value: raw.to_string(),
            })
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for SubjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::{RoomCategory, SubjectCategory};

    #[test]
    fn room_parses_ids_and_labels() {
        assert_eq!("living_room".parse::<RoomCategory>(), Ok(RoomCategory::LivingRoom));
        assert_eq!("Home Office".parse::<RoomCategory>(), Ok(RoomCategory::HomeOffice));
        assert_eq!(" bedroom ".parse::<RoomCategory>(), Ok(RoomCategory::Bedroom));
        assert_eq!("home-office".parse::<RoomCategory>(), Ok(RoomCategory::HomeOffice));
    }

    #[test]
    fn unknown_room_echoes_input() {
        let err = "kitchen".parse::<RoomCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unknown room 'kitchen'");
    }

    #[test]
    fn subject_display_round_trips_through_serde_id() -> anyhow::Result<()> {
        for subject in SubjectCategory::ALL {
            let encoded = serde_json::to_value(subject)?;
            assert_eq!(encoded, serde_json::json!(subject.to_string()));
            assert_eq!(subject.to_string().parse::<SubjectCategory>(), Ok(subject));
        }
        Ok(())
    }
}
