use std::fmt;
use std::str::FromStr;

/// AI tuning for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiSettings {
    /// AI paddle speed as a fraction of the ball's horizontal speed
    pub speed_factor: f32,
    /// Max prediction error as a fraction of the field height
    pub prediction_error: f32,
}

/// The five preset difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::Impossible,
    ];

    pub fn settings(self) -> AiSettings {
        let (speed_factor, prediction_error) = match self {
            Difficulty::Easy => (0.4, 0.3),
            Difficulty::Medium => (0.6, 0.2),
            Difficulty::Hard => (0.8, 0.1),
            Difficulty::Expert => (0.9, 0.05),
            Difficulty::Impossible => (1.0, 0.0),
        };
        AiSettings {
            speed_factor,
            prediction_error,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
            Difficulty::Impossible => "Impossible",
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Result<Self, String> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| format!("Difficulty index must be 0-4, got {}", index))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown difficulty: {:?}", s))
    }
}
