use serde::{Deserialize, Serialize};

/// Voices offered by the speech synthesis backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceType {
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl VoiceType {
    pub const ALL: [VoiceType; 6] = [
        VoiceType::Alloy,
        VoiceType::Echo,
        VoiceType::Fable,
        VoiceType::Onyx,
        VoiceType::Nova,
        VoiceType::Shimmer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceType::Alloy => "alloy",
            VoiceType::Echo => "echo",
            VoiceType::Fable => "fable",
            VoiceType::Onyx => "onyx",
            VoiceType::Nova => "nova",
            VoiceType::Shimmer => "shimmer",
        }
    }
}

impl std::fmt::Display for VoiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
