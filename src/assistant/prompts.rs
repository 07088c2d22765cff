// Per-language system prompts for the farming assistant

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Tamil,
}

impl Language {
    /// Maps a client-supplied selector to a language. Unknown selectors fall back to English.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector.map(|s| s.trim().to_lowercase()) {
            Some(s) if matches!(s.as_str(), "tamil" | "ta" | "தமிழ்") => Language::Tamil,
            _ => Language::English,
        }
    }
}

const PROMPTS: &[(Language, &str)] = &[
    (
        Language::English,
        "You are AgroAI, a helpful agricultural assistant. \
         Give clear, practical farming and market advice.\n",
    ),
    (
        Language::Tamil,
        "நீங்கள் AgroAI உதவியாளர். எல்லா பதில்களையும் தமிழில் வழங்கவும். \
         விவசாயம் மற்றும் சந்தை தொடர்பான தெளிவான, நடைமுறை விளக்கங்களைத் தாருங்கள்.\n",
    ),
];

pub fn system_prompt(language: Language) -> &'static str {
    PROMPTS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, prompt)| *prompt)
        .unwrap_or(PROMPTS[0].1)
}
