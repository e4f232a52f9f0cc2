use lingua::LanguageDetectorBuilder;

/// Best-effort language identification for `from: "auto"` requests.
pub trait LanguageDetector: Send + Sync {
    /// Returns a lowercase ISO 639-1 code, or `None` when no language
    /// matches the text.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Detector backed by lingua's statistical models, built over all languages.
pub struct LinguaDetector {
    detector: lingua::LanguageDetector,
}

impl LinguaDetector {
    pub fn new() -> Self {
        let detector = LanguageDetectorBuilder::from_all_languages().build();
        Self { detector }
    }
}

impl LanguageDetector for LinguaDetector {
    fn detect(&self, text: &str) -> Option<String> {
        self.detector
            .detect_language_of(text)
            .map(|language| language.iso_code_639_1().to_string().to_lowercase())
    }
}
