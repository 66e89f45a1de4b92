use cleanflow_core::LanguageCode;

/// The active language of one rendering session.
///
/// Created at startup and changed only through
/// [`HydrationEngine::change_language`](crate::HydrationEngine::change_language),
/// which checks the new code against the supported table first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageContext {
    current: LanguageCode,
}

impl LanguageContext {
    pub fn new(current: LanguageCode) -> Self {
        Self { current }
    }

    pub fn current(&self) -> LanguageCode {
        self.current
    }

    pub(crate) fn switch_to(&mut self, code: LanguageCode) {
        self.current = code;
    }
}
