use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    DigitLiteral { digit: char },
    MissingSyllablesAfterPeriod,
    MalformedFraction,
    MultiplePeriods,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("Not sure what to do with this character", vec![format!("Found `{tok}`")])
            },
            LexicalErrorType::DigitLiteral { digit } => {
                ("Cats don't count in digits", vec![
                    format!("Found `{digit}`, write numbers as `mew` syllables instead"),
                    "e.g. `mewmew` is 2 and `mewmew.mew` is 2.1".to_string(),
                ])
            },
            LexicalErrorType::MissingSyllablesAfterPeriod => {
                ("Missing `mew` syllables after the period", vec![])
            },
            LexicalErrorType::MalformedFraction => {
                ("The fractional part must be made of `mew` syllables only", vec![])
            },
            LexicalErrorType::MultiplePeriods => {
                ("Found several periods in one number", vec![])
            },
        }
    }
}
