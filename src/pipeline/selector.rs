/*!
 * Pipeline selection.
 *
 * Every branch yields a bilingual report: a normalized form in the source
 * script plus a translation. Bengali input has no correction step, and an
 * unknown language gets no transform at all.
 */

use super::{Capability, PipelinePlan, PipelineStep};
use crate::classifier::LanguageLabel;

/// Map a label and the trimmed request text to the plan to execute
pub fn select(label: LanguageLabel, text: &str) -> PipelinePlan {
    let steps = match label {
        LanguageLabel::Banglish => vec![
            PipelineStep::on_original(Capability::Transliterate, text),
            PipelineStep::chained(Capability::TranslateBnToEn),
        ],
        LanguageLabel::English => vec![
            PipelineStep::on_original(Capability::GrammarCorrect, text),
            PipelineStep::chained(Capability::TranslateEnToBn),
        ],
        LanguageLabel::Bengali => vec![PipelineStep::on_original(Capability::TranslateBnToEn, text)],
        LanguageLabel::Unknown => Vec::new(),
    };

    PipelinePlan::from_steps(steps)
}
