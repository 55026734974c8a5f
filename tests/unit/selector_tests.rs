/*!
 * Tests for pipeline selection
 */

use bhashabridge::classifier::LanguageLabel;
use bhashabridge::pipeline::{Capability, ReportField, StepInput, select};

#[test]
fn test_select_withEveryLabel_shouldFollowRoutingTable() {
    let cases = [
        (
            LanguageLabel::Banglish,
            vec![Capability::Transliterate, Capability::TranslateBnToEn],
        ),
        (
            LanguageLabel::English,
            vec![Capability::GrammarCorrect, Capability::TranslateEnToBn],
        ),
        (LanguageLabel::Bengali, vec![Capability::TranslateBnToEn]),
        (LanguageLabel::Unknown, vec![]),
    ];

    for (label, expected) in cases {
        assert_eq!(select(label, "text").capabilities(), expected, "label {}", label);
    }
}

#[test]
fn test_select_withTwoStepPlans_shouldChainSecondStep() {
    for label in [LanguageLabel::Banglish, LanguageLabel::English] {
        let plan = select(label, "some text");
        let steps = plan.steps();

        assert_eq!(steps[0].input, StepInput::Original("some text".to_string()));
        assert_eq!(steps[1].input, StepInput::PreviousOutput);
    }
}

#[test]
fn test_select_withUnknown_shouldReturnEmptyPlan() {
    let plan = select(LanguageLabel::Unknown, "??");
    assert!(plan.is_empty());
    assert_eq!(plan.len(), 0);
}

#[test]
fn test_select_withSameInput_shouldBeDeterministic() {
    assert_eq!(
        select(LanguageLabel::English, "Hello"),
        select(LanguageLabel::English, "Hello")
    );
}

#[test]
fn test_capability_reportField_shouldMapFixedKeys() {
    assert_eq!(Capability::Transliterate.report_field(), ReportField::Bengali);
    assert_eq!(Capability::GrammarCorrect.report_field(), ReportField::Corrected);
    assert_eq!(Capability::TranslateEnToBn.report_field(), ReportField::Bengali);
    assert_eq!(Capability::TranslateBnToEn.report_field(), ReportField::English);
}

#[test]
fn test_capability_isGenerative_shouldExcludeOnlyTransliteration() {
    assert!(!Capability::Transliterate.is_generative());
    assert!(Capability::GrammarCorrect.is_generative());
    assert!(Capability::TranslateEnToBn.is_generative());
    assert!(Capability::TranslateBnToEn.is_generative());
}
