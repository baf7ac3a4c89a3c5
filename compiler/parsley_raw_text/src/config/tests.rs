use super::*;
use crate::closing_tag::CaseMode;

#[test]
fn default_is_parsley() {
    assert_eq!(ScannerConfig::default(), ScannerConfig::PARSLEY);
    assert_eq!(InterpolationTrigger::default(), InterpolationTrigger::PARSLEY);
}

#[test]
fn parsley_trigger_is_at_brace() {
    let trigger = ScannerConfig::PARSLEY.trigger();
    assert_eq!(trigger.sigil(), '@');
    assert_eq!(trigger.open(), '{');
}

#[test]
fn parsley_closing_tags() {
    let tags: Vec<_> = ScannerConfig::PARSLEY
        .closing_tags()
        .iter()
        .map(|tag| (tag.name(), tag.case()))
        .collect();
    assert_eq!(
        tags,
        [
            ("style", CaseMode::AsciiInsensitive),
            ("script", CaseMode::AsciiInsensitive),
            ("SQL", CaseMode::Sensitive),
        ]
    );
}

#[test]
fn with_closing_tags_keeps_trigger() {
    const TEXTAREA: &[ClosingTag] = &[ClosingTag::new("textarea", CaseMode::AsciiInsensitive)];
    let config = ScannerConfig::PARSLEY.with_closing_tags(TEXTAREA);
    assert_eq!(config.closing_tags(), TEXTAREA);
    assert_eq!(config.trigger(), InterpolationTrigger::PARSLEY);
}

#[test]
fn with_trigger_keeps_closing_tags() {
    let config = ScannerConfig::PARSLEY.with_trigger(InterpolationTrigger::new('$', '{'));
    assert_eq!(config.trigger().sigil(), '$');
    assert_eq!(config.closing_tags(), PARSLEY_CLOSING_TAGS);
}

#[test]
#[should_panic(expected = "interpolation sigil must not be '<'")]
fn angle_bracket_sigil_rejected() {
    let _ = InterpolationTrigger::new('<', '{');
}
