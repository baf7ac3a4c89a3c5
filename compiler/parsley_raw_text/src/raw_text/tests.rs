use super::*;
use crate::closing_tag::{CaseMode, ClosingTag};
use crate::config::InterpolationTrigger;
use crate::lexer::StrLexer;
use pretty_assertions::assert_eq;

/// Scan once from the start of `source` with the Parsley configuration.
/// Returns the kind (`None` on decline) and the marked token text.
fn scan(source: &str) -> (Option<TokenKind>, &str) {
    scan_with(ScannerConfig::PARSLEY, source)
}

fn scan_with(config: ScannerConfig, source: &str) -> (Option<TokenKind>, &str) {
    let mut lexer = StrLexer::new(source);
    let outcome = RawTextScanner::new(config).scan(&mut lexer);
    (outcome.kind(), lexer.token_text())
}

fn raw(text: &str) -> (Option<TokenKind>, &str) {
    (Some(TokenKind::RawText), text)
}

/// Drive the scanner over `source` the way the grammar would inside a
/// raw-text body: continue after each token, skip a recognized closing tag
/// (`</` + name) after a decline, and stop at end of input. Returns
/// `(kind, text)` per step, with `None` marking a decline.
fn drive(source: &str) -> Vec<(Option<TokenKind>, String)> {
    let scanner = RawTextScanner::new(ScannerConfig::PARSLEY);
    let mut pos = 0;
    let mut steps = Vec::new();
    while pos < source.len() {
        let mut lexer = StrLexer::at(source, pos);
        match scanner.scan(&mut lexer) {
            ScanOutcome::Handled(kind) => {
                steps.push((Some(kind), lexer.token_text().to_owned()));
                pos = lexer.token_end();
            }
            ScanOutcome::Declined => {
                let Some(len) = oracle_closing_tag(&source[pos..]) else {
                    steps.push((None, String::new()));
                    break;
                };
                steps.push((None, source[pos..pos + len].to_owned()));
                pos += len;
            }
        }
    }
    steps
}

/// Independent check for a closing tag at the start of `rest`. Returns the
/// length of `</` + name.
fn oracle_closing_tag(rest: &str) -> Option<usize> {
    let after_slash = rest.strip_prefix("</")?;
    [("style", true), ("script", true), ("SQL", false)]
        .into_iter()
        .find(|&(name, fold)| {
            let Some(head) = after_slash.get(..name.len()) else {
                return false;
            };
            let name_ok = if fold {
                head.eq_ignore_ascii_case(name)
            } else {
                head == name
            };
            name_ok
                && matches!(
                    after_slash.as_bytes().get(name.len()),
                    Some(b'>' | b' ' | b'\t' | b'\n' | b'\r')
                )
        })
        .map(|(name, _)| 2 + name.len())
}

// === End of input ===

#[test]
fn empty_input_declines() {
    assert_eq!(scan(""), (None, ""));
}

#[test]
fn content_to_eof_is_one_token() {
    assert_eq!(scan("body { color: red; }"), raw("body { color: red; }"));
}

#[test]
fn multiline_content_to_eof() {
    let css = ".a {\n  margin: 0;\n}\n";
    assert_eq!(scan(css), raw(css));
}

// === Closing tags ===

#[test]
fn content_before_closing_tag() {
    assert_eq!(scan("p { x: y }</style>"), raw("p { x: y }"));
}

#[test]
fn closing_tag_first_declines() {
    assert_eq!(scan("</style>").0, None);
    assert_eq!(scan("</script>").0, None);
    assert_eq!(scan("</SQL>").0, None);
}

#[test]
fn style_and_script_close_in_any_case() {
    for tag in ["</STYLE>", "</Style>", "</style>", "</SCRIPT>", "</sCrIpT>"] {
        let source = format!("x{tag}");
        assert_eq!(scan(&source), raw("x"), "{tag}");
    }
}

#[test]
fn sql_closes_only_in_uppercase() {
    assert_eq!(scan("SELECT 1</SQL>"), raw("SELECT 1"));
    assert_eq!(scan("SELECT 1</sql>"), raw("SELECT 1</sql>"));
    assert_eq!(scan("SELECT 1</Sql>"), raw("SELECT 1</Sql>"));
}

#[test]
fn any_known_name_ends_any_region() {
    // Pairing with the open tag is the grammar's job.
    assert_eq!(scan("a { }</script>"), raw("a { }"));
    assert_eq!(scan("let x;</SQL>"), raw("let x;"));
}

#[test]
fn whitespace_after_name_terminates() {
    assert_eq!(scan("a</style >"), raw("a"));
    assert_eq!(scan("a</script\n>"), raw("a"));
    assert_eq!(scan("a</SQL\t>"), raw("a"));
    assert_eq!(scan("a</style\r\n>"), raw("a"));
}

#[test]
fn unknown_closing_tag_is_content() {
    assert_eq!(scan("a</div>b</style>"), raw("a</div>b"));
}

#[test]
fn longer_name_is_content() {
    assert_eq!(scan("</stylesheet></style>"), raw("</stylesheet>"));
    assert_eq!(scan("</SQLite>"), raw("</SQLite>"));
}

#[test]
fn unterminated_name_at_eof_is_content() {
    assert_eq!(scan("a</style"), raw("a</style"));
    assert_eq!(scan("</scr"), raw("</scr"));
    assert_eq!(scan("</"), raw("</"));
    assert_eq!(scan("<"), raw("<"));
}

#[test]
fn angle_without_slash_is_content() {
    assert_eq!(scan("if (a < b) {}"), raw("if (a < b) {}"));
    assert_eq!(scan("a<</style>"), raw("a<"));
}

#[test]
fn closing_tag_inside_js_string() {
    let js = "document.write('</div>');\n</script>";
    assert_eq!(scan(js), raw("document.write('</div>');\n"));
}

#[test]
fn mismatching_char_is_rescanned() {
    // "</s" fails on '<', which then starts the real closing tag.
    assert_eq!(scan("</s</style>"), raw("</s"));
    // "</" fails on '/', which is plain content.
    assert_eq!(scan("<//style>"), raw("<//style>"));
}

#[test]
fn sql_prefix_does_not_resume_style() {
    assert_eq!(scan("</SQtyle>"), raw("</SQtyle>"));
    assert_eq!(scan("</SQLtyle>"), raw("</SQLtyle>"));
}

// === Interpolation ===

#[test]
fn interpolation_first_is_its_own_token() {
    assert_eq!(
        scan("@{color}"),
        (Some(TokenKind::RawTextInterpolationStart), "@{")
    );
}

#[test]
fn content_before_interpolation() {
    assert_eq!(scan("color: @{c};"), raw("color: "));
}

#[test]
fn lone_sigil_is_content() {
    assert_eq!(scan("a@bc"), raw("a@bc"));
    assert_eq!(scan("@media screen"), raw("@media screen"));
    assert_eq!(scan("@"), raw("@"));
    assert_eq!(scan("a@"), raw("a@"));
}

#[test]
fn doubled_sigil_keeps_first_as_content() {
    assert_eq!(scan("@@{x}"), raw("@"));
}

#[test]
fn brace_without_sigil_is_content() {
    assert_eq!(scan("{ a: b }"), raw("{ a: b }"));
}

#[test]
fn interpolation_after_failed_tag_prefix() {
    assert_eq!(scan("</sc@{x}"), raw("</sc"));
}

#[test]
fn sigil_before_closing_tag() {
    assert_eq!(scan("@</style>"), raw("@"));
}

// === Unicode ===

#[test]
fn multibyte_content() {
    assert_eq!(scan("content: '→ ✓';</style>"), raw("content: '→ ✓';"));
    assert_eq!(scan("日本語"), raw("日本語"));
}

#[test]
fn interior_nul_is_content() {
    assert_eq!(scan("a\0b"), raw("a\0b"));
}

// === Custom configuration ===

#[test]
fn custom_trigger() {
    let config = ScannerConfig::PARSLEY.with_trigger(InterpolationTrigger::new('$', '{'));
    assert_eq!(
        scan_with(config, "${x}"),
        (Some(TokenKind::RawTextInterpolationStart), "${")
    );
    assert_eq!(scan_with(config, "a@{x}"), raw("a@{x}"));
}

#[test]
fn custom_closing_tags() {
    const TAGS: &[ClosingTag] = &[ClosingTag::new("textarea", CaseMode::AsciiInsensitive)];
    let config = ScannerConfig::PARSLEY.with_closing_tags(TAGS);
    assert_eq!(scan_with(config, "x</TEXTAREA>"), raw("x"));
    assert_eq!(scan_with(config, "x</style>"), raw("x</style>"));
}

// === Driving a whole body ===

#[test]
fn drive_style_body_with_interpolation() {
    let steps = drive("a { color: @{c}; }</style>");
    let expected: Vec<(Option<TokenKind>, String)> = vec![
        (Some(TokenKind::RawText), "a { color: ".to_owned()),
        (Some(TokenKind::RawTextInterpolationStart), "@{".to_owned()),
        (Some(TokenKind::RawText), "c}; }".to_owned()),
        (None, "</style".to_owned()),
        (Some(TokenKind::RawText), ">".to_owned()),
    ];
    assert_eq!(steps, expected);
}

#[test]
fn drive_back_to_back_interpolations() {
    let kinds: Vec<_> = drive("@{a}@{b}").into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        kinds,
        [
            Some(TokenKind::RawTextInterpolationStart),
            Some(TokenKind::RawText),
            Some(TokenKind::RawTextInterpolationStart),
            Some(TokenKind::RawText),
        ]
    );
}

#[test]
fn scanner_is_reusable() {
    let scanner = RawTextScanner::default();
    for _ in 0..3 {
        let mut lexer = StrLexer::new("x</style>");
        assert_eq!(
            scanner.scan(&mut lexer),
            ScanOutcome::Handled(TokenKind::RawText)
        );
        assert_eq!(lexer.token_text(), "x");
    }
}

mod proptest_raw_text {
    use super::{drive, oracle_closing_tag, scan, TokenKind};
    use proptest::prelude::*;

    /// Alphabet dense in near-misses: sigils, braces, angle brackets,
    /// slashes and the letters of every closing-tag name in both cases.
    const DENSE: &str = "[@{}</> \\nstylecripSQLTYECRIPqa]{0,48}";

    proptest! {
        #[test]
        fn content_then_closing_tag(
            content in "[a-z0-9 {};:.#\\n]{1,40}",
            tag in prop_oneof![
                Just("</style>"), Just("</STYLE>"), Just("</Style>"),
                Just("</script>"), Just("</SCRIPT>"), Just("</SQL>"),
                Just("</style >"), Just("</script\n>"),
            ],
        ) {
            let source = format!("{content}{tag}");
            prop_assert_eq!(scan(&source), (Some(TokenKind::RawText), content.as_str()));
        }

        #[test]
        fn sigil_without_brace_is_kept(content in "[a-z@ ]{1,40}") {
            prop_assert_eq!(scan(&content), (Some(TokenKind::RawText), content.as_str()));
        }

        #[test]
        fn steps_cover_input(source in DENSE) {
            let covered: usize = drive(&source).iter().map(|(_, text)| text.len()).sum();
            prop_assert_eq!(covered, source.len());
        }

        #[test]
        fn raw_text_never_swallows_a_stop(source in DENSE) {
            let mut pos = 0;
            for (kind, text) in drive(&source) {
                if kind == Some(TokenKind::RawText) {
                    prop_assert!(!text.is_empty());
                    prop_assert!(!text.contains("@{"), "{:?} contains @{{", text);
                    for (i, _) in text.char_indices() {
                        prop_assert!(
                            oracle_closing_tag(&source[pos + i..]).is_none(),
                            "closing tag inside {:?}", text
                        );
                    }
                    let rest = &source[pos + text.len()..];
                    prop_assert!(
                        rest.is_empty()
                            || rest.starts_with("@{")
                            || oracle_closing_tag(rest).is_some(),
                        "raw text {:?} stopped before {:?}", text, rest
                    );
                }
                if kind == Some(TokenKind::RawTextInterpolationStart) {
                    prop_assert_eq!(text.as_str(), "@{");
                }
                pos += text.len();
            }
        }

        #[test]
        fn declines_only_at_closing_tag_or_eof(source in DENSE) {
            let (kind, _) = scan(&source);
            let at_stop = source.is_empty() || oracle_closing_tag(&source).is_some();
            prop_assert_eq!(kind.is_none(), at_stop, "outcome {:?} for {:?}", kind, source);
        }
    }
}
