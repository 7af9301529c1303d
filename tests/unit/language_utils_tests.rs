/*!
 * Tests for locale tag utilities
 */

use substream::language_utils::{get_language_name, parse_language_tag};

#[test]
fn test_parseLanguageTag_withRegion_shouldSplitAndNormalizeCase() {
    let tag = parse_language_tag("en-us").unwrap();
    assert_eq!(tag.language, "en");
    assert_eq!(tag.region.as_deref(), Some("US"));
    assert_eq!(tag.to_string(), "en-US");
}

#[test]
fn test_parseLanguageTag_withBareLanguage_shouldHaveNoRegion() {
    let tag = parse_language_tag("de").unwrap();
    assert_eq!(tag.language, "de");
    assert!(tag.region.is_none());
}

#[test]
fn test_parseLanguageTag_withThreeLetterCodeAndNumericRegion_shouldSucceed() {
    assert!(parse_language_tag("fil-PH").is_ok());
    let tag = parse_language_tag("es-419").unwrap();
    assert_eq!(tag.region.as_deref(), Some("419"));
}

#[test]
fn test_parseLanguageTag_withScriptSubtag_shouldKeepTagIntact() {
    let tag = parse_language_tag("cmn-Hans-CN").unwrap();
    assert_eq!(tag.language, "cmn");
    assert_eq!(tag.script.as_deref(), Some("Hans"));
    assert_eq!(tag.region.as_deref(), Some("CN"));
    assert_eq!(tag.to_string(), "cmn-Hans-CN");

    for tag in ["yue-Hant-HK", "zh-Hant-TW", "sr-Latn-RS", "sr-latn"] {
        assert!(parse_language_tag(tag).is_ok(), "{} should parse", tag);
    }
    assert_eq!(parse_language_tag("sr-latn").unwrap().to_string(), "sr-Latn");
}

#[test]
fn test_parseLanguageTag_withUnderscore_shouldBeAccepted() {
    assert_eq!(parse_language_tag("pt_BR").unwrap().to_string(), "pt-BR");
}

#[test]
fn test_parseLanguageTag_withUnknownOrMalformed_shouldFail() {
    assert!(parse_language_tag("zz-US").is_err());
    assert!(parse_language_tag("english").is_err());
    assert!(parse_language_tag("en-USA-x").is_err());
    assert!(parse_language_tag("en-US-Hans").is_err());
    assert!(parse_language_tag("xx-Hans-CN").is_err());
    assert!(parse_language_tag("").is_err());
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en-US").unwrap(), "English");
    assert_eq!(get_language_name("fr").unwrap(), "French");
}
