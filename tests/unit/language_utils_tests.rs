/*!
 * Tests for language utility functions
 */

use anyhow::Result;
use bhashabridge::language_utils::{
    BENGALI, ENGLISH, get_language_name, language_codes_match, normalize_to_part2t,
};

/// Test normalization of language codes to ISO 639-2/T format
#[test]
fn test_normalize_to_part2t_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part2t("bn").unwrap(), "ben");
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("ben").unwrap(), "ben");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");

    // Case insensitivity
    assert_eq!(normalize_to_part2t("BN").unwrap(), "ben");

    // Whitespace and region subtags
    assert_eq!(normalize_to_part2t(" en ").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("bn-BD").unwrap(), "ben");
    assert_eq!(normalize_to_part2t("en_US").unwrap(), "eng");
}

/// Test normalization with invalid codes
#[test]
fn test_normalize_to_part2t_withInvalidCodes_shouldFail() {
    assert!(normalize_to_part2t("xx").is_err());
    assert!(normalize_to_part2t("").is_err());
    assert!(normalize_to_part2t("english").is_err());
}

/// Test matching of language codes in different formats
#[test]
fn test_language_codes_match_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("bn", BENGALI));
    assert!(language_codes_match("ben", BENGALI));
    assert!(language_codes_match("EN", ENGLISH));
    assert!(language_codes_match("eng", ENGLISH));

    assert!(!language_codes_match("bn", ENGLISH));
    assert!(!language_codes_match("hi", BENGALI));
    assert!(!language_codes_match("invalid", ENGLISH));
}

/// Test language name lookup
#[test]
fn test_get_language_name_withValidCodes_shouldReturnEnglishName() -> Result<()> {
    assert_eq!(get_language_name("bn")?, "Bengali");
    assert_eq!(get_language_name("eng")?, "English");
    assert!(get_language_name("zz").is_err());
    Ok(())
}
