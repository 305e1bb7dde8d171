//! Unit tests for repository identity and credential handling.


use rstest::rstest;

use super::{ForgeError, PersonalAccessToken};

#[rstest]
#[case::empty("")]
#[case::whitespace("   \n")]
fn rejects_blank_token(#[case] token: &str) {
    let result = PersonalAccessToken::new(token);
    assert!(
        matches!(result, Err(ForgeError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}

#[rstest]
fn trims_token_whitespace() {
    let token = PersonalAccessToken::new("  ghp_example\n").expect("token should be valid");
    assert_eq!(token.value(), "ghp_example", "token should be trimmed");
}
