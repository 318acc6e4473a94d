use std::error::Error;

use vocabmaster::error;
use vocabmaster::VocabError;

#[test]
fn test_user_friendly_messages() {
    let msg = error::user_friendly_message(&VocabError::SourceNotFound("ghosts.json".into()));
    assert!(msg.contains("ghosts.json"));

    let msg = error::user_friendly_message(&VocabError::ParseFailure("line 1".into()));
    assert!(msg.contains("import"));

    let msg = error::user_friendly_message(&VocabError::PersistenceError("disk full".into()));
    assert!(msg.contains("saved words"));

    let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert_eq!(
        error::user_friendly_message(&VocabError::IoError(not_found)),
        "File not found."
    );

    // Everything else falls back to Display
    let transition = VocabError::InvalidTransition("category selection on Home".into());
    assert_eq!(error::user_friendly_message(&transition), transition.to_string());
}

#[test]
fn test_only_terminal_errors_are_fatal() {
    assert!(!error::is_recoverable(&VocabError::TuiError("lost tty".into())));
    assert!(error::is_recoverable(&VocabError::ReferentialMismatch("x".into())));
    assert!(error::is_recoverable(&VocabError::SpeechUnavailable("no espeak".into())));
    assert!(error::is_recoverable(&VocabError::ConfigError("bad".into())));
}

#[test]
fn test_conversions_and_source() {
    let io: VocabError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
    assert!(io.source().is_some());

    let json: VocabError = serde_json::from_str::<Vec<u8>>("[").unwrap_err().into();
    assert!(matches!(json, VocabError::ParseFailure(_)));
    assert!(json.source().is_none());

    let toml: VocabError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
    assert!(matches!(toml, VocabError::ConfigError(_)));
}
