use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RelicError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RelicError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(
        RelicError::playback("x")
            .to_string()
            .contains("playback error:")
    );
    assert!(RelicError::assets("x").to_string().contains("assets error:"));
    assert!(
        RelicError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RelicError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
