use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BoothError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(BoothError::decode("x").to_string().contains("decode error:"));
    assert!(
        BoothError::caption_provider("x")
            .to_string()
            .contains("caption provider error:")
    );
    assert!(BoothError::encode("x").to_string().contains("encode error:"));
    assert!(
        BoothError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoothError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
