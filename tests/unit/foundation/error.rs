use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(ArwahError::decode("x").to_string().contains("decode error:"));
    assert!(ArwahError::encode("x").to_string().contains("encode error:"));
    assert!(
        ArwahError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ArwahError::busy("x").to_string().contains("render busy:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ArwahError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn io_errors_convert() {
    fn open_missing() -> ArwahResult<Vec<u8>> {
        Ok(std::fs::read("definitely/not/here.png")?)
    }
    let err = open_missing().unwrap_err();
    assert!(matches!(err, ArwahError::Io(_)));
    assert!(!err.is_decode());
}
