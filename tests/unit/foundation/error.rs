use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DepthwireError::missing_input("depth map", "/tmp/x_depth.jpg")
            .to_string()
            .contains("missing input: depth map")
    );
    assert!(
        DepthwireError::degenerate_input("x")
            .to_string()
            .contains("degenerate input:")
    );
    assert!(
        DepthwireError::precursor_missing("x")
            .to_string()
            .contains("precursor missing:")
    );
    assert!(
        DepthwireError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        DepthwireError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn missing_input_names_the_path() {
    let err = DepthwireError::missing_input("frame image", "base/frames/frame_001.jpg");
    assert!(err.to_string().contains("base/frames/frame_001.jpg"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DepthwireError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
