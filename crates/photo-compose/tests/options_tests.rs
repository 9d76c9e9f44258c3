use photo_compose::*;
use std::path::PathBuf;

#[test]
fn test_letterbox_defaults() {
    let options = LetterboxOptions::default();
    assert!(options.input_files.is_empty());
    assert_eq!(options.ratio, RatioSpec::Original);
    assert_eq!(options.background, Color::WHITE);
}

#[test]
fn test_collage_defaults() {
    let options = CollageOptions::default();
    assert!(options.input_files.is_empty());
    assert_eq!(options.template, LayoutTemplate::SideBySide);
    assert_eq!(options.ratio, RatioSpec::FitAll);
    assert!(options.cell_settings.is_empty());
    assert!(options.dimensions.is_none());
}

#[test]
fn test_letterbox_validate_requires_inputs() {
    let options = LetterboxOptions::default();
    assert!(options.validate().is_err());
}

#[test]
fn test_letterbox_rejects_fit_all() {
    let mut options = LetterboxOptions::default();
    options.input_files.push(PathBuf::from("a.png"));
    options.ratio = RatioSpec::FitAll;
    assert!(options.validate().is_err());
}

#[test]
fn test_collage_rejects_original_ratio() {
    let mut options = CollageOptions::default();
    options.input_files.push(PathBuf::from("a.png"));
    options.input_files.push(PathBuf::from("b.png"));
    options.ratio = RatioSpec::Original;
    assert!(options.validate().is_err());
}

#[test]
fn test_collage_rejects_batch_overflow() {
    let mut options = CollageOptions::default();
    for i in 0..4 {
        options.input_files.push(PathBuf::from(format!("{i}.png")));
    }
    assert!(options.validate().is_err());
}

#[test]
fn test_collage_rejects_nonpositive_zoom() {
    let mut options = CollageOptions::default();
    options.input_files.push(PathBuf::from("a.png"));
    options.input_files.push(PathBuf::from("b.png"));
    options.cell_settings.push(CellSettings {
        zoom: 0.0,
        ..Default::default()
    });
    assert!(options.validate().is_err());

    options.cell_settings[0].zoom = -1.0;
    assert!(options.validate().is_err());

    options.cell_settings[0].zoom = 2.0;
    assert!(options.validate().is_ok());
}

#[test]
fn test_collage_rejects_oversize_dimensions() {
    let mut options = CollageOptions::default();
    options.input_files.push(PathBuf::from("a.png"));
    options.input_files.push(PathBuf::from("b.png"));
    options.dimensions = Some(photo_compose::layout::CanvasPlan::new(2400, 900));
    assert!(options.validate().is_err());

    options.dimensions = Some(photo_compose::layout::CanvasPlan::new(1600, 0));
    assert!(options.validate().is_err());

    options.dimensions = Some(photo_compose::layout::CanvasPlan::new(1600, 900));
    assert!(options.validate().is_ok());
}

#[tokio::test]
async fn test_collage_options_json_roundtrip() {
    use tempfile::NamedTempFile;

    let mut options = CollageOptions::default();
    options.input_files.push(PathBuf::from("a.png"));
    options.input_files.push(PathBuf::from("b.png"));
    options.template = LayoutTemplate::OneLeftTwoRight;
    options.ratio = RatioSpec::Fixed {
        width: 4,
        height: 3,
    };
    options.background = Color::from_hex("#336699").unwrap();
    options.cell_settings.push(CellSettings {
        zoom: 1.5,
        offset_x: -20.0,
        offset_y: 8.0,
    });

    let temp = NamedTempFile::new().unwrap();
    options.save(temp.path()).await.unwrap();

    let loaded = CollageOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_letterbox_options_json_roundtrip() {
    use tempfile::NamedTempFile;

    let mut options = LetterboxOptions::default();
    options.input_files.push(PathBuf::from("photo.jpg"));
    options.ratio = RatioSpec::Fixed {
        width: 1,
        height: 1,
    };
    options.background = Color::BLACK;

    let temp = NamedTempFile::new().unwrap();
    options.save(temp.path()).await.unwrap();

    let loaded = LetterboxOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded, options);
}
