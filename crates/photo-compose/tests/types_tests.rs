use photo_compose::*;

#[test]
fn test_ratio_parse() {
    assert_eq!(RatioSpec::parse("original").unwrap(), RatioSpec::Original);
    assert_eq!(RatioSpec::parse("fit-all").unwrap(), RatioSpec::FitAll);
    assert_eq!(RatioSpec::parse("fitall").unwrap(), RatioSpec::FitAll);
    assert_eq!(
        RatioSpec::parse("16:9").unwrap(),
        RatioSpec::Fixed {
            width: 16,
            height: 9
        }
    );
    assert_eq!(
        RatioSpec::parse("4:5").unwrap(),
        RatioSpec::Fixed {
            width: 4,
            height: 5
        }
    );

    assert!(RatioSpec::parse("").is_err());
    assert!(RatioSpec::parse("16x9").is_err());
    assert!(RatioSpec::parse("0:9").is_err());
    assert!(RatioSpec::parse("16:0").is_err());
    assert!(RatioSpec::parse("a:b").is_err());
}

#[test]
fn test_ratio_target() {
    assert_eq!(RatioSpec::Original.target_ratio(), None);
    assert_eq!(RatioSpec::FitAll.target_ratio(), None);
    let ratio = RatioSpec::Fixed {
        width: 16,
        height: 9,
    };
    assert!((ratio.target_ratio().unwrap() - 16.0 / 9.0).abs() < 1e-12);
}

#[test]
fn test_ratio_param_roundtrip() {
    for s in ["original", "fit-all", "3:2", "9:16"] {
        let ratio = RatioSpec::parse(s).unwrap();
        assert_eq!(ratio.as_param(), s);
    }
}

#[test]
fn test_template_image_counts() {
    assert_eq!(LayoutTemplate::SideBySide.image_count(), 2);
    assert_eq!(LayoutTemplate::TopBottom.image_count(), 2);
    assert_eq!(LayoutTemplate::ThreeRow.image_count(), 3);
    assert_eq!(LayoutTemplate::ThreeColumn.image_count(), 3);
    assert_eq!(LayoutTemplate::OneLeftTwoRight.image_count(), 3);
    assert_eq!(LayoutTemplate::TwoLeftOneRight.image_count(), 3);
}

#[test]
fn test_template_param_roundtrip() {
    for template in [
        LayoutTemplate::SideBySide,
        LayoutTemplate::TopBottom,
        LayoutTemplate::ThreeRow,
        LayoutTemplate::ThreeColumn,
        LayoutTemplate::OneLeftTwoRight,
        LayoutTemplate::TwoLeftOneRight,
    ] {
        assert_eq!(LayoutTemplate::parse(template.as_param()).unwrap(), template);
    }

    assert!(LayoutTemplate::parse("grid").is_err());
}

#[test]
fn test_color_from_hex() {
    assert_eq!(
        Color::from_hex("#ff8000").unwrap(),
        Color {
            r: 255,
            g: 128,
            b: 0
        }
    );
    assert_eq!(Color::from_hex("ffffff").unwrap(), Color::WHITE);
    assert_eq!(Color::from_hex("#000000").unwrap(), Color::BLACK);

    assert!(Color::from_hex("#fff").is_err());
    assert!(Color::from_hex("#zzzzzz").is_err());
    assert!(Color::from_hex("").is_err());
}

#[test]
fn test_color_hex_roundtrip() {
    let color = Color {
        r: 18,
        g: 52,
        b: 86,
    };
    assert_eq!(Color::from_hex(&color.to_hex()).unwrap(), color);
}

#[test]
fn test_cell_settings_default() {
    let settings = CellSettings::default();
    assert_eq!(settings.zoom, 1.0);
    assert_eq!(settings.offset_x, 0.0);
    assert_eq!(settings.offset_y, 0.0);
}
