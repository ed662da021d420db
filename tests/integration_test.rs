//! Integration tests for the public palette engine API
//!
//! These tests exercise the engine end to end through the crate root:
//! - Color conversion and hex round trips
//! - Extraction from synthesised images
//! - Harmony generation and analysis scenarios
//! - Optimizer non-regression
//! - Error handling for invalid input

use std::sync::Arc;

use chroma_palette::{
    analyze_palette, extract_prominent_colors, extract_random_colors, generate_harmonized_palette,
    generate_palette, optimize_palette, Color, ColorPalette, EngineConfig, ExtractionMode,
    HarmonyType, IssueSeverity, PaletteEngine, PaletteError, PalettePurpose, PaletteStyle,
    PixelBuffer, Region,
};

fn checkerboard() -> PixelBuffer {
    // 2x2: red, green, blue, yellow
    PixelBuffer::new(
        2,
        2,
        vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 0, 255,
        ],
    )
    .unwrap()
}

/// 10x10 image, left 6 columns orange, right 4 columns navy
fn two_tone() -> PixelBuffer {
    let orange = Color::from_hex("#E67E22").unwrap();
    let navy = Color::from_hex("#1F3A93").unwrap();
    let colors: Vec<Color> = (0..100)
        .map(|i| if i % 10 < 6 { orange } else { navy })
        .collect();
    PixelBuffer::from_colors(10, 10, &colors).unwrap()
}

// ============================================================================
// Color Model Properties
// ============================================================================

#[test]
fn test_hsl_round_trip_grid() {
    for r in (0..=255).step_by(51) {
        for g in (0..=255).step_by(51) {
            for b in (0..=255).step_by(17) {
                let color = Color::from_rgba8(r as u8, g as u8, b as u8, 255);
                let hsl = color.to_hsl();
                let back = Color::from_hsl(hsl.hue, hsl.saturation, hsl.lightness);
                assert!((color.red() - back.red()).abs() <= 1.0 / 255.0);
                assert!((color.green() - back.green()).abs() <= 1.0 / 255.0);
                assert!((color.blue() - back.blue()).abs() <= 1.0 / 255.0);
            }
        }
    }
}

#[test]
fn test_hex_idempotence() {
    for hex in ["#000000", "#FFFFFF", "#3366CC", "#a1b2c3", "#0F0f0F", "#7fff00"] {
        let color = Color::from_hex(hex).unwrap();
        assert_eq!(color.to_hex(), hex.to_uppercase());
    }
}

#[test]
fn test_contrast_symmetry_and_bounds() {
    let samples = ["#000000", "#FFFFFF", "#3366CC", "#CC9933", "#808080", "#F5F5F5"];
    let colors: Vec<Color> = samples.iter().map(|h| Color::from_hex(h).unwrap()).collect();
    for a in &colors {
        assert!((a.contrast_ratio(a) - 1.0).abs() < 1e-6);
        for b in &colors {
            assert_eq!(a.contrast_ratio(b), b.contrast_ratio(a));
            let ratio = a.contrast_ratio(b);
            assert!((1.0..=21.0).contains(&ratio));
        }
    }
    assert!((Color::BLACK.contrast_ratio(&Color::WHITE) - 21.0).abs() < 1e-3);
}

#[test]
fn test_color_crosses_boundary_as_tuple() {
    let color: Color = (0.2, 0.4, 0.8, 0.5).into();
    let tuple: (f32, f32, f32, f32) = color.into();
    assert_eq!(tuple, (0.2, 0.4, 0.8, 0.5));

    // out-of-range floats are clamped, never rejected
    let noisy = Color::rgba(1.0000001, -0.0000001, 0.5, 1.2);
    assert_eq!(noisy.red(), 1.0);
    assert_eq!(noisy.green(), 0.0);
    assert_eq!(noisy.alpha(), 1.0);
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_random_extraction_beyond_pixel_count() {
    let colors = extract_random_colors(&checkerboard(), 6, false).unwrap();
    assert_eq!(colors.len(), 6);

    // the first four draws cover every pixel exactly once
    let mut first: Vec<String> = colors[..4].iter().map(Color::to_hex).collect();
    first.sort();
    assert_eq!(first, vec!["#0000FF", "#00FF00", "#FF0000", "#FFFF00"]);
}

#[test]
fn test_random_extraction_is_reproducible() {
    let image = two_tone();
    let first = extract_random_colors(&image, 5, true).unwrap();
    let second = extract_random_colors(&image, 5, true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_prominent_extraction_ranks_by_frequency() {
    let colors = extract_prominent_colors(&two_tone(), None, 2, false).unwrap();
    assert_eq!(colors[0].to_hex(), "#E67E22");
    assert_eq!(colors[1].to_hex(), "#1F3A93");
}

#[test]
fn test_prominent_extraction_in_region() {
    // right 4 columns are navy only
    let region = Region::new(6, 0, 4, 10);
    let colors = extract_prominent_colors(&two_tone(), Some(region), 3, false).unwrap();
    assert_eq!(colors.len(), 3);
    assert!(colors.iter().all(|c| c.to_hex() == "#1F3A93"));
}

#[test]
fn test_background_extraction() {
    let engine = PaletteEngine::new();
    let image = Arc::new(two_tone());
    let first = engine.spawn_extraction(image.clone(), ExtractionMode::Dominant, None, 2, false);
    let second = engine.spawn_extraction(image, ExtractionMode::Random, None, 4, false);
    assert!(second.id() > first.id());

    assert_eq!(first.wait().unwrap().len(), 2);
    assert_eq!(second.wait().unwrap().len(), 4);
}

// ============================================================================
// Generation and Analysis Scenarios
// ============================================================================

#[test]
fn test_complementary_blue_scenario() {
    let base = Color::from_hex("#3366CC").unwrap();
    let palette = PaletteEngine::new()
        .generate_harmony(&base, HarmonyType::Complementary, 2)
        .unwrap();
    assert_eq!(palette.hex_codes(), vec!["#3366CC", "#CC9933"]);

    let analysis = analyze_palette(&palette);
    let expected = palette.colors()[0].contrast_ratio(&palette.colors()[1]);
    assert!((analysis.max_contrast_ratio - expected).abs() < 1e-6);
    assert!(analysis.harmony_score >= 90.0);
}

#[test]
fn test_near_identical_lights_scenario() {
    let palette = ColorPalette::from_hex("pale", &["#FFFFFF", "#F5F5F5"]).unwrap();
    let analysis = analyze_palette(&palette);
    assert!(analysis.max_contrast_ratio < 1.2);
    assert!(!analysis.accessibility_issues.is_empty());
    assert!(analysis.has_severe_issues());
    assert_eq!(analysis.accessibility_issues[0].severity, IssueSeverity::Severe);
}

#[test]
fn test_single_color_analysis() {
    let palette = ColorPalette::from_hex("solo", &["#3366CC"]).unwrap();
    let analysis = analyze_palette(&palette);
    assert_eq!(analysis.max_contrast_ratio, 1.0);
    assert!(analysis.accessibility_issues.is_empty());
    assert_eq!(analysis.harmony_score, 100.0);
}

#[test]
fn test_harmonized_palette_is_deterministic() {
    for hex in ["#3366CC", "#808080", "#E67E22", "#F0E0D0"] {
        let base = Color::from_hex(hex).unwrap();
        let first = generate_harmonized_palette(&base).unwrap();
        let second = generate_harmonized_palette(&base).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.0.len(), 5);
    }
}

#[test]
fn test_generate_palette_from_image() {
    let image = two_tone();
    for style in PaletteStyle::ALL {
        let palette = generate_palette(&image, style, 5).unwrap();
        assert_eq!(palette.len(), 5);
    }
    let triadic = generate_palette(&image, PaletteStyle::Triadic, 3).unwrap();
    assert_eq!(triadic.colors()[0].to_hex(), "#E67E22");
}

// ============================================================================
// Optimization
// ============================================================================

#[test]
fn test_optimizer_non_regression() {
    let engine = PaletteEngine::new();
    let palettes = [
        ColorPalette::from_hex("pale", &["#FFFFFF", "#F5F5F5"]).unwrap(),
        ColorPalette::from_hex("mixed", &["#3366CC", "#CC9933", "#6688DD", "#DDEEFF"]).unwrap(),
        ColorPalette::from_hex("muted", &["#8A8F99", "#99958A", "#8A998F"]).unwrap(),
    ];
    for palette in &palettes {
        for purpose in PalettePurpose::ALL {
            let once = optimize_palette(palette, purpose);
            let twice = optimize_palette(&once, purpose);
            assert_eq!(once.len(), palette.len());
            assert!(engine.purpose_score(&twice, purpose) >= engine.purpose_score(&once, purpose));
            assert!(engine.purpose_score(&once, purpose) >= engine.purpose_score(palette, purpose));
        }
    }
}

#[test]
fn test_accessible_optimization_reanalyzed() {
    let engine = PaletteEngine::new();
    let palette = ColorPalette::from_hex("blues", &["#3366CC", "#5577DD", "#7799EE"]).unwrap();
    let before = engine.analyze_palette(&palette);
    let (optimized, after) = engine.analyze_optimized(&palette, PalettePurpose::Accessible);
    assert_eq!(optimized.len(), 3);
    assert!(after.accessibility_issues.len() <= before.accessibility_issues.len());
    assert!(after.max_contrast_ratio > before.max_contrast_ratio);
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_malformed_hex() {
    for bad in ["", "#", "#12", "#12345", "#GGGGGG", "3366CCX", "#1234567"] {
        assert!(
            matches!(Color::from_hex(bad), Err(PaletteError::InvalidFormat { .. })),
            "accepted {:?}",
            bad
        );
    }
}

#[test]
fn test_empty_image() {
    assert!(matches!(
        PixelBuffer::new(0, 10, vec![]),
        Err(PaletteError::EmptyInput { .. })
    ));
}

#[test]
fn test_zero_count() {
    let image = checkerboard();
    assert!(matches!(
        extract_random_colors(&image, 0, false),
        Err(PaletteError::InvalidCount { .. })
    ));
    assert!(matches!(
        extract_prominent_colors(&image, None, 0, false),
        Err(PaletteError::InvalidCount { .. })
    ));
    assert!(matches!(
        generate_palette(&image, PaletteStyle::Adaptive, 0),
        Err(PaletteError::InvalidCount { .. })
    ));
}

#[test]
fn test_region_outside_image() {
    let result = extract_prominent_colors(&checkerboard(), Some(Region::new(5, 5, 2, 2)), 1, false);
    assert!(matches!(result, Err(PaletteError::InvalidRegion { .. })));
}

#[test]
fn test_empty_palette() {
    assert!(matches!(
        ColorPalette::new("none", vec![]),
        Err(PaletteError::EmptyInput { .. })
    ));
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = EngineConfig::default();
    config.optimization.lightness_step = 0.0;
    assert!(matches!(
        PaletteEngine::with_config(config),
        Err(PaletteError::InvalidParameter { .. })
    ));
}
