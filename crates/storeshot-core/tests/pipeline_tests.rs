mod common;

use common::{create_corrupt_image, create_test_image, file_names, init_test_logging, test_config};
use std::fs;
use storeshot_core::{Error, InputSelection, ResizeMode, ScreenshotGenerator, APPLE_SIZES};
use tempfile::tempdir;

#[test]
fn test_process_single_source_fit() {
    init_test_logging();
    let sources = tempdir().unwrap();
    let output = tempdir().unwrap();
    let source = create_test_image(sources.path(), "main.png", 1000, 600);

    let mut config = test_config(output.path(), &[ResizeMode::Fit]);
    config.marketing_copies = false;
    let generator = ScreenshotGenerator::new(config).unwrap();

    let summary = generator
        .run(&InputSelection::Explicit(vec![source]))
        .unwrap();

    assert_eq!(summary.artifacts.len(), 4);
    assert!(summary.failures.is_empty());
    assert!(summary.marketing.is_empty());

    for (artifact, size) in summary.artifacts.iter().zip(APPLE_SIZES) {
        assert_eq!(artifact.size, size);
        assert_eq!(
            artifact.file_name(),
            format!("main_{}x{}_fit.png", size.width, size.height)
        );
        assert_eq!(
            image::image_dimensions(&artifact.path).unwrap(),
            (size.width, size.height)
        );
    }
    assert_eq!(file_names(output.path()).len(), 4);
}

#[test]
fn test_partial_failure_isolation() {
    init_test_logging();
    let dir = tempdir().unwrap();
    let first = create_test_image(dir.path(), "first.png", 320, 200);
    let corrupt = create_corrupt_image(dir.path(), "corrupt.png");
    let second = create_test_image(dir.path(), "second.png", 200, 320);

    let config = test_config(dir.path(), &[ResizeMode::Fill]);
    let generator = ScreenshotGenerator::new(config).unwrap();

    let summary = generator
        .run(&InputSelection::Explicit(vec![first.clone(), corrupt, second.clone()]))
        .unwrap();

    assert_eq!(summary.artifacts.len(), 8);
    assert!(summary
        .artifacts
        .iter()
        .all(|a| a.source == first || a.source == second));
    assert_eq!(summary.failures.len(), 4);
    assert_eq!(summary.marketing.len(), 2);
}

#[test]
fn test_marketing_copy_matches_largest_output() {
    let dir = tempdir().unwrap();
    let source = create_test_image(dir.path(), "home.png", 400, 250);

    let config = test_config(dir.path(), &[ResizeMode::Stretch]);
    let generator = ScreenshotGenerator::new(config).unwrap();
    let summary = generator
        .run(&InputSelection::Explicit(vec![source]))
        .unwrap();

    assert_eq!(summary.marketing.len(), 1);
    let copy = &summary.marketing[0];
    assert_eq!(copy.file_name(), "marketing_home_2880x1800_stretch.png");
    assert_eq!(
        fs::read(&copy.path).unwrap(),
        fs::read(dir.path().join("home_2880x1800_stretch.png")).unwrap()
    );
}

#[test]
fn test_rerun_overwrites_outputs() {
    let dir = tempdir().unwrap();
    let source = create_test_image(dir.path(), "shot.png", 300, 300);
    let config = test_config(dir.path(), &[ResizeMode::Fit, ResizeMode::Fill]);
    let generator = ScreenshotGenerator::new(config).unwrap();
    let selection = InputSelection::Explicit(vec![source]);

    let first = generator.run(&selection).unwrap();
    let names_after_first = file_names(dir.path());
    let second = generator.run(&selection).unwrap();

    assert_eq!(names_after_first, file_names(dir.path()));
    let first_paths: Vec<_> = first.artifacts.iter().map(|a| a.path.clone()).collect();
    let second_paths: Vec<_> = second.artifacts.iter().map(|a| a.path.clone()).collect();
    assert_eq!(first_paths, second_paths);
    // source + 8 outputs + 2 marketing copies
    assert_eq!(names_after_first.len(), 11);
}

#[test]
fn test_discover_skips_previous_outputs() {
    let dir = tempdir().unwrap();
    create_test_image(dir.path(), "screenshot_01.png", 160, 100);
    let config = test_config(dir.path(), &[ResizeMode::Stretch]);
    let generator = ScreenshotGenerator::new(config).unwrap();

    // First run creates outputs next to the source
    let first = generator.run(&InputSelection::Discover).unwrap();
    assert_eq!(first.artifacts.len(), 4);

    // Later runs only pick up the original screenshot again
    let inputs = generator.resolve_inputs(&InputSelection::Discover).unwrap();
    assert_eq!(inputs, vec![dir.path().join("screenshot_01.png")]);
}

#[test]
fn test_explicit_paths_filter_missing() {
    let dir = tempdir().unwrap();
    let present = create_test_image(dir.path(), "present.png", 50, 50);
    let config = test_config(dir.path(), &[ResizeMode::Fit]);
    let generator = ScreenshotGenerator::new(config).unwrap();

    let inputs = generator
        .resolve_inputs(&InputSelection::Explicit(vec![
            dir.path().join("absent.png"),
            present.clone(),
        ]))
        .unwrap();

    assert_eq!(inputs, vec![present]);
}

#[test]
fn test_no_inputs_is_an_error() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path(), &[ResizeMode::Fit]);
    let generator = ScreenshotGenerator::new(config).unwrap();

    let result = generator.run(&InputSelection::Explicit(vec![dir.path().join("absent.png")]));
    assert!(matches!(result, Err(Error::NoInputs(_))));
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn test_capture_failure_surfaces_as_decode_failures() {
    let dir = tempdir().unwrap();
    let mut config = test_config(dir.path(), &[ResizeMode::Fit]);
    config.capture_command = "storeshot-no-such-command".to_string();
    let generator = ScreenshotGenerator::new(config).unwrap();

    let summary = generator
        .run(&InputSelection::Capture { count: 2 })
        .unwrap();

    assert!(summary.artifacts.is_empty());
    assert_eq!(summary.failures.len(), 8);
    assert!(summary
        .failures
        .iter()
        .any(|f| f.output_name == "screenshot_02_2880x1800_fit.png"));
}
