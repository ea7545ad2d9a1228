//! End-to-end tests: render, OCR, classify, reconcile, group.

use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use patsplit::error::{Error, Result};
use patsplit::{
    analyze_file, ClassifierOptions, JsonFormat, MatchAlgorithm, OcrEngine, OcrLine, PageImage,
    PageRenderer, PatentAnalyzer, SectionType,
};

/// Header lines per page; `None` makes OCR fail on that page.
type Script = Arc<Vec<Option<Vec<&'static str>>>>;

/// Mock renderer that stamps the page index into the first pixel.
struct MockRenderer {
    script: Script,
}

impl PageRenderer for MockRenderer {
    fn page_count(&self) -> usize {
        self.script.len()
    }

    fn render_page(&self, index: usize, _scale: f32) -> Result<PageImage> {
        let mut image = PageImage::blank(10, 100, 1);
        image.data[0] = index as u8;
        Ok(image)
    }
}

/// Mock OCR engine that reads back the scripted header of a page.
struct MockOcr {
    script: Script,
    delay: Option<Duration>,
}

impl OcrEngine for MockOcr {
    fn recognize(&self, image: &PageImage) -> Result<Vec<OcrLine>> {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        match &self.script[image.data[0] as usize] {
            Some(lines) => Ok(lines.iter().map(|text| OcrLine::text(*text)).collect()),
            None => Err(Error::Ocr("engine crashed".to_string())),
        }
    }
}

fn mocks(script: Script) -> (Arc<dyn PageRenderer>, Arc<dyn OcrEngine>) {
    let renderer = Arc::new(MockRenderer {
        script: Arc::clone(&script),
    });
    let ocr = Arc::new(MockOcr {
        script,
        delay: None,
    });
    (renderer, ocr)
}

fn sample_patent() -> Script {
    Arc::new(vec![
        Some(vec!["国家知识产权局"]),
        Some(vec!["权利要求书", "1/2页"]),
        Some(vec!["权利要求书", "2/2页"]),
        None,
        Some(vec!["说明书", "1/3页"]),
        Some(vec!["说明书", "2/3页"]),
        Some(vec!["权利要求书"]),
        Some(vec!["说明书", "3/3页"]),
        Some(vec!["说明书附图", "1/2页"]),
        Some(vec!["附图2"]),
    ])
}

#[test]
fn test_full_pipeline_both_algorithms() {
    use SectionType::*;

    for algorithm in [MatchAlgorithm::Positional, MatchAlgorithm::Fuzzy] {
        let (renderer, ocr) = mocks(sample_patent());
        let analyzer =
            PatentAnalyzer::new(ClassifierOptions::new().with_algorithm(algorithm)).unwrap();
        let report = analyzer.analyze(renderer, ocr).unwrap();

        assert_eq!(
            report.raw_labels,
            vec![
                Front,
                Claims,
                Claims,
                Unknown,
                Descriptions,
                Descriptions,
                Claims,
                Descriptions,
                Drawings,
                Drawings,
            ],
            "{}",
            algorithm
        );
        assert_eq!(report.algorithm, algorithm);
        assert_eq!(report.sections.front, vec![0]);
        assert_eq!(report.sections.claims, vec![1, 2, 3]);
        assert_eq!(report.sections.descriptions, vec![4, 5, 6, 7]);
        assert_eq!(report.sections.drawings, vec![8, 9]);
        assert_eq!(report.summary.isolated_page_corrections, 1);
        assert_eq!(report.summary.unknown_resolutions, 1);
        assert_eq!(report.ocr_failures(), vec![3]);
        assert!(report.missing_sections().is_empty());
        assert!(!report.degenerate);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let (renderer, ocr) = mocks(sample_patent());
    let sequential = PatentAnalyzer::new(ClassifierOptions::new())
        .unwrap()
        .analyze(Arc::clone(&renderer), Arc::clone(&ocr))
        .unwrap();
    let parallel = PatentAnalyzer::new(ClassifierOptions::new().with_parallel(true))
        .unwrap()
        .analyze(renderer, ocr)
        .unwrap();

    assert_eq!(parallel.raw_labels, sequential.raw_labels);
    assert_eq!(parallel.labels, sequential.labels);
    assert_eq!(parallel.sections, sequential.sections);
    for (index, page) in parallel.pages.iter().enumerate() {
        assert_eq!(page.page.index, index);
    }
}

#[test]
fn test_continuity_disabled_keeps_isolated_page() {
    let (renderer, ocr) = mocks(sample_patent());
    let report = PatentAnalyzer::new(ClassifierOptions::new().with_continuity(false))
        .unwrap()
        .analyze(renderer, ocr)
        .unwrap();

    // Still reported, just not applied
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].page_index(), 6);
    assert_eq!(report.sections.claims, vec![1, 2, 3, 6]);
    assert_eq!(report.summary.isolated_page_corrections, 0);
}

#[test]
fn test_ocr_timeout_yields_unknown_pages() {
    let script: Script = Arc::new(vec![Some(vec!["权利要求书"]), Some(vec!["说明书"])]);
    let renderer = Arc::new(MockRenderer {
        script: Arc::clone(&script),
    });
    let ocr = Arc::new(MockOcr {
        script,
        delay: Some(Duration::from_millis(300)),
    });

    let report = PatentAnalyzer::new(ClassifierOptions::new().with_ocr_timeout_ms(20))
        .unwrap()
        .analyze(renderer, ocr)
        .unwrap();

    assert!(report.degenerate);
    assert_eq!(report.ocr_failures(), vec![0, 1]);
    assert_eq!(report.sections.front, vec![0, 1]);
    assert!(report.pages[0]
        .ocr_error
        .as_deref()
        .unwrap()
        .contains("timed out"));
    assert!(report.pages[1]
        .ocr_error
        .as_deref()
        .unwrap()
        .contains("stalled"));
}

#[test]
fn test_invalid_options_fail_before_any_page() {
    assert!(PatentAnalyzer::new(ClassifierOptions::new().with_header_ratio(0.0)).is_err());
    assert!(PatentAnalyzer::new(ClassifierOptions::new().with_correction_threshold(1.5)).is_err());

    let err = "v4".parse::<MatchAlgorithm>().unwrap_err();
    assert!(matches!(err, Error::UnsupportedAlgorithm(_)));
    assert!(serde_json::from_str::<ClassifierOptions>(r#"{"algorithm": "v1"}"#).is_err());
}

#[test]
fn test_analyze_file_from_header_dump() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"pages": [["国家知识产权局"], ["权利要求书", "1/1页"], [], ["说明书"], ["说明书附图"]]}}"#
    )
    .unwrap();

    let report = analyze_file(file.path(), ClassifierOptions::default()).unwrap();
    assert_eq!(report.page_count, 5);
    assert_eq!(report.sections.claims, vec![1, 2]);

    let plan = report.split_plan();
    assert_eq!(plan.len(), 4);
    assert_eq!(plan[1].file_name, "claims.pdf");
    assert_eq!(plan[1].page_numbers(), vec![2, 3]);

    let json = report.to_json(JsonFormat::Compact).unwrap();
    assert!(json.contains(r#""claims":[1,2]"#));
}

#[test]
fn test_analyze_file_bare_array_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("headers.json");
    std::fs::write(&path, r#"[["权利要求书"], ["权利要求书"]]"#).unwrap();

    let report = analyze_file(&path, ClassifierOptions::default()).unwrap();
    assert_eq!(report.sections.claims, vec![0, 1]);
    assert_eq!(
        report.missing_sections(),
        vec![
            SectionType::Front,
            SectionType::Descriptions,
            SectionType::Drawings
        ]
    );

    let missing = analyze_file(dir.path().join("nope.json"), ClassifierOptions::default());
    assert!(matches!(missing, Err(Error::Io(_))));
}
