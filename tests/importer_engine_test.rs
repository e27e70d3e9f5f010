// ==========================================
// 供应商问卷系统 - QuestionImporter 集成测试
// ==========================================
// 覆盖: 典型端到端场景、结构性错误、建议汇总、分区沿用
// ==========================================


use questionnaire_import::domain::{FileUnderstanding, QuestionType, Section, Tag};
use questionnaire_import::importer::{
    CancellationToken, ImportError, ImportFile, NoopProgress, QuestionImporter,
};
use std::sync::Mutex;

// ==========================================
// 辅助函数
// ==========================================
fn csv(content: &str) -> ImportFile {
    ImportFile::new("questions.csv", content.as_bytes().to_vec())
}

fn tag(id: &str, name: &str) -> Tag {
    Tag {
        id: id.to_string(),
        name: name.to_string(),
        color: "#D97706".to_string(),
        description: None,
    }
}

fn section(id: &str, name: &str, order: i64) -> Section {
    Section {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        order,
    }
}

fn known_catalog() -> (Vec<Tag>, Vec<Section>) {
    (
        vec![tag("t-quality", "Quality"), tag("t-ops", "Operations"), tag("t-process", "Process")],
        vec![
            section("s-qm", "Quality Management", 0),
            section("s-log", "Logistics", 1),
        ],
    )
}

// ==========================================
// 端到端场景
// ==========================================

#[test]
fn test_question_only_header() {
    let outcome = QuestionImporter::new()
        .import(&csv("Question\nIs X?\nIs Y?\n"), &[], &[], &NoopProgress, None)
        .unwrap();

    assert_eq!(outcome.questions.len(), 2);
    for q in &outcome.questions {
        assert_eq!(q.question_type, QuestionType::Text);
        assert!(q.required);
        assert!(q.tags.is_empty());
        assert!(q.section_id.is_none());
    }
}

#[test]
fn test_multiple_choice_without_options_fails_run() {
    let err = QuestionImporter::new()
        .import(
            &csv("Question,Type,Options\nPick one,Multiple Choice,\n"),
            &[],
            &[],
            &NoopProgress,
            None,
        )
        .unwrap_err();

    assert!(err
        .to_string()
        .contains("Row 1: Multiple choice question requires options"));
    assert!(!err.is_structural());
}

#[test]
fn test_unknown_tag_fails_run_without_row_errors() {
    let tags = vec![tag("t1", "Existing")];
    let err = QuestionImporter::new()
        .import(
            &csv("Question,Tags\nIs X?,\"Existing, BrandNew\"\n"),
            &tags,
            &[],
            &NoopProgress,
            None,
        )
        .unwrap_err();

    assert!(err.to_string().contains("potential new tags: BrandNew"));
    assert_eq!(
        err.issues(),
        &["Note: Found potential new tags: BrandNew. Consider creating these tags first.".to_string()]
    );
}

#[test]
fn test_zero_byte_file_processes_no_rows() {
    let calls = Mutex::new(0usize);
    let sink = |_p: f64| *calls.lock().unwrap() += 1;

    let err = QuestionImporter::new()
        .import(&csv(""), &[], &[], &sink, None)
        .unwrap_err();

    assert_eq!(err.to_string(), "File is empty");
    assert!(err.is_structural());
    assert_eq!(*calls.lock().unwrap(), 0);
}

// ==========================================
// 完整文件
// ==========================================

#[test]
fn test_full_supplier_questionnaire() {
    let (tags, sections) = known_catalog();

    let outcome = QuestionImporter::new()
        .import(
            &csv(test_helpers::SUPPLIER_QUESTIONNAIRE_CSV),
            &tags,
            &sections,
            &NoopProgress,
            None,
        )
        .unwrap();

    let qs = &outcome.questions;
    assert_eq!(qs.len(), 4);

    assert_eq!(qs[0].question_type, QuestionType::YesNo);
    assert_eq!(qs[0].tags, vec!["t-quality".to_string()]);
    assert_eq!(qs[0].section_id.as_deref(), Some("s-qm"));

    assert_eq!(qs[1].question_type, QuestionType::MultipleChoice);
    assert_eq!(
        qs[1].options,
        Some(vec!["1".to_string(), "2-5".to_string(), "6+".to_string()])
    );

    // 空分区沿用上一行
    assert!(!qs[2].required);
    assert_eq!(qs[2].tags, vec!["t-quality".to_string(), "t-process".to_string()]);
    assert_eq!(qs[2].section_id.as_deref(), Some("s-qm"));

    assert_eq!(qs[3].question_type, QuestionType::Scale);
    assert!(qs[3].required);
    assert_eq!(qs[3].section_id.as_deref(), Some("s-log"));

    let orders: Vec<i64> = qs.iter().map(|q| q.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
    assert_eq!(outcome.summary.total_rows, 4);
    assert_eq!(outcome.summary.accepted, 4);
}

#[test]
fn test_issue_list_lists_row_errors_before_notes() {
    let tags = vec![tag("t1", "Quality")];
    let content = "\
Question,Type,Options,Tags,Section
,text,,,
Pick one,choice,,Quality,
Describe,text,,\"Safety, Safety, Ethics\",Compliance
Rate,scale,,Ethics,Compliance
";

    let err = QuestionImporter::new()
        .import(&csv(content), &tags, &[], &NoopProgress, None)
        .unwrap_err();

    assert_eq!(
        err.issues(),
        &[
            "Row 1: Empty question text".to_string(),
            "Row 2: Multiple choice question requires options".to_string(),
            "Note: Found potential new tags: Safety, Ethics. Consider creating these tags first."
                .to_string(),
            "Note: Found potential new sections: Compliance. Consider creating these sections first."
                .to_string(),
        ]
    );
    assert!(err.to_string().starts_with("Found 4 issues:\n"));
}

#[test]
fn test_all_rows_blank_text_is_reported_as_issues() {
    let err = QuestionImporter::new()
        .import(&csv("Question,Type\n,text\n ,text\n"), &[], &[], &NoopProgress, None)
        .unwrap_err();

    assert!(matches!(err, ImportError::Issues(ref issues) if issues.len() == 2));
}

#[test]
fn test_header_only_file_has_no_data() {
    let err = QuestionImporter::new()
        .import(&csv("Question,Type\n"), &[], &[], &NoopProgress, None)
        .unwrap_err();

    assert_eq!(err.to_string(), "No data found in the file");
}

#[test]
fn test_corrupt_workbook_is_unreadable() {
    let file = ImportFile::new("questions.xlsx", b"definitely not a zip archive".to_vec());
    let err = QuestionImporter::new()
        .import(&file, &[], &[], &NoopProgress, None)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unable to read file. Please ensure it is a valid Excel or CSV file"
    );
}

#[test]
fn test_corrupt_legacy_workbook_is_unreadable() {
    let file = ImportFile::new("questions.XLS", b"not an OLE compound document".to_vec());
    let err = QuestionImporter::new()
        .import(&file, &[], &[], &NoopProgress, None)
        .unwrap_err();

    assert!(matches!(err, ImportError::UnreadableWorkbook(_)));
    assert!(err.is_structural());
}

#[test]
fn test_xlsx_reads_first_sheet_with_typed_cells() {
    let bytes = test_helpers::build_questionnaire_workbook().unwrap();
    let file = ImportFile::new("questionnaire.xlsx", bytes);

    let outcome = QuestionImporter::new()
        .import(&file, &[], &[], &NoopProgress, None)
        .unwrap();

    assert_eq!(outcome.summary.sheet_name.as_deref(), Some("Questions"));
    assert_eq!(outcome.questions.len(), 3);
    assert!(outcome
        .questions
        .iter()
        .all(|q| q.text != "Retired question from last year"));

    // 布尔 FALSE 与数值 0 均视为非必填
    let iso = &outcome.questions[0];
    assert_eq!(iso.question_type, QuestionType::YesNo);
    assert!(!iso.required);

    let delivery = &outcome.questions[1];
    assert_eq!(delivery.question_type, QuestionType::Scale);
    assert!(!delivery.required);

    let sites = &outcome.questions[2];
    assert_eq!(sites.question_type, QuestionType::MultipleChoice);
    assert!(sites.required);
    assert_eq!(
        sites.options,
        Some(vec!["1".to_string(), "2-5".to_string(), "6+".to_string()])
    );
}

#[test]
fn test_unknown_extension_rejected() {
    let file = ImportFile::new("questions.docx", b"Question\nIs X?\n".to_vec());
    let err = QuestionImporter::new()
        .import(&file, &[], &[], &NoopProgress, None)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid file type. Please upload an Excel file (.xlsx, .xls) or CSV file"
    );
}

#[test]
fn test_understanding_mapping_with_custom_headers() {
    let (tags, sections) = known_catalog();
    let understanding: FileUnderstanding = serde_json::from_str(
        r#"{"columnMappings":{"question":"Frage","type":"Art","tags":"Schlagworte","section":"Bereich"}}"#,
    )
    .unwrap();
    let content = "Frage,Art,Schlagworte,Bereich\nGibt es ein QMS?,yes/no,quality,logistics\n";

    let outcome = QuestionImporter::new()
        .import(&csv(content), &tags, &sections, &NoopProgress, Some(&understanding))
        .unwrap();

    let q = &outcome.questions[0];
    assert_eq!(q.question_type, QuestionType::YesNo);
    assert_eq!(q.tags, vec!["t-quality".to_string()]);
    assert_eq!(q.section_id.as_deref(), Some("s-log"));
}

#[test]
fn test_cancellation_stops_import() {
    let token = CancellationToken::new();
    let cancel_token = token.clone();
    let sink = move |p: f64| {
        if p >= 50.0 {
            cancel_token.cancel();
        }
    };

    let err = QuestionImporter::new()
        .with_cancellation(token)
        .import(&csv("Question\nA\nB\nC\nD\n"), &[], &[], &sink, None)
        .unwrap_err();

    assert_eq!(err.to_string(), "Import was cancelled");
}

#[test]
fn test_understanding_matches_header_with_trailing_space() {
    let understanding: FileUnderstanding =
        serde_json::from_str(r#"{"columnMappings":{"question":"Question ","type":"Type"}}"#)
            .unwrap();

    let outcome = QuestionImporter::new()
        .import(
            &csv("Question ,Type\nIs X?,scale\n"),
            &[],
            &[],
            &NoopProgress,
            Some(&understanding),
        )
        .unwrap();

    assert_eq!(outcome.questions[0].text, "Is X?");
    assert_eq!(outcome.questions[0].question_type, QuestionType::Scale);
}
