// ==========================================
// 分析会话 API 集成测试
// ==========================================
// 测试目标: 载入计划 → 执行评估 → 保存 / 回看,以及配置委托
// ==========================================


use schedule_health::api::{AnalysisSession, ApiError};
use schedule_health::config::{CategoryPatch, CriterionPatch, GlobalThresholds};
use schedule_health::domain::sample_schedule_data;
use schedule_health::i18n::t;
use schedule_health::importer::UniversalScheduleParser;
use test_helpers::{fixed_time, SAMPLE_PROJECT_XML, SAMPLE_XER};

fn session() -> AnalysisSession {
    AnalysisSession::new().with_parser(UniversalScheduleParser::new().with_fallback_time(fixed_time()))
}

#[test]
fn test_load_xer_and_analyze() {
    let mut session = session();
    let data = session.load_file(SAMPLE_XER, "plan.xer").expect("Failed to load XER");
    assert_eq!(data.activities.len(), 3);

    let analysis = session.run_analysis(Some("XER plan"));
    assert_eq!(analysis.name, "XER plan");
    assert_eq!(analysis.summary.total_activities, 3);
    assert_eq!(analysis.summary.total_relationships, 2);
    assert_eq!(analysis.summary.critical_activities, 2);
    assert_eq!(analysis.summary.activities_with_relationships, 3);
    assert_eq!(session.current_analysis().map(|a| a.id.as_str()), Some(analysis.id.as_str()));
}

#[test]
fn test_load_project_xml_replaces_schedule() {
    let mut session = session();
    session.load_file(SAMPLE_PROJECT_XML, "plan.xml").expect("Failed to load XML");
    assert_eq!(session.schedule_data().activities.len(), 3);
    assert_eq!(session.schedule_data().activities[0].id, "1");
}

#[test]
fn test_load_bytes_with_bom() {
    let mut session = session();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(SAMPLE_XER.as_bytes());
    let data = session.load_bytes(&bytes, "plan.xer").expect("Failed to load bytes");
    assert_eq!(data.activities[0].id, "T1");
}

#[test]
fn test_failed_parse_keeps_loaded_schedule() {
    let mut session = session();
    session.load_file(SAMPLE_XER, "plan.xer").unwrap();
    let loaded = session.schedule_data().clone();

    let err = session.load_file("<Project><Tasks>", "broken.xml").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(session.schedule_data(), &loaded);

    let err = session.load_bytes(&[0xFF, 0xFE, 0x00], "plan.xer").unwrap_err();
    assert!(matches!(err, ApiError::Import(_)));
    assert_eq!(session.schedule_data(), &loaded);
}

#[test]
fn test_blank_name_uses_default_name() {
    let mut session = session();
    let unnamed = session.run_analysis(None);
    let blank = session.run_analysis(Some("   "));
    assert_eq!(unnamed.name, t("analysis.default_name"));
    assert_eq!(blank.name, unnamed.name);
    assert_ne!(unnamed.id, blank.id);
}

#[test]
fn test_stats_cover_every_default_criterion() {
    let mut session = session();
    assert!(session.stats().is_none());

    session.run_analysis(Some("demo"));
    let stats = session.stats().unwrap();
    assert_eq!(stats.total_checks, 23);
    assert_eq!(
        stats.total_ok + stats.total_warnings + stats.total_critical,
        stats.total_checks
    );
}

#[test]
fn test_saved_analyses_and_recent_list() {
    let mut session = session();
    let demo = session.run_analysis(Some("demo"));
    session.save_current().unwrap();
    // 重复保存同一评估,最近列表按 id 去重
    session.save_current().unwrap();

    session.load_file(SAMPLE_XER, "plan.xer").unwrap();
    let xer = session.run_analysis(Some("xer"));

    assert_eq!(session.saved_analyses().len(), 2);
    let recent = session.recent_analyses(10);
    let ids: Vec<&str> = recent.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec![xer.id.as_str(), demo.id.as_str()]);
}

#[test]
fn test_config_changes_apply_to_next_run() {
    let mut session = session();
    let before = session.run_analysis(Some("before"));
    assert!(before.category("logic").is_some());

    session.update_category("logic", &CategoryPatch::enabled(false));
    session.update_criterion("lags", "negative_lag", &CriterionPatch::enabled(false));
    let after = session.run_analysis(Some("after"));
    assert!(after.category("logic").is_none());
    assert!(after.find_result("negative_lag").is_none());
    assert!(after.find_result("excessive_lag").is_some());

    // 已生成的评估不随配置变化
    assert!(before.find_result("negative_lag").is_some());

    session.reset_config();
    let reset = session.run_analysis(Some("reset"));
    assert_eq!(reset.category_results, before.category_results);
}

#[test]
fn test_global_thresholds_drive_status() {
    let mut session = session();
    session.set_global_thresholds(GlobalThresholds {
        excellent: 0.0,
        good: 0.0,
        fair: 0.0,
    });
    let analysis = session.run_analysis(Some("lenient"));
    assert_eq!(analysis.status.to_string(), "excellent");
}

#[test]
fn test_config_export_import_through_session() {
    let mut session = session();
    session.update_category("constraints", &CategoryPatch::weight(55));
    let exported = session.export_config().unwrap();

    let mut other = AnalysisSession::new();
    assert!(other.import_config(&exported));
    assert_eq!(other.config(), session.config());

    let err = other.try_import_config("{").unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));
    assert_eq!(other.config().category("constraints").map(|c| c.weight), Some(55));
}

#[test]
fn test_new_session_uses_sample_schedule() {
    let session = AnalysisSession::default();
    assert_eq!(session.schedule_data(), &sample_schedule_data());
}
