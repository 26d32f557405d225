// ==========================================
// 进度计划健康度评估 - 命令行入口
// ==========================================
// 子命令: analyze / demo / config default / criteria
// 输出: 文本报告或 JSON
// ==========================================

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use schedule_health::config::{default_config, default_config_path, ConfigStore, CONFIG_PATH_ENV};
use schedule_health::domain::ScheduleAnalysis;
use schedule_health::engine::CriterionId;
use schedule_health::i18n::{self, t, t_with_args};
use schedule_health::importer::{ScheduleImporter, ScheduleImporterImpl};
use schedule_health::{logging, AnalysisSession};
use std::path::{Path, PathBuf};

/// Schedule Health - 进度计划健康度评估
#[derive(Parser, Debug)]
#[command(name = "schedule-health", version, about = "Schedule health scoring for XER and Project XML exports")]
struct Cli {
    /// Config file (default: <config dir>/schedule-health/config.json)
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Message language: en, es, zh-CN
    #[arg(long, global = true, default_value = "en", value_parser = ["en", "es", "zh-CN"])]
    locale: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one or more schedule files (.xer / .xml)
    Analyze {
        /// Schedule files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Analysis name (default: file name)
        #[arg(long)]
        name: Option<String>,

        /// Print JSON instead of a text report
        #[arg(long)]
        json: bool,
    },

    /// Analyze the built-in sample schedule
    Demo {
        #[arg(long)]
        json: bool,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List registered criteria
    Criteria,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the built-in default configuration
    Default,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    i18n::set_locale(&cli.locale);

    match cli.command {
        Commands::Analyze { files, name, json } => {
            let store = load_store(cli.config.as_deref())?;
            analyze_files(store, files, name, json).await
        }
        Commands::Demo { json } => {
            let store = load_store(cli.config.as_deref())?;
            let mut session = AnalysisSession::with_config(store);
            session.load_demo();
            let analysis = session.run_analysis(None);
            print_analysis(&analysis, json)
        }
        Commands::Config { action } => match action {
            ConfigAction::Default => {
                let json = serde_json::to_string_pretty(&default_config())
                    .context("序列化默认配置失败")?;
                println!("{}", json);
                Ok(())
            }
        },
        Commands::Criteria => {
            print_criteria();
            Ok(())
        }
    }
}

fn load_store(path: Option<&Path>) -> Result<ConfigStore> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    ConfigStore::load_or_default(&path)
        .with_context(|| format!("加载配置失败: {}", path.display()))
}

async fn analyze_files(
    store: ConfigStore,
    files: Vec<PathBuf>,
    name: Option<String>,
    json: bool,
) -> Result<()> {
    let importer = ScheduleImporterImpl::new();
    let results = importer.batch_import(files.clone()).await;

    let mut session = AnalysisSession::with_config(store);
    let mut failed = 0;
    for (path, result) in files.iter().zip(results) {
        let data = match result {
            Ok(data) => data,
            Err(e) => {
                failed += 1;
                eprintln!(
                    "{}",
                    t_with_args(
                        "report.import_failed",
                        &[("file", &path.display().to_string()), ("error", &e.to_string())],
                    )
                );
                continue;
            }
        };

        session.load_schedule_data(data);
        let label = match (&name, files.len()) {
            (Some(n), 1) => n.clone(),
            (Some(n), _) => format!("{} - {}", n, file_label(path)),
            (None, _) => file_label(path),
        };
        let analysis = session.run_analysis(Some(&label));
        print_analysis(&analysis, json)?;
    }

    if failed > 0 {
        bail!("{} / {} 个文件导入失败", failed, files.len());
    }
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_analysis(analysis: &ScheduleAnalysis, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(analysis).context("序列化评估结果失败")?;
        println!("{}", out);
        return Ok(());
    }

    let summary = &analysis.summary;
    let stats = analysis.stats();
    println!("{}", analysis.name);
    println!(
        "  {}: {} ({})",
        t("report.overall"),
        analysis.overall_score,
        analysis.status
    );
    println!(
        "  {}: {}  {}: {}  {}: {}  {}: {}",
        t("report.activities"),
        summary.total_activities,
        t("report.relationships"),
        summary.total_relationships,
        t("report.critical"),
        summary.critical_activities,
        t("report.linked"),
        summary.activities_with_relationships
    );
    println!(
        "  {}: {} ok / {} warning / {} critical",
        t("report.checks"),
        stats.total_ok,
        stats.total_warnings,
        stats.total_critical
    );

    for category in &analysis.category_results {
        println!();
        println!("  [{}] {}", category.category_id, category.score);
        for result in &category.results {
            println!(
                "    {:<8} {:>5.1}  {:<26} {}",
                result.status.to_string(),
                result.score,
                result.criterion_id,
                result.message
            );
            for detail in &result.details {
                println!("             - {}", detail);
            }
        }
    }
    println!();
    Ok(())
}

fn print_criteria() {
    let config = default_config();
    for id in CriterionId::ALL {
        let category = config
            .categories
            .iter()
            .find(|c| c.criterion(id.as_str()).is_some())
            .map(|c| c.id.as_str())
            .unwrap_or("-");
        let marker = if id.is_placeholder() { " (placeholder)" } else { "" };
        println!("{:<16} {}{}", category, id, marker);
    }
}
