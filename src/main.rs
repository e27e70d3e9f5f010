// ==========================================
// 供应商问卷系统 - 命令行入口
// ==========================================
// 子命令: import / template / tag / section / questions
// 失败时原样输出错误消息并以非零状态退出
// ==========================================

use clap::{Parser, Subcommand};
use questionnaire_import::api::{ApiError, ApiResult, ImportOptions, DEFAULT_TAG_COLOR};
use questionnaire_import::app::AppState;
use questionnaire_import::db::default_db_path;
use questionnaire_import::domain::{FileUnderstanding, NewSection, NewTag};
use questionnaire_import::importer::template::write_csv_template;
use questionnaire_import::logging::{self, LogFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "questionnaire-import")]
#[command(about = "Import supplier questionnaire questions from Excel or CSV files")]
#[command(version)]
struct Cli {
    /// SQLite database path (defaults to $QUESTIONNAIRE_DB or the user data directory)
    #[arg(long, global = true, env = "QUESTIONNAIRE_DB")]
    db: Option<String>,

    /// Log format on stderr: text or json
    #[arg(long, global = true, env = "QUESTIONNAIRE_LOG_FORMAT", default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a spreadsheet and store its questions
    Import {
        /// Path to .xlsx, .xls or .csv file
        file: PathBuf,

        /// JSON file with column mappings ({"columnMappings": {...}})
        #[arg(short, long)]
        understanding: Option<PathBuf>,

        /// Validate only, do not store anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a CSV template with the default headers and sample rows
    Template {
        /// Output path
        out: PathBuf,
    },

    /// Manage question tags
    Tag {
        #[command(subcommand)]
        command: TagCommand,
    },

    /// Manage questionnaire sections
    Section {
        #[command(subcommand)]
        command: SectionCommand,
    },

    /// List stored questions
    Questions {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum TagCommand {
    /// Create a tag
    Add {
        name: String,

        /// Colour as #RRGGBB
        #[arg(long, default_value = DEFAULT_TAG_COLOR)]
        color: String,

        #[arg(long)]
        description: Option<String>,
    },
    /// List tags
    List,
}

#[derive(Subcommand)]
enum SectionCommand {
    /// Create a section
    Add {
        name: String,

        #[arg(long, default_value_t = 0)]
        order: i64,

        #[arg(long)]
        description: Option<String>,
    },
    /// List sections
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ApiResult<()> {
    // template 不需要数据库
    if let Commands::Template { out } = &cli.command {
        let file = std::fs::File::create(out)
            .map_err(|e| ApiError::InvalidInput(format!("无法创建文件 {}: {}", out.display(), e)))?;
        write_csv_template(file)?;
        println!("Template written to {}", out.display());
        return Ok(());
    }

    let db_path = cli.db.unwrap_or_else(default_db_path);
    tracing::debug!("使用数据库: {}", db_path);
    let state = AppState::new(db_path)?;

    match cli.command {
        Commands::Import {
            file,
            understanding,
            dry_run,
            json,
        } => {
            let mut options = ImportOptions::default()
                .with_progress(Arc::new(|p: f64| tracing::debug!(percent = p, "导入进度")));
            if let Some(path) = understanding {
                options = options.with_understanding(read_understanding(&path)?);
            }

            if dry_run {
                let outcome = state.import_api.preview(&file, options).await?;
                if json {
                    print_json(&outcome)?;
                } else {
                    println!(
                        "{} questions are valid ({} rows read, nothing stored)",
                        outcome.summary.accepted, outcome.summary.total_rows
                    );
                }
            } else {
                let response = state.import_api.import(&file, options).await?;
                if json {
                    print_json(&response)?;
                } else {
                    println!(
                        "Imported {} questions from {}",
                        response.question_ids.len(),
                        response.summary.file_name
                    );
                }
            }
        }

        Commands::Tag { command } => match command {
            TagCommand::Add {
                name,
                color,
                description,
            } => {
                let tag = state.catalog_api.create_tag(NewTag {
                    name,
                    color,
                    description,
                })?;
                println!("{}\t{}\t{}", tag.id, tag.name, tag.color);
            }
            TagCommand::List => {
                for tag in state.catalog_api.list_tags()? {
                    println!("{}\t{}\t{}", tag.id, tag.name, tag.color);
                }
            }
        },

        Commands::Section { command } => match command {
            SectionCommand::Add {
                name,
                order,
                description,
            } => {
                let section = state.catalog_api.create_section(NewSection {
                    name,
                    description,
                    order,
                })?;
                println!("{}\t{}\t{}", section.id, section.name, section.order);
            }
            SectionCommand::List => {
                for section in state.catalog_api.list_sections()? {
                    println!("{}\t{}\t{}", section.id, section.name, section.order);
                }
            }
        },

        Commands::Questions { json } => {
            let questions = state.catalog_api.list_questions()?;
            if json {
                print_json(&questions)?;
            } else {
                for q in &questions {
                    println!("{}\t{}\t{}", q.order, q.question_type, q.text);
                }
            }
        }

        Commands::Template { .. } => {}
    }

    Ok(())
}

fn read_understanding(path: &Path) -> ApiResult<FileUnderstanding> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ApiError::InvalidInput(format!("无法读取 {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| ApiError::InvalidInput(format!("文件理解格式错误: {}", e)))
}

fn print_json<T: Serialize>(value: &T) -> ApiResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InternalError(format!("序列化失败: {}", e)))?;
    println!("{}", json);
    Ok(())
}
