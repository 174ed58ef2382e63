use clap::{Parser, Subcommand};
use siteforge::i18n::{self, LocaleConfig, LocaleTable};
use siteforge::{build_catalog_from_dir, extract_metadata};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// 📚 SiteForge - 静态网站内容管道工具
#[derive(Parser)]
#[command(name = "siteforge")]
#[command(about = "一个用于静态网站内容管道的Rust工具")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 扫描样例目录并构建EPUB目录JSON
    Catalog {
        /// 样例根目录路径
        #[arg(help = "按分类组织的EPUB样例根目录")]
        samples_dir: PathBuf,

        /// 输出文件路径
        #[arg(short, long, help = "目录JSON的输出路径（省略时打印到标准输出）")]
        output: Option<PathBuf>,

        /// 详细输出模式
        #[arg(short, long, help = "逐条显示目录条目")]
        verbose: bool,
    },

    /// 显示单个EPUB文件的包元数据
    Inspect {
        /// EPUB文件路径
        #[arg(help = "要检查的EPUB文件路径")]
        epub_file: PathBuf,
    },

    /// 将PO翻译源文件转换为JSON
    Po2json {
        /// PO源文件目录
        #[arg(help = "各语言PO文件所在目录")]
        po_dir: PathBuf,

        /// JSON输出目录
        #[arg(help = "各语言JSON文件的输出目录")]
        output_dir: PathBuf,

        /// 语言配置文件路径
        #[arg(short, long, default_value = "languages.yaml", help = "语言配置文件路径")]
        config: PathBuf,
    },

    /// 从模板中提取可翻译键并更新POT文件
    Extract {
        /// 模板根目录
        #[arg(help = "包含.njk模板的根目录")]
        templates_dir: PathBuf,

        /// POT文件路径
        #[arg(short, long, default_value = "locales/messages.pot", help = "要更新的POT文件路径")]
        pot: PathBuf,
    },

    /// 合并所有语言的JSON并查询翻译表
    Table {
        /// 各语言JSON文件所在目录
        #[arg(help = "各语言JSON文件所在目录")]
        locales_dir: PathBuf,

        /// 语言配置文件路径
        #[arg(short, long, default_value = "languages.yaml", help = "语言配置文件路径")]
        config: PathBuf,

        /// 查询指定键的译文
        #[arg(short, long, help = "要查询的翻译键")]
        key: Option<String>,

        /// 查询使用的语言
        #[arg(short, long, help = "查询使用的语言代码（默认为配置中的默认语言）")]
        language: Option<String>,

        /// 详细输出模式
        #[arg(short, long, help = "逐键显示各语言译文")]
        verbose: bool,
    },
}

fn main() {
    let args = Args::parse();

    println!("📚 SiteForge - 静态网站内容管道工具");

    let result = match args.command {
        Command::Catalog {
            samples_dir,
            output,
            verbose,
        } => run_catalog(samples_dir, output, verbose),
        Command::Inspect { epub_file } => run_inspect(epub_file),
        Command::Po2json {
            po_dir,
            output_dir,
            config,
        } => run_po2json(po_dir, output_dir, config),
        Command::Extract { templates_dir, pot } => run_extract(templates_dir, pot),
        Command::Table {
            locales_dir,
            config,
            key,
            language,
            verbose,
        } => run_table(locales_dir, config, key, language, verbose),
    };

    match result {
        Ok(_) => println!("🎉 处理完成！"),
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            process::exit(1);
        }
    }
}

/// 构建目录并输出JSON
fn run_catalog(
    samples_dir: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 正在扫描样例目录: {}", samples_dir.display());

    let catalog = build_catalog_from_dir(&samples_dir)?;

    let total: usize = catalog.values().map(Vec::len).sum();
    println!("\n📊 目录统计:");
    for (category, entries) in &catalog {
        println!("  {}: {} 个样例", category, entries.len());
        if verbose {
            for (i, entry) in entries.iter().enumerate() {
                println!(
                    "    {}. {} ({})",
                    i + 1,
                    entry.metadata.title.as_deref().unwrap_or("无标题"),
                    entry.relative_path
                );
            }
        }
    }
    println!("  共 {} 个条目", total);

    let json = serde_json::to_string_pretty(&catalog)?;
    match output {
        Some(path) => {
            fs::write(&path, json)?;
            println!("📁 目录已写入: {}", path.display());
        }
        None => println!("\n{}", json),
    }

    Ok(())
}

/// 显示单个EPUB文件的元数据
fn run_inspect(epub_file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("正在检查EPUB文件: {}", epub_file.display());

    let metadata = extract_metadata(&epub_file)?;

    println!("\n📊 EPUB元数据信息:");
    if let Some(title) = &metadata.title {
        println!("  标题: {}", title);
    }
    if !metadata.authors.is_empty() {
        println!("  作者: {}", metadata.authors.join("、"));
    }
    if let Some(language) = &metadata.language {
        println!("  语言: {}", language);
    }
    if let Some(publisher) = &metadata.publisher {
        println!("  出版社: {}", publisher);
    }
    if let Some(description) = &metadata.description {
        println!("  描述: {}", description);
    }
    if !metadata.subjects.is_empty() {
        println!("  主题: {}", metadata.subjects.join("、"));
    }
    if let Some(uuid) = &metadata.uuid {
        println!("  🔖 唯一标识符: {}", uuid);
    }
    if let Some(modified) = &metadata.modified {
        println!("  🕐 最后修改: {}", modified);
    }

    Ok(())
}

/// 批量转换PO文件为JSON
fn run_po2json(
    po_dir: PathBuf,
    output_dir: PathBuf,
    config_path: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_or_generate_config(&config_path)?;

    println!("🌐 正在转换翻译文件: {} -> {}", po_dir.display(), output_dir.display());

    let processed = i18n::convert_all(&config, &po_dir, &output_dir)?;
    println!("📁 共转换 {} 个语言", processed);

    Ok(())
}

/// 提取模板键并增量更新POT文件
fn run_extract(templates_dir: PathBuf, pot: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 正在扫描模板目录: {}", templates_dir.display());

    let messages = i18n::extract_template_keys(&templates_dir)?;
    println!("  找到 {} 个可翻译键", messages.len());

    let added = i18n::update_pot_file(&pot, &messages)?;
    if added > 0 {
        println!("📁 已向 {} 追加 {} 个新条目", pot.display(), added);
    } else {
        println!("📁 {} 无需更新", pot.display());
    }

    Ok(())
}

/// 加载翻译表并可选地查询单个键
fn run_table(
    locales_dir: PathBuf,
    config_path: PathBuf,
    key: Option<String>,
    language: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_or_generate_config(&config_path)?;
    let table = LocaleTable::load(config, &locales_dir)?;

    println!("\n📊 翻译表统计:");
    println!("  语言: {}", table.config().languages.join("、"));
    println!("  键总数: {}", table.len());

    if verbose {
        for (key, languages) in table.entries() {
            let available: Vec<&str> = languages.keys().map(String::as_str).collect();
            println!("    {} [{}]", key, available.join("、"));
        }
    }

    if let Some(key) = key {
        let language = language.unwrap_or_else(|| table.config().default_language.clone());
        match table.translate(&key, &language) {
            Some(text) => println!("  {} [{}] = {}", key, language, text),
            None => println!("  ⚠️  未找到键 {} 在语言 {} 下的译文", key, language),
        }
    }

    Ok(())
}

/// 加载语言配置，配置文件不存在时自动生成默认配置
fn load_or_generate_config(path: &Path) -> Result<LocaleConfig, Box<dyn std::error::Error>> {
    if !path.exists() && path.to_string_lossy() == "languages.yaml" {
        println!("⚙️  未找到配置文件，正在生成默认配置: {}", path.display());
        LocaleConfig::generate_default_config()?;
    }
    Ok(LocaleConfig::from_file(path)?)
}
