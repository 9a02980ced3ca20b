use std::io::BufRead;
use std::path::PathBuf;

use addr_correct::csv_loader::load_addresses;
use addr_correct::{
    AddressCorrector, AddressIndex, AppConfig, ElasticSearchService, SearchService,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "addr-correct", about = "Korean postal address corrector")]
struct Cli {
    /// 地址 CSV，加载到内存索引
    #[arg(long, conflicts_with_all = ["index_dir", "elastic"])]
    data: Option<PathBuf>,

    /// 已建好的 tantivy 索引目录
    #[arg(long, conflicts_with = "elastic")]
    index_dir: Option<PathBuf>,

    /// Elasticsearch 地址，例如 http://localhost:9200
    #[arg(long)]
    elastic: Option<String>,

    /// TOML 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 待校正的地址，为空时逐行读取标准输入
    addresses: Vec<String>,
}

fn open_service(cli: &Cli, config: &mut AppConfig) -> anyhow::Result<Box<dyn SearchService>> {
    if let Some(path) = &cli.data {
        // 装载数据
        let records = load_addresses(path)?;
        let mut index = AddressIndex::new()?;
        index.add_records(&records)?;
        return Ok(Box::new(index));
    }
    if let Some(dir) = &cli.index_dir {
        return Ok(Box::new(AddressIndex::open_in_dir(dir)?));
    }

    if let Some(url) = &cli.elastic {
        config.elastic.url = url.clone();
    }
    config.corrector.min_score = config.elastic.min_score;
    Ok(Box::new(ElasticSearchService::new(config.elastic.clone())?))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("addr_correct=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let service = open_service(&cli, &mut config)?;
    let corrector = AddressCorrector::with_config(service, config.corrector.clone());

    let addresses = if cli.addresses.is_empty() {
        std::io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        cli.addresses.clone()
    };

    for address in addresses.iter().filter(|a| !a.trim().is_empty()) {
        let results = corrector.correct(address)?;
        println!("{}: 找到 {} 条结果", address, results.len());
        for result in &results {
            println!("  {}", result.to_string());
        }
    }

    Ok(())
}
