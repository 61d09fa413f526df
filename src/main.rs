use clap::Parser;
use igen_bench_rust::{cli, config, engine, error, state, workflow};

use cli::{Cli, Commands};
use config::Config;
use engine::CliLlmClient;
use error::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Gen {
            info_path,
            model,
            output_dir,
            resume,
        } => {
            println!("🎨 igen-bench - 画像生成\n");

            let model = model.unwrap_or_else(|| config.gen_model.clone());
            let output_dir =
                output_dir.unwrap_or_else(|| PathBuf::from(&config.output_dir));

            let client = Box::new(CliLlmClient::new(cli.ai_provider, cli.verbose));
            let workflow = workflow::GenWorkflow::new(client, &model, &output_dir, resume);

            let item = workflow.state().load_item(&info_path, resume)?;
            let item = workflow.run(item).await?;

            workflow.state().save_item(&item)?;
            let save_path = item.build_save_path(&output_dir);
            println!("\n✅ 生成完了: {}", save_path.display());
        }

        Commands::Eval {
            info_path,
            gen_model,
            model,
            image_path,
            output_dir,
            resume,
        } => {
            println!("🔍 igen-bench - 評価\n");

            let eval_model = model.unwrap_or_else(|| config.eval_model.clone());
            let output_dir =
                output_dir.unwrap_or_else(|| PathBuf::from(&config.output_dir));

            let client = Box::new(CliLlmClient::new(cli.ai_provider, cli.verbose));
            let workflow =
                workflow::EvalWorkflow::new(client, &eval_model, &output_dir, resume);

            let item = workflow.state().load_item(&info_path, resume)?;
            let item = workflow.run(item, &gen_model, image_path).await?;

            workflow.state().save_item(&item)?;
            let save_path = item.build_save_path(&output_dir);
            println!("\n✅ 評価完了: {}", save_path.display());
        }

        Commands::Status {
            info_path,
            output_dir,
        } => {
            println!("📊 igen-bench - 進捗状況\n");

            let output_dir =
                output_dir.unwrap_or_else(|| PathBuf::from(&config.output_dir));
            let manager = state::StateManager::new(&output_dir);

            // 保存済みレコードがあればそちらを表示対象にする
            let item = manager.load_item(&info_path, true)?;

            println!("項目: {}", item.id);
            if let Some(chart_type) = &item.chart_type {
                println!("チャート種別: {}", chart_type);
            }

            println!("\n生成 ({}件):", item.generation.len());
            for (model, path) in &item.generation {
                let mark = if Path::new(path).exists() { "✔" } else { "✗" };
                println!("  {} {} → {}", mark, model, path);
            }

            let prompt_count = item.evaluation_by_source("prompt").len();
            let seed_count = item.evaluation_by_source("seed").len();
            println!(
                "\n評価質問: {}件 (prompt由来: {}, seed由来: {})",
                item.evaluation.len(),
                prompt_count,
                seed_count
            );

            // 出現した (gen_model, eval_model) の組ごとの完了状況
            let pairs: BTreeSet<(String, String)> = item
                .evaluation
                .iter()
                .flat_map(|entry| entry.judgments.iter())
                .map(|j| (j.gen_model.clone(), j.eval_model.clone()))
                .collect();

            for (gen_model, eval_model) in &pairs {
                let mark = if manager.is_evaluation_complete(&item, gen_model, eval_model) {
                    "✔"
                } else {
                    "…"
                };
                println!("  {} {} on {}", mark, eval_model, gen_model);
            }
        }

        Commands::Config {
            set_gen_model,
            set_eval_model,
            set_output_dir,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(model) = set_gen_model {
                config.gen_model = model;
                changed = true;
            }
            if let Some(model) = set_eval_model {
                config.eval_model = model;
                changed = true;
            }
            if let Some(dir) = set_output_dir {
                config.output_dir = dir;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  生成モデル: {}", config.gen_model);
                println!("  評価モデル: {}", config.eval_model);
                println!("  出力ディレクトリ: {}", config.output_dir);
            }
        }
    }

    Ok(())
}
