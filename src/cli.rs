use crate::ai_provider::AiProvider;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "igen-bench")]
#[command(about = "インフォグラフィックT2I生成ベンチマーク・評価ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (gemini/claude/codex)
    #[arg(long, default_value = "gemini", global = true)]
    pub ai_provider: AiProvider,
}

#[derive(Subcommand)]
pub enum Commands {
    /// T2Iプロンプトから画像を生成
    Gen {
        /// 項目JSON（シード）のパス
        #[arg(long)]
        info_path: PathBuf,

        /// 生成モデル名（省略時は設定値）
        #[arg(short, long)]
        model: Option<String>,

        /// 出力ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 出力ディレクトリの保存済みレコードから再開し、生成済みをスキップ
        #[arg(long)]
        resume: bool,
    },

    /// 生成画像を質問ごとに判定
    Eval {
        /// 項目JSON（シード）のパス
        #[arg(long)]
        info_path: PathBuf,

        /// 画像を生成したモデル名
        #[arg(long)]
        gen_model: String,

        /// 評価モデル名（省略時は設定値）
        #[arg(short, long)]
        model: Option<String>,

        /// 評価対象の画像パス（省略時は規約パスから解決）
        #[arg(long)]
        image_path: Option<PathBuf>,

        /// 出力ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 出力ディレクトリの保存済みレコードから再開し、判定済みをスキップ
        #[arg(long)]
        resume: bool,
    },

    /// 項目の進捗状況を表示
    Status {
        /// 項目JSON（シード）のパス
        #[arg(long)]
        info_path: PathBuf,

        /// 出力ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// デフォルト生成モデルを設定
        #[arg(long)]
        set_gen_model: Option<String>,

        /// デフォルト評価モデルを設定
        #[arg(long)]
        set_eval_model: Option<String>,

        /// デフォルト出力ディレクトリを設定
        #[arg(long)]
        set_output_dir: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
