//! igen-bench-rust - インフォグラフィックT2I生成ベンチマーク
//!
//! 項目（VisItem）ごとに2段階のパイプラインを回す:
//! - gen: T2Iプロンプトから画像を生成し、生成マップに記録
//! - eval: 生成画像に対して事実確認質問を判定し、判定履歴に追記
//!
//! どちらの段階もレジューム可能（保存済みレコード優先 + 完了判定で
//! 済んだ作業をスキップ）。

pub mod ai_provider;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod item;
pub mod paths;
pub mod prompts;
pub mod state;
pub mod workflow;
