//! 項目レコードテスト
//!
//! VisItemのロード・保存・寛容パースを検証

use igen_bench_rust::item::{EvalEntry, Judgment, VisItem};
use std::path::PathBuf;
use tempfile::tempdir;

fn sample_item() -> VisItem {
    let mut entry = EvalEntry {
        source: "prompt".to_string(),
        ground: "bar chart with 3 bars".to_string(),
        question: "Is there a title?".to_string(),
        question_type: "layout".to_string(),
        judgments: Vec::new(),
    };
    entry.add_judgment("gemini-2.0", "gemini-2.5-flash", "タイトルが見える", "1");

    let mut item = VisItem {
        id: "42".to_string(),
        reference_image_url: Some("https://example.com/ref.png".to_string()),
        t2i_prompt: Some("draw a chart".to_string()),
        chart_type: Some("bar".to_string()),
        evaluation: vec![entry],
        ..Default::default()
    };
    item.update_generation("gemini-2.0", "outputs/42/42_gemini_2_0.png");
    item
}

/// 保存→再ロードで全フィールドが一致する（round-trip）
#[test]
fn test_save_and_load_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let item = sample_item();

    item.save(dir.path()).expect("保存失敗");

    let save_path = dir.path().join("42").join("42.json");
    assert!(save_path.exists());

    let loaded = VisItem::load(&save_path).expect("ロード失敗");
    assert_eq!(loaded, item);

    // もう一往復しても変わらない
    loaded.save(dir.path()).expect("再保存失敗");
    let reloaded = VisItem::load(&save_path).expect("再ロード失敗");
    assert_eq!(reloaded, item);
}

/// .jsonで終わるパスを渡した場合は直接そこへ保存する
#[test]
fn test_save_to_explicit_file_path() {
    let dir = tempdir().expect("Failed to create temp dir");
    let item = sample_item();

    let explicit = dir.path().join("nested").join("custom.json");
    item.save(&explicit).expect("保存失敗");

    assert!(explicit.exists());
    let loaded = VisItem::load(&explicit).expect("ロード失敗");
    assert_eq!(loaded.id, "42");
}

/// idが無いJSONはパースエラー
#[test]
fn test_load_missing_id_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("no_id.json");
    std::fs::write(&path, r#"{"t2i_prompt": "draw a chart"}"#).unwrap();

    assert!(VisItem::load(&path).is_err());
}

/// 存在しないファイルのロード
#[test]
fn test_load_nonexistent_file() {
    let result = VisItem::load(&PathBuf::from("/nonexistent/path/0.json"));
    assert!(result.is_err());
}

/// 任意フィールドが無い場合は空コンテナ/Noneで補完される
#[test]
fn test_load_minimal_record_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("minimal.json");
    std::fs::write(&path, r#"{"id": "7"}"#).unwrap();

    let item = VisItem::load(&path).expect("ロード失敗");
    assert_eq!(item.id, "7");
    assert!(item.reference_image_url.is_none());
    assert!(item.t2i_prompt.is_none());
    assert!(item.chart_type.is_none());
    assert!(item.generation.is_empty());
    assert!(item.evaluation.is_empty());
}

/// judgmentsの寛容パース: フィールド欠けは空文字、オブジェクト以外は読み飛ばす
#[test]
fn test_load_tolerant_judgments() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("tolerant.json");
    std::fs::write(
        &path,
        r#"{
  "id": "9",
  "evaluation": [
    {
      "question": "Is there a legend?",
      "judgments": [
        {"eval_model": "e1"},
        "garbage",
        42,
        {"eval_model": "e2", "gen_model": "g2", "analysis": "ok", "answer": "1"}
      ]
    }
  ]
}"#,
    )
    .unwrap();

    let item = VisItem::load(&path).expect("ロード失敗");
    let judgments = &item.evaluation[0].judgments;

    // 非オブジェクト2件は捨てられる
    assert_eq!(judgments.len(), 2);
    assert_eq!(judgments[0].eval_model, "e1");
    assert_eq!(judgments[0].gen_model, "");
    assert_eq!(judgments[0].analysis, "");
    assert_eq!(judgments[0].answer, "");
    assert_eq!(judgments[1].answer, "1");
}

/// 評価エントリと判定の順序は保存・ロードで保持される
#[test]
fn test_evaluation_order_preserved() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut item = VisItem {
        id: "5".to_string(),
        ..Default::default()
    };
    for i in 1..=4 {
        let mut entry = EvalEntry {
            question: format!("question {}", i),
            ..Default::default()
        };
        entry.add_judgment("g", "e", &format!("analysis {}", i), "0");
        item.evaluation.push(entry);
    }

    item.save(dir.path()).expect("保存失敗");
    let loaded = VisItem::load(&dir.path().join("5").join("5.json")).expect("ロード失敗");

    for (i, entry) in loaded.evaluation.iter().enumerate() {
        assert_eq!(entry.question, format!("question {}", i + 1));
        assert_eq!(entry.judgments[0].analysis, format!("analysis {}", i + 1));
    }
}

/// 生成マップは後勝ち・単調増加
#[test]
fn test_generation_last_write_wins() {
    let mut item = VisItem {
        id: "3".to_string(),
        ..Default::default()
    };

    item.update_generation("m1", "old.png");
    item.update_generation("m1", "new.png");
    item.update_generation("m2", "other.png");

    assert_eq!(item.generation.len(), 2);
    assert_eq!(item.generation["m1"], "new.png");
}

/// 重複判定がある場合もhas_judgmentは真を返す（後勝ち読み取り）
#[test]
fn test_duplicate_judgments_still_readable() {
    let mut entry = EvalEntry::default();
    entry.judgments.push(Judgment {
        eval_model: "e".to_string(),
        gen_model: "g".to_string(),
        analysis: "first".to_string(),
        answer: "0".to_string(),
    });
    entry.judgments.push(Judgment {
        eval_model: "e".to_string(),
        gen_model: "g".to_string(),
        analysis: "second".to_string(),
        answer: "1".to_string(),
    });

    assert!(entry.has_judgment("g", "e"));
    assert_eq!(entry.judgments.last().unwrap().answer, "1");
}
