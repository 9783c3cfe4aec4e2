use std::path::PathBuf;

use tonk_engine::cards::{Card, Rank, Suit};
use tonk_engine::game::WinCondition;
use tonk_engine::logger::{ActionRecord, RoundLogger, RoundRecord, format_round_id};
use tonk_engine::player::TurnAction;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    p.push(format!("{}-{}", std::process::id(), name));
    p
}

fn sample_record(round_id: String) -> RoundRecord {
    RoundRecord {
        round_id,
        seed: Some(42),
        actions: vec![
            ActionRecord {
                player_id: 0,
                action: TurnAction::DrawStock,
            },
            ActionRecord {
                player_id: 0,
                action: TurnAction::Discard {
                    card: Card::new(Suit::Spades, Rank::King),
                },
            },
        ],
        winner: Some(1),
        condition: Some(WinCondition::Knock),
        scores: vec![18, 0],
        pot: 10,
        top_discard: Some(Card::new(Suit::Spades, Rank::King)),
        ts: None,
        meta: None,
    }
}

#[test]
fn round_ids_are_date_plus_zero_padded_sequence() {
    assert_eq!(format_round_id("20251231", 1), "20251231-000001");
    assert_eq!(format_round_id("20251231", 999999), "20251231-999999");
}

#[test]
fn logger_assigns_sequential_ids() {
    let mut logger = RoundLogger::with_seq_for_test("20250101");
    assert_eq!(logger.next_id(), "20250101-000001");
    assert_eq!(logger.next_id(), "20250101-000002");
    assert_eq!(logger.next_id(), "20250101-000003");
}

#[test]
fn write_appends_one_json_line_per_round() {
    let path = tmp_path("rounds.jsonl");
    {
        let mut logger = RoundLogger::create(&path).expect("create log");
        let a = logger.next_id();
        let b = logger.next_id();
        logger.write(&sample_record(a)).expect("write");
        logger.write(&sample_record(b)).expect("write");
    }

    let content = std::fs::read_to_string(&path).expect("read back");
    assert!(content.ends_with('\n'));
    assert!(!content.contains('\r'), "strictly LF-terminated");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: RoundRecord = serde_json::from_str(lines[0]).expect("valid record");
    assert!(first.round_id.ends_with("-000001"), "got {}", first.round_id);
    let second: RoundRecord = serde_json::from_str(lines[1]).expect("valid record");
    assert!(second.round_id.ends_with("-000002"), "got {}", second.round_id);
    assert_eq!(first.winner, Some(1));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn write_injects_a_timestamp_when_missing() {
    let path = tmp_path("rounds-ts.jsonl");
    {
        let mut logger = RoundLogger::create(&path).expect("create log");
        let id = logger.next_id();
        logger.write(&sample_record(id)).expect("write");
    }

    let content = std::fs::read_to_string(&path).expect("read back");
    let record: RoundRecord = serde_json::from_str(content.lines().next().expect("one line"))
        .expect("valid record");
    let ts = record.ts.expect("timestamp injected");
    assert!(ts.contains('T'), "RFC3339 shaped: {}", ts);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn write_preserves_an_explicit_timestamp() {
    let path = tmp_path("rounds-keep-ts.jsonl");
    {
        let mut logger = RoundLogger::create(&path).expect("create log");
        let id = logger.next_id();
        let mut record = sample_record(id);
        record.ts = Some("2025-06-01T12:00:00Z".to_string());
        logger.write(&record).expect("write");
    }

    let content = std::fs::read_to_string(&path).expect("read back");
    let record: RoundRecord = serde_json::from_str(content.lines().next().expect("one line"))
        .expect("valid record");
    assert_eq!(record.ts.as_deref(), Some("2025-06-01T12:00:00Z"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn record_round_trips_through_json() {
    let mut record = sample_record("20250101-000001".to_string());
    record.ts = Some("2025-01-01T00:00:00Z".to_string());
    record.meta = Some(serde_json::json!({"table": "kitchen"}));

    let json = serde_json::to_string(&record).expect("serialize");
    let back: RoundRecord = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, record);
}

#[test]
fn optional_fields_default_when_absent() {
    let json = r#"{"round_id":"20250101-000001","seed":null,"actions":[],"winner":null,"condition":null,"scores":[0,0],"pot":0}"#;
    let record: RoundRecord = serde_json::from_str(json).expect("older record shape");
    assert_eq!(record.top_discard, None);
    assert_eq!(record.ts, None);
    assert_eq!(record.meta, None);
}

#[test]
fn action_records_use_tagged_kinds() {
    let record = ActionRecord {
        player_id: 2,
        action: TurnAction::Hit {
            card: Card::new(Suit::Hearts, Rank::Seven),
            spread: 1,
        },
    };
    let json = serde_json::to_string(&record).expect("serialize");
    assert!(json.contains(r#""kind":"hit""#));
    assert!(json.contains(r#""spread":1"#));
}
